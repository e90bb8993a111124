//! Playable maze session

use std::fmt;

use itertools::Itertools;
use rand::{rngs::StdRng, SeedableRng};
use tracing::debug;

use crate::error::{MazeError, Result};
use crate::path_finder::PathFinder;
use crate::{Cell, Direction, GeneratorConfig, Grid, MazeGenerator, Point};

/// Result of a single move attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Out of bounds, into a wall, or an unknown direction; nothing changed
    Invalid,
    Moved,
    /// Player reached the exit
    Won,
}

/// Overall game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// Exit has been reached. Stays until [MazeSession::reset].
    Won,
}

/// One maze with a player walking through it.
///
/// The player always stands on an open square inside the grid; moves that
/// would break this are rejected. After the exit has been reached the
/// session reports [GameState::Won] but keeps accepting moves, so refusing
/// further input is up to the caller.
///
/// A session has no internal synchronization; share it between threads
/// behind a lock of your own.
pub struct MazeSession {
    grid: Grid,
    start: Point,
    exit: Point,
    position: Point,
    status: &'static str,
    state: GameState,
    generator: MazeGenerator,
    random: StdRng,
}

impl MazeSession {
    pub const MSG_INITIAL: &'static str = "Use the arrow keys or up/down/left/right to move.";
    pub const MSG_MOVED: &'static str = "Move successful!";
    pub const MSG_WON: &'static str = "Congratulations! You win!";
    pub const MSG_INVALID_MOVE: &'static str = "Invalid move! Try again.";
    pub const MSG_INVALID_DIRECTION: &'static str =
        "Invalid direction! Use 'up', 'down', 'left', or 'right'.";

    const S_PLAYER: char = 'P';
    const S_EXIT: char = 'E';
    const S_START: char = 'S';
    const S_WALL: char = '#';
    const S_OPEN: char = '.';
    const S_PATH: char = '*';

    /// New `size` x `size` maze with default generator settings and a random
    /// seed.
    ///
    /// Returns error, if `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        Self::with_generator(size, MazeGenerator::default(), StdRng::from_entropy())
    }

    /// New maze with a reproducible layout
    pub fn with_seed(size: usize, seed: u64) -> Result<Self> {
        Self::with_generator(size, MazeGenerator::default(), StdRng::seed_from_u64(seed))
    }

    /// New maze built by `generator`.
    ///
    /// `random` is kept for regenerating the maze on [Self::reset].
    pub fn with_generator(size: usize, generator: MazeGenerator, mut random: StdRng) -> Result<Self> {
        if size == 0 {
            return Err(MazeError::InvalidSize {
                height: size,
                width: size,
            });
        }
        let grid = generator.generate(size, &mut random)?;
        Ok(Self::assemble(grid, generator, random))
    }

    /// Session over an existing layout
    ///
    /// The start is the top-left and the exit the bottom-right corner. On
    /// [Self::reset], a new maze of the same shape is generated.
    ///
    /// Returns error, if the grid has unresolved cells or if start or exit
    /// is a wall.
    pub fn from_grid(grid: Grid) -> Result<Self> {
        Self::from_grid_with(grid, MazeGenerator::default(), StdRng::from_entropy())
    }

    /// Session over an existing layout, regenerated by `generator` and
    /// `random` on [Self::reset]
    pub fn from_grid_with(grid: Grid, generator: MazeGenerator, random: StdRng) -> Result<Self> {
        if let Some(p) = grid.first_unresolved() {
            return Err(MazeError::Unresolved {
                row: p.row,
                col: p.col,
            });
        }
        for p in [Point::new(0, 0), grid.last()] {
            if !grid.is_open(p) {
                return Err(MazeError::BlockedEndpoint {
                    row: p.row,
                    col: p.col,
                });
            }
        }
        Ok(Self::assemble(grid, generator, random))
    }

    fn assemble(grid: Grid, generator: MazeGenerator, random: StdRng) -> Self {
        let exit = grid.last();
        let mut session = Self {
            grid,
            start: Point::new(0, 0),
            exit,
            position: Point::new(0, 0),
            status: Self::MSG_INITIAL,
            state: GameState::Playing,
            generator,
            random,
        };
        session.restart();
        session
    }

    /// Put the player back to start
    fn restart(&mut self) {
        self.position = self.start;
        if self.position == self.exit {
            // Single square maze: standing on the exit already
            self.status = Self::MSG_WON;
            self.state = GameState::Won;
        } else {
            self.status = Self::MSG_INITIAL;
            self.state = GameState::Playing;
        }
    }

    /// Move the player one step
    ///
    /// The move is legal if the target square is inside the maze and open.
    /// Illegal moves leave the player in place. Once the maze is won, legal
    /// moves keep the win message.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let target = self
            .grid
            .neighbor(self.position, direction)
            .filter(|p| self.grid.is_open(*p));

        let outcome = match target {
            Some(p) => self.place(p),
            None => {
                self.status = Self::MSG_INVALID_MOVE;
                MoveOutcome::Invalid
            }
        };
        debug!(%direction, ?outcome, position = %self.position, "move");
        outcome
    }

    /// Move the player by a textual direction such as `"up"`
    ///
    /// Unknown tokens are an [MoveOutcome::Invalid] move, not an error.
    pub fn move_token(&mut self, token: &str) -> MoveOutcome {
        match token.parse::<Direction>() {
            Ok(direction) => self.move_player(direction),
            Err(e) => {
                debug!(error = %e, "rejected move");
                self.status = Self::MSG_INVALID_DIRECTION;
                MoveOutcome::Invalid
            }
        }
    }

    /// Shortest path from the player to the exit
    ///
    /// Empty if the player is already at the exit or the exit cannot be
    /// reached.
    pub fn shortest_path_from_current(&self) -> Vec<Point> {
        PathFinder::new(&self.grid).shortest_path(self.position, self.exit)
    }

    /// Jump to the end of a path computed by [Self::shortest_path_from_current]
    ///
    /// Intermediate squares are not checked. An empty path keeps the player
    /// in place.
    pub fn apply_path(&mut self, path: &[Point]) -> MoveOutcome {
        match path.last() {
            Some(p) => self.teleport_to(*p),
            None if self.position == self.exit => MoveOutcome::Won,
            None => {
                self.status = Self::MSG_INVALID_MOVE;
                MoveOutcome::Invalid
            }
        }
    }

    /// Place the player on any open square
    pub fn teleport_to(&mut self, point: Point) -> MoveOutcome {
        if self.grid.is_open(point) {
            self.place(point)
        } else {
            self.status = Self::MSG_INVALID_MOVE;
            MoveOutcome::Invalid
        }
    }

    fn place(&mut self, point: Point) -> MoveOutcome {
        self.position = point;
        if point == self.exit {
            self.status = Self::MSG_WON;
            self.state = GameState::Won;
            MoveOutcome::Won
        } else {
            self.status = match self.state {
                GameState::Won => Self::MSG_WON,
                GameState::Playing => Self::MSG_MOVED,
            };
            MoveOutcome::Moved
        }
    }

    /// Replace the maze with a freshly generated one of the same shape
    pub fn reset(&mut self) -> Result<()> {
        self.grid = self.generator.generate_with_shape(
            self.grid.height(),
            self.grid.width(),
            &mut self.random,
        )?;
        self.restart();
        debug!(
            height = self.grid.height(),
            width = self.grid.width(),
            "maze reset"
        );
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Side length of the maze (its height for non-square layouts)
    pub fn size(&self) -> usize {
        self.grid.height()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn exit(&self) -> Point {
        self.exit
    }

    /// Message describing the result of the last operation
    pub fn status(&self) -> &str {
        self.status
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_won(&self) -> bool {
        self.state == GameState::Won
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.generator.config()
    }

    /// Text rendering with `path` drawn as `*`
    pub fn render_with_path(&self, path: &[Point]) -> String {
        (0..self.grid.height())
            .map(|row| {
                (0..self.grid.width())
                    .map(|col| self.symbol(Point::new(row, col), path))
                    .join(" ")
            })
            .join("\n")
    }

    fn symbol(&self, p: Point, path: &[Point]) -> char {
        if p == self.position {
            Self::S_PLAYER
        } else if p == self.exit {
            Self::S_EXIT
        } else if p == self.start {
            Self::S_START
        } else if path.contains(&p) {
            Self::S_PATH
        } else {
            match self.grid.cell(p) {
                Some(Cell::Wall) => Self::S_WALL,
                _ => Self::S_OPEN,
            }
        }
    }
}

impl fmt::Display for MazeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with_path(&[]))
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::{GameState, MazeSession, MoveOutcome};
    use crate::path_finder::path_directions;
    use crate::{Direction, GeneratorConfig, Grid, MazeError, MazeGenerator, Point};

    fn session(layout: &str) -> MazeSession {
        MazeSession::from_grid(Grid::parse(layout).unwrap()).unwrap()
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            MazeSession::new(0),
            Err(MazeError::InvalidSize { .. })
        ));
    }

    #[test]
    fn new_session_starts_at_start() {
        let s = MazeSession::with_seed(6, 1).unwrap();
        assert_eq!(s.size(), 6);
        assert_eq!(s.start(), Point::new(0, 0));
        assert_eq!(s.exit(), Point::new(5, 5));
        assert_eq!(s.position(), s.start());
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.status(), MazeSession::MSG_INITIAL);
        assert!(s.grid().is_resolved());
    }

    #[test]
    fn following_shortest_path_wins() {
        for seed in 0..25 {
            let mut s = MazeSession::with_generator(
                9,
                MazeGenerator::new(GeneratorConfig::strict()).unwrap(),
                StdRng::seed_from_u64(seed),
            )
            .unwrap();
            let path = s.shortest_path_from_current();
            assert!(!path.is_empty());
            let directions = path_directions(s.position(), &path);
            assert_eq!(directions.len(), path.len());

            let (last, rest) = directions.split_last().unwrap();
            for d in rest {
                assert_eq!(s.move_player(*d), MoveOutcome::Moved, "seed {seed}");
            }
            assert_eq!(s.move_player(*last), MoveOutcome::Won);
            assert!(s.is_won());
            assert_eq!(s.status(), MazeSession::MSG_WON);
        }
    }

    #[test]
    fn move_into_wall_is_invalid() {
        let mut s = session(
            "
. # . . .
. . # . .
# . . . .
. . # # .
. . . . .",
        );
        assert_eq!(s.move_player(Direction::Right), MoveOutcome::Invalid);
        assert_eq!(s.position(), Point::new(0, 0));
        assert_eq!(s.status(), MazeSession::MSG_INVALID_MOVE);

        assert_eq!(s.move_player(Direction::Down), MoveOutcome::Moved);
        assert_eq!(s.position(), Point::new(1, 0));
        assert_eq!(s.status(), MazeSession::MSG_MOVED);
    }

    #[test]
    fn move_out_of_bounds_is_invalid() {
        let mut s = session(". .\n. .");
        assert_eq!(s.move_player(Direction::Up), MoveOutcome::Invalid);
        assert_eq!(s.move_player(Direction::Left), MoveOutcome::Invalid);
        assert_eq!(s.position(), Point::new(0, 0));
        assert_eq!(s.state(), GameState::Playing);
    }

    #[test]
    fn unknown_direction_token() {
        let mut s = session(". .\n. .");
        assert_eq!(s.move_token("sideways"), MoveOutcome::Invalid);
        assert_eq!(s.status(), MazeSession::MSG_INVALID_DIRECTION);
        assert_eq!(s.position(), Point::new(0, 0));

        assert_eq!(s.move_token("Right"), MoveOutcome::Moved);
        assert_eq!(s.move_token("down"), MoveOutcome::Won);
    }

    #[test]
    fn two_by_two_maze() {
        for seed in 0..20 {
            let s = MazeSession::with_seed(2, seed).unwrap();
            assert_eq!(s.grid().points().count(), 4);
            assert!(s.grid().is_open(Point::new(0, 0)));
            assert!(s.grid().is_open(Point::new(1, 1)));

            let path = s.shortest_path_from_current();
            assert_eq!(path.len(), 2);
            assert!(
                path == vec![Point::new(0, 1), Point::new(1, 1)]
                    || path == vec![Point::new(1, 0), Point::new(1, 1)]
            );
        }
    }

    #[test]
    fn single_square_maze_is_won_immediately() {
        let mut s = MazeSession::with_seed(1, 0).unwrap();
        assert_eq!(s.start(), s.exit());
        assert!(s.shortest_path_from_current().is_empty());
        assert_eq!(s.state(), GameState::Won);
        assert_eq!(s.apply_path(&[]), MoveOutcome::Won);

        s.reset().unwrap();
        assert!(s.is_won());
        assert_eq!(s.to_string(), "P");
    }

    #[test]
    fn won_is_sticky_until_reset() {
        let mut s = session(". .\n# .");
        assert_eq!(s.move_player(Direction::Right), MoveOutcome::Moved);
        assert_eq!(s.move_player(Direction::Down), MoveOutcome::Won);
        assert_eq!(s.move_player(Direction::Up), MoveOutcome::Moved);
        assert_eq!(s.state(), GameState::Won);
        assert_eq!(s.status(), MazeSession::MSG_WON);
        assert_eq!(s.move_player(Direction::Up), MoveOutcome::Invalid);
        assert_eq!(s.status(), MazeSession::MSG_INVALID_MOVE);
        assert_eq!(s.move_player(Direction::Down), MoveOutcome::Won);
        assert_eq!(s.status(), MazeSession::MSG_WON);

        s.reset().unwrap();
        assert_eq!(s.state(), GameState::Playing);
        assert_eq!(s.position(), s.start());
        assert_eq!(s.status(), MazeSession::MSG_INITIAL);
    }

    #[test]
    fn reset_keeps_maze_solvable() {
        let mut s = MazeSession::with_seed(7, 99).unwrap();
        let before = s.grid().clone();
        let mut changed = false;
        for _ in 0..10 {
            s.reset().unwrap();
            assert_eq!(s.position(), s.start());
            assert_eq!(s.state(), GameState::Playing);
            assert!(s.grid().is_resolved());
            assert!(!s.shortest_path_from_current().is_empty());
            changed |= *s.grid() != before;
        }
        assert!(changed);
    }

    #[test]
    fn apply_path_jumps_to_end() {
        let mut s = session(
            "
. . .
# # .
. . .",
        );
        let path = s.shortest_path_from_current();
        assert_eq!(path.len(), 4);
        assert_eq!(s.apply_path(&path[..2]), MoveOutcome::Moved);
        assert_eq!(s.position(), Point::new(0, 2));

        let rest = s.shortest_path_from_current();
        assert_eq!(rest, path[2..].to_vec());
        assert_eq!(s.apply_path(&rest), MoveOutcome::Won);
        assert_eq!(s.position(), s.exit());
    }

    #[test]
    fn teleport_rejects_walls() {
        let mut s = session(". .\n# .");
        assert_eq!(s.teleport_to(Point::new(1, 0)), MoveOutcome::Invalid);
        assert_eq!(s.teleport_to(Point::new(3, 3)), MoveOutcome::Invalid);
        assert_eq!(s.position(), Point::new(0, 0));
        assert_eq!(s.apply_path(&[]), MoveOutcome::Invalid);
        assert_eq!(s.teleport_to(Point::new(0, 1)), MoveOutcome::Moved);
    }

    #[test]
    fn empty_path_away_from_exit_is_invalid() {
        let mut s = session(". . .\n# # #\n. . .");
        assert_eq!(s.move_player(Direction::Right), MoveOutcome::Moved);
        assert_eq!(s.status(), MazeSession::MSG_MOVED);

        let path = s.shortest_path_from_current();
        assert!(path.is_empty());
        assert_eq!(s.apply_path(&path), MoveOutcome::Invalid);
        assert_eq!(s.status(), MazeSession::MSG_INVALID_MOVE);
        assert_eq!(s.position(), Point::new(0, 1));
    }

    #[test]
    fn seeded_grid_session_resets_reproducibly() {
        let layout = ". . #\n# . .\n. # .";
        let open = |seed| {
            MazeSession::from_grid_with(
                Grid::parse(layout).unwrap(),
                MazeGenerator::new(GeneratorConfig::dual_path()).unwrap(),
                StdRng::seed_from_u64(seed),
            )
            .unwrap()
        };
        let mut a = open(17);
        let mut b = open(17);
        for _ in 0..5 {
            a.reset().unwrap();
            b.reset().unwrap();
            assert_eq!(a.grid(), b.grid());
            assert_eq!(a.config(), &GeneratorConfig::dual_path());
            assert!(!a.shortest_path_from_current().is_empty());
        }
    }

    #[test]
    fn from_grid_validates_layout() {
        assert_eq!(
            MazeSession::from_grid(Grid::parse("# .\n. .").unwrap()).err(),
            Some(MazeError::BlockedEndpoint { row: 0, col: 0 })
        );
        assert_eq!(
            MazeSession::from_grid(Grid::parse(". .\n. #").unwrap()).err(),
            Some(MazeError::BlockedEndpoint { row: 1, col: 1 })
        );
        assert_eq!(
            MazeSession::from_grid(Grid::new(2, 2).unwrap()).err(),
            Some(MazeError::Unresolved { row: 0, col: 0 })
        );
    }

    #[test]
    fn render_text() {
        let mut s = session(
            "
. . #
# . .
. # .",
        );
        assert_eq!(s.to_string(), "P . #\n# . .\n. # E");

        s.move_player(Direction::Right);
        let path = s.shortest_path_from_current();
        assert_eq!(s.render_with_path(&path), "S P #\n# * *\n. # E");
    }
}

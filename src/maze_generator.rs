//! Map generation

use rand::Rng;
use tracing::debug;

use crate::error::{MazeError, Result};
use crate::{Cell, Grid, Point};

/// Tunable parameters of [MazeGenerator]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorConfig {
    /// Number of distinct monotone paths carved from start to exit
    pub carved_paths: usize,
    /// Probability that a cell outside the carved paths becomes a wall
    pub wall_probability: f64,
}

impl GeneratorConfig {
    pub const DEFAULT_WALL_PROBABILITY: f64 = 0.5;
    pub const STRICT_WALL_PROBABILITY: f64 = 0.8;

    /// Sparser mazes: four out of five residual cells are walls
    pub fn strict() -> Self {
        Self {
            wall_probability: Self::STRICT_WALL_PROBABILITY,
            ..Self::default()
        }
    }

    /// Two structurally different solutions
    pub fn dual_path() -> Self {
        Self {
            carved_paths: 2,
            ..Self::default()
        }
    }

    /// Check that the parameters describe a maze that can be generated
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.wall_probability) {
            return Err(MazeError::InvalidWallProbability(self.wall_probability));
        }
        if self.carved_paths == 0 {
            return Err(MazeError::InvalidPathCount);
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            carved_paths: 1,
            wall_probability: Self::DEFAULT_WALL_PROBABILITY,
        }
    }
}

/// Generator of solvable mazes.
///
/// Generation runs in two phases. First, one or more random monotone
/// (down/right only) walks are carved open from the top-left corner to the
/// bottom-right corner, which guarantees a solution. Then every remaining
/// cell is drawn independently to be a wall or open.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MazeGenerator {
    config: GeneratorConfig,
}

impl MazeGenerator {
    /// Redraws of an additional path before giving up on finding a distinct one
    pub const MAX_CARVE_ATTEMPTS: usize = 64;

    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a square `size` x `size` maze
    ///
    /// # Examples
    /// ```
    /// use maze_game::{Cell, MazeGenerator};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let grid = MazeGenerator::default()
    ///     .generate(8, &mut StdRng::seed_from_u64(3))
    ///     .unwrap();
    /// assert_eq!(grid.get(0, 0), Ok(Cell::Open));
    /// assert_eq!(grid.get(7, 7), Ok(Cell::Open));
    /// ```
    pub fn generate<R: Rng + ?Sized>(&self, size: usize, random: &mut R) -> Result<Grid> {
        self.generate_with_shape(size, size, random)
    }

    /// Generate a `height` x `width` maze with start at the top-left corner
    /// and exit at the bottom-right corner.
    pub fn generate_with_shape<R: Rng + ?Sized>(
        &self,
        height: usize,
        width: usize,
        random: &mut R,
    ) -> Result<Grid> {
        let mut grid = Grid::new(height, width)?;

        for path in self.carve_paths(height, width, random) {
            for p in path {
                grid.set(p.row, p.col, Cell::Open)?;
            }
        }
        self.fill_remaining(&mut grid, random)?;

        Ok(grid)
    }

    /// Carve the configured number of pairwise distinct monotone paths.
    ///
    /// A grid with a single row or column has exactly one monotone path, so
    /// only that one is returned. Elsewhere, if a distinct path is not found
    /// within [Self::MAX_CARVE_ATTEMPTS] draws, the paths found so far are
    /// used.
    fn carve_paths<R: Rng + ?Sized>(
        &self,
        height: usize,
        width: usize,
        random: &mut R,
    ) -> Vec<Vec<Point>> {
        let mut paths = vec![Self::carve_path(height, width, random)];
        let unique = height == 1 || width == 1;

        while paths.len() < self.config.carved_paths && !unique {
            let candidate = (0..Self::MAX_CARVE_ATTEMPTS)
                .map(|_| Self::carve_path(height, width, random))
                .find(|path| !paths.contains(path));
            match candidate {
                Some(path) => paths.push(path),
                None => break,
            }
        }
        if paths.len() < self.config.carved_paths {
            debug!(
                requested = self.config.carved_paths,
                carved = paths.len(),
                "could not find more distinct paths"
            );
        }
        debug!(paths = paths.len(), height, width, "carved solution paths");

        paths
    }

    /// Random walk from top-left to bottom-right, stepping down or right.
    ///
    /// Returns every visited point including both corners; the walk always
    /// takes exactly `(height - 1) + (width - 1)` steps.
    fn carve_path<R: Rng + ?Sized>(height: usize, width: usize, random: &mut R) -> Vec<Point> {
        let exit = Point::new(height - 1, width - 1);
        let mut current = Point::new(0, 0);
        let mut path = Vec::with_capacity(height + width - 1);
        path.push(current);

        while current != exit {
            let can_go_down = current.row < exit.row;
            let can_go_right = current.col < exit.col;
            let go_down = match (can_go_down, can_go_right) {
                (true, true) => random.gen_bool(0.5),
                (down, _) => down,
            };
            if go_down {
                current.row += 1;
            } else {
                current.col += 1;
            }
            path.push(current);
        }

        path
    }

    /// Decide every unresolved cell, leaving open cells untouched
    fn fill_remaining<R: Rng + ?Sized>(&self, grid: &mut Grid, random: &mut R) -> Result<()> {
        let unresolved: Vec<Point> = grid
            .points()
            .filter(|p| grid.cell(*p) == Some(Cell::Unresolved))
            .collect();
        let mut walls = 0;
        for p in unresolved {
            let cell = if random.gen_bool(self.config.wall_probability) {
                walls += 1;
                Cell::Wall
            } else {
                Cell::Open
            };
            grid.set(p.row, p.col, cell)?;
        }
        debug!(walls, "filled remaining cells");
        Ok(())
    }
}

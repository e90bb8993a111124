//! Cell storage for the maze

use std::fmt;

use itertools::Itertools;

use crate::error::{MazeError, Result};
use crate::Direction;

/// Location in the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Number of unit steps between two points, ignoring walls
    pub fn manhattan(self, other: Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Point {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// State of a single square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Not yet decided by the generator
    #[default]
    Unresolved,
    Open,
    Wall,
}

/// Row-major rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    const S_WALL: char = '#';
    const S_OPEN: char = '.';
    const S_START: char = 'S';
    const S_EXIT: char = 'E';
    const S_PLAYER: char = 'P';

    /// Allocate a grid with every cell unresolved.
    ///
    /// Returns error, if either dimension is zero.
    pub fn new(height: usize, width: usize) -> Result<Self> {
        Self::filled(height, width, Cell::Unresolved)
    }

    /// Allocate a grid with every cell set to `cell`
    ///
    /// Returns error, if either dimension is zero or the cells do not fit in
    /// memory.
    pub fn filled(height: usize, width: usize, cell: Cell) -> Result<Self> {
        let invalid = MazeError::InvalidSize { height, width };
        let len = match height.checked_mul(width) {
            Some(len) if len > 0 => len,
            _ => return Err(invalid),
        };
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, cell);
        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Parse grid layout from string
    ///
    /// - `text`: One row per line. `#` is a wall; `.`, `S`, `E` and `P` are
    ///   open squares. Whitespace within a row is ignored, so the output of
    ///   [crate::MazeSession]'s `Display` parses back.
    ///
    /// Returns error, if layout contains unknown characters or rows of
    /// different lengths.
    ///
    /// # Examples
    /// ```
    /// use maze_game::{Cell, Grid};
    /// let grid = Grid::parse("
    /// S . #
    /// ## . .
    /// ## # E").unwrap();
    /// assert_eq!(grid.get(0, 2), Ok(Cell::Wall));
    /// assert_eq!(grid.get(2, 2), Ok(Cell::Open));
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<Vec<Cell>> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .enumerate()
                    .map(|(col, c)| match c {
                        Self::S_WALL => Ok(Cell::Wall),
                        Self::S_OPEN | Self::S_START | Self::S_EXIT | Self::S_PLAYER => {
                            Ok(Cell::Open)
                        }
                        ch => Err(MazeError::UnexpectedCharacter { ch, row, col }),
                    })
                    .collect::<Result<Vec<Cell>>>()
            })
            .collect::<Result<_>>()?;

        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != width) {
            return Err(MazeError::RaggedRows {
                row,
                expected: width,
                found: r.len(),
            });
        }
        if height == 0 || width == 0 {
            return Err(MazeError::InvalidSize { height, width });
        }

        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Bottom-right corner
    pub fn last(&self) -> Point {
        Point::new(self.height - 1, self.width - 1)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.height && point.col < self.width
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row < self.height && col < self.width {
            Ok(row * self.width + col)
        } else {
            Err(MazeError::OutOfBounds {
                row,
                col,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Read cell state
    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Write cell state
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Cell at `point`, or `None` if it lies outside the grid
    pub fn cell(&self, point: Point) -> Option<Cell> {
        self.get(point.row, point.col).ok()
    }

    /// Whether the player may stand on `point`
    pub fn is_open(&self, point: Point) -> bool {
        self.cell(point) == Some(Cell::Open)
    }

    /// Adjacent point in `direction`, if it is inside the grid
    pub fn neighbor(&self, point: Point, direction: Direction) -> Option<Point> {
        let (dy, dx) = direction.delta();
        let row = point.row.checked_add_signed(dy)?;
        let col = point.col.checked_add_signed(dx)?;
        let next = Point::new(row, col);
        self.contains(next).then_some(next)
    }

    /// Whether every cell has been decided open or wall
    pub fn is_resolved(&self) -> bool {
        self.first_unresolved().is_none()
    }

    pub fn first_unresolved(&self) -> Option<Point> {
        self.points()
            .find(|p| self.cells[p.row * self.width + p.col] == Cell::Unresolved)
    }

    /// All coordinates in row-major order
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Point::new(row, col)))
    }

    /// Cells row by row
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Linear index of an in-bounds point, for per-cell side tables
    pub(crate) fn offset(&self, point: Point) -> usize {
        point.row * self.width + point.col
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Open => Self::S_OPEN,
                        Cell::Wall => Self::S_WALL,
                        Cell::Unresolved => '?',
                    })
                    .join(" ")
            })
            .join("\n");
        f.write_str(&text)
    }
}

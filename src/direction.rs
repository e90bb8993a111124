//! Movement directions

use std::fmt;
use std::str::FromStr;

use crate::error::MazeError;
use crate::Point;

/// One of the four moves available to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order the path finder expands them
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step as (delta row, delta column)
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction of a single step from `from` to `to`.
    ///
    /// Returns `None` if the points are not 4-adjacent.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let dy = to.row as isize - from.row as isize;
        let dx = to.col as isize - from.col as isize;
        Self::ALL.into_iter().find(|d| d.delta() == (dy, dx))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    /// Parse `up`, `down`, `left` or `right`, ignoring case and surrounding
    /// whitespace.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(MazeError::InvalidDirectionToken(token.to_string())),
        }
    }
}

//! Maze error types

use thiserror::Error;

/// Errors raised by maze construction and grid access.
///
/// Gameplay results such as an illegal move or an unreachable exit are not
/// errors; they are reported through [crate::MoveOutcome] and empty paths.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MazeError {
    /// Maze dimensions must be at least 1x1
    #[error("invalid maze size: {height}x{width}")]
    InvalidSize { height: usize, width: usize },

    /// Grid access outside of its dimensions
    #[error("cell ({row}, {col}) is outside of a {height}x{width} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    /// Direction token other than up, down, left or right
    #[error("unrecognized direction `{0}`")]
    InvalidDirectionToken(String),

    /// Wall probability outside of [0, 1]
    #[error("wall probability must be within [0, 1], got {0}")]
    InvalidWallProbability(f64),

    /// At least one path must be carved
    #[error("number of carved paths must be at least 1")]
    InvalidPathCount,

    /// Grid still contains cells without a state
    #[error("cell ({row}, {col}) is unresolved")]
    Unresolved { row: usize, col: usize },

    /// Start or exit is blocked by a wall
    #[error("start or exit at ({row}, {col}) is a wall")]
    BlockedEndpoint { row: usize, col: usize },

    /// Unknown symbol in a textual maze layout
    #[error("unexpected character `{ch}` at row={row}, col={col}")]
    UnexpectedCharacter { ch: char, row: usize, col: usize },

    /// Textual maze layout rows differ in length
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for maze operations.
pub type Result<T> = std::result::Result<T, MazeError>;

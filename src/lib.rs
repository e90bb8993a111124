//! Walk out of a randomly generated maze
//!
//! Every maze has its start in the top-left corner and its exit in the
//! bottom-right corner, and is guaranteed to have at least one open path
//! between the two.
//!
//! # Examples
//! ## Play a generated maze
//! ```
//! use maze_game::{MazeSession, MoveOutcome, path_finder::path_directions};
//!
//! let mut session = MazeSession::with_seed(10, 2024).unwrap();
//! println!("{session}");
//!
//! let path = session.shortest_path_from_current();
//! assert!(path.len() >= 18);
//!
//! let mut outcome = MoveOutcome::Invalid;
//! for direction in path_directions(session.position(), &path) {
//!     outcome = session.move_player(direction);
//! }
//! assert_eq!(outcome, MoveOutcome::Won);
//! assert!(session.is_won());
//! ```
//!
//! ## Play a fixed layout
//! ```
//! use maze_game::{Grid, MazeSession, MoveOutcome, Point};
//!
//! let layout = "
//! S # . .
//! . . # .
//! ## . . .
//! ## # # E";
//! let mut session = MazeSession::from_grid(Grid::parse(layout).unwrap()).unwrap();
//!
//! assert_eq!(session.move_token("right"), MoveOutcome::Invalid);
//! assert_eq!(session.position(), Point::new(0, 0));
//! assert_eq!(session.move_token("down"), MoveOutcome::Moved);
//! assert_eq!(session.shortest_path_from_current().len(), 5);
//! ```

pub mod direction;
pub mod error;
pub mod grid;
pub mod maze_generator;
pub mod path_finder;
pub mod session;

pub use direction::Direction;
pub use error::{MazeError, Result};
pub use grid::{Cell, Grid, Point};
pub use maze_generator::{GeneratorConfig, MazeGenerator};
pub use path_finder::PathFinder;
pub use session::{GameState, MazeSession, MoveOutcome};

//! Core data structures for sliding-tile puzzles.
//!
//! This crate provides the value types shared by solving, scrambling, and any
//! front end that animates a solution.
//!
//! # Overview
//!
//! - [`board`]: [`BoardState`], an immutable N×N snapshot with the goal test,
//!   the Manhattan-distance heuristic, the parity-based solvability check, and
//!   neighbour generation.
//! - [`position`]: [`Position`] coordinates and the [`Direction`] the empty
//!   cell moves in.
//! - [`cell_set`]: [`CellSet`], a bitset of cell indices used to pin tiles.
//!
//! # Examples
//!
//! ```
//! use slidetile_core::BoardState;
//!
//! let board = BoardState::new(3, vec![1, 2, 3, 4, 5, 6, 0, 7, 8])?;
//! assert!(board.is_solvable());
//! assert_eq!(board.neighbors().len(), 2);
//!
//! let swapped = BoardState::new(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0])?;
//! assert!(!swapped.is_solvable());
//! # Ok::<(), slidetile_core::BoardError>(())
//! ```

pub mod board;
pub mod cell_set;
pub mod position;

pub use self::{
    board::{BoardError, BoardState, EMPTY, MAX_SIZE, ParseBoardError},
    cell_set::CellSet,
    position::{Direction, Position},
};

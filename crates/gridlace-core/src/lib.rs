//! Core data structures for the Gridlace solver.
//!
//! This crate provides the fundamental types shared by the solving and CLI
//! crates:
//!
//! - [`board`]: the `N × N` value grid and its delimited text format
//! - [`digit_set`]: a bitmask-backed set of candidate digits
//! - [`position`]: `(x, y)` cell coordinates
//! - [`region`]: fixed sets of cells under a joint constraint
//! - [`error`]: puzzle input errors
//!
//! # Examples
//!
//! ```
//! use gridlace_core::{Board, DigitSet, Position, Region};
//!
//! let board = Board::from_text("1,0,0,4\n0,0,1,0\n0,1,0,0\n4,0,0,1")?;
//! assert_eq!(board.get(Position::new(3, 0)), 4);
//!
//! let row = Region::row(board.side(), 0);
//! let filled: DigitSet = row
//!     .iter()
//!     .map(|&pos| board.get(pos))
//!     .filter(|&value| value != 0)
//!     .collect();
//! assert_eq!(filled, DigitSet::from_iter([1, 4]));
//! # Ok::<(), gridlace_core::ParseError>(())
//! ```

pub mod board;
pub mod digit_set;
pub mod error;
pub mod position;
pub mod region;

pub use self::{
    board::{Board, Positions},
    digit_set::DigitSet,
    error::ParseError,
    position::Position,
    region::Region,
};

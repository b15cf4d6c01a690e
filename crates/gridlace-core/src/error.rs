//! Puzzle input errors.

use derive_more::{Display, Error};

/// An error produced while parsing a delimited puzzle grid.
///
/// Parsing happens before any solving begins; a `ParseError` is always
/// surfaced to the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseError {
    /// The input contained no grid rows.
    #[display("input contains no rows")]
    Empty,

    /// A row had a different number of cells than the first row.
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// 1-based row number in the input.
        row: usize,
        /// Number of cells found on the row.
        found: usize,
        /// Number of cells the first row established.
        expected: usize,
    },

    /// The side length is not a perfect square (or exceeds the supported
    /// maximum).
    #[display("side length {side} is not a supported perfect square")]
    UnsupportedSide {
        /// Number of rows/columns found.
        side: usize,
    },

    /// A token was neither a number, a blank marker, nor a value letter.
    #[display("unrecognized token {token:?} in row {row}")]
    BadToken {
        /// 1-based row number in the input.
        row: usize,
        /// The offending token.
        token: String,
    },

    /// A cell value exceeded the side length.
    #[display("value {value} exceeds the side length {side}")]
    ValueOutOfRange {
        /// The parsed value.
        value: u8,
        /// The board's side length.
        side: u8,
    },
}

//! The puzzle board and its delimited text format.
//!
//! A [`Board`] stores the committed cell values of an `N × N` puzzle, `N` a
//! perfect square. `0` marks an unknown cell. The text format is one row per
//! line of comma-separated tokens: `0` for blanks, decimal numbers for 1-9,
//! and a single letter (`a` = 10, `b` = 11, …) for larger values. Blank
//! lines and lines starting with `#` are skipped.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::Board;
//!
//! let board = Board::from_text(
//!     "
//!     ## a 4x4 puzzle
//!     1,0,0,4
//!     0,0,1,0
//!     0,1,0,0
//!     4,0,0,1
//!     ",
//! )?;
//! assert_eq!(board.side(), 4);
//! assert_eq!(board.block_size(), 2);
//! # Ok::<(), gridlace_core::ParseError>(())
//! ```

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{DigitSet, ParseError, Position};

/// An `N × N` grid of committed cell values.
///
/// A cell value is `0` (unknown) or `1..=N`. The side length is a perfect
/// square no larger than [`DigitSet::MAX_DIGIT`]; the block size is its
/// square root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    side: u8,
    block: u8,
    cells: Vec<u8>,
}

fn block_of(side: usize) -> Option<u8> {
    (1..=5u8).find(|&b| usize::from(b) * usize::from(b) == side)
}

impl Board {
    /// Creates an empty board of the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `side` is not a supported perfect square.
    #[must_use]
    pub fn empty(side: u8) -> Self {
        let block = block_of(usize::from(side))
            .unwrap_or_else(|| panic!("unsupported side length: {side}"));
        Self {
            side,
            block,
            cells: vec![0; usize::from(side) * usize::from(side)],
        }
    }

    /// Builds a board from rows of cell values.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the rows do not form a supported square
    /// grid or a value exceeds the side length.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, ParseError> {
        if rows.is_empty() {
            return Err(ParseError::Empty);
        }
        let expected = rows[0].len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(ParseError::RaggedRow {
                    row: i + 1,
                    found: row.len(),
                    expected,
                });
            }
        }
        if rows.len() != expected {
            return Err(ParseError::UnsupportedSide { side: rows.len() });
        }
        let side = rows.len();
        let Some(block) = block_of(side) else {
            return Err(ParseError::UnsupportedSide { side });
        };
        #[expect(clippy::cast_possible_truncation)]
        let side = side as u8;
        let cells: Vec<u8> = rows.into_iter().flatten().collect();
        if let Some(&value) = cells.iter().find(|&&v| v > side) {
            return Err(ParseError::ValueOutOfRange { value, side });
        }
        Ok(Self { side, block, cells })
    }

    /// Parses a board from delimited text.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first malformed token, ragged
    /// row, or unsupported grid shape.
    pub fn from_text(input: &str) -> Result<Self, ParseError> {
        let mut rows = Vec::new();
        for (i, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let row = line
                .split(',')
                .map(str::trim)
                .map(|token| parse_token(token, i + 1))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Returns the side length.
    #[must_use]
    pub const fn side(&self) -> u8 {
        self.side
    }

    /// Returns the block size (the square root of the side length).
    #[must_use]
    pub const fn block_size(&self) -> u8 {
        self.block
    }

    fn index(&self, pos: Position) -> usize {
        assert!(pos.x() < self.side && pos.y() < self.side, "{pos} out of bounds");
        usize::from(pos.y()) * usize::from(self.side) + usize::from(pos.x())
    }

    /// Returns the value at a position (`0` = unknown).
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> u8 {
        self.cells[self.index(pos)]
    }

    /// Sets the value at a position.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds or the value exceeds the side
    /// length.
    pub fn set(&mut self, pos: Position, value: u8) {
        assert!(value <= self.side, "value {value} exceeds side {}", self.side);
        let index = self.index(pos);
        self.cells[index] = value;
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    /// Iterates over all positions in row-major order.
    #[must_use]
    pub fn positions(&self) -> Positions {
        Positions {
            side: self.side,
            next: 0,
        }
    }

    /// Formats the board as delimited text, one row per line.
    #[must_use]
    pub fn to_delimited(&self) -> String {
        let mut out = String::new();
        for y in 0..self.side {
            for x in 0..self.side {
                if x > 0 {
                    out.push(',');
                }
                let value = self.get(Position::new(x, y));
                if value >= 10 {
                    out.push(char::from(b'a' + value - 10));
                } else {
                    out.push(char::from(b'0' + value));
                }
            }
            if y + 1 < self.side {
                out.push('\n');
            }
        }
        out
    }
}

#[expect(clippy::cast_possible_truncation)]
fn parse_token(token: &str, row: usize) -> Result<u8, ParseError> {
    let bad = || ParseError::BadToken {
        row,
        token: token.to_owned(),
    };
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            let value = 10 + c.to_ascii_lowercase() as u8 - b'a';
            if value > DigitSet::MAX_DIGIT {
                Err(bad())
            } else {
                Ok(value)
            }
        }
        _ => token.parse().map_err(|_| bad()),
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_delimited())
    }
}

/// Row-major iterator over all positions of a board.
#[derive(Debug, Clone)]
pub struct Positions {
    side: u8,
    next: u16,
}

impl Iterator for Positions {
    type Item = Position;

    #[expect(clippy::cast_possible_truncation)]
    fn next(&mut self) -> Option<Position> {
        let side = u16::from(self.side);
        if self.next >= side * side {
            return None;
        }
        let i = self.next;
        self.next += 1;
        Some(Position::new((i % side) as u8, (i / side) as u8))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let side = usize::from(self.side);
        let remaining = side * side - usize::from(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

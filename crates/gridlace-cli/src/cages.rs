//! Killer-cage file parsing.
//!
//! One cage per line: `TARGET: x,y x,y …`, where `x,y` are zero-based
//! column/row coordinates. Blank lines and lines starting with `#` are
//! skipped.
//!
//! ```text
//! # top-left dominoes
//! 17: 0,0 1,0
//! 10: 2,0 3,0
//! ```

use derive_more::{Display, Error};
use gridlace_core::{Position, Region};

/// An error produced while parsing a cage file.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CageParseError {
    /// A line is missing the `TARGET:` prefix.
    #[display("line {line}: expected `TARGET: x,y x,y ...`")]
    MissingTarget {
        /// 1-based line number.
        line: usize,
    },

    /// The target sum is not a number.
    #[display("line {line}: bad target sum {token:?}")]
    BadTarget {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A cell token is not an `x,y` coordinate pair.
    #[display("line {line}: bad cell {token:?}")]
    BadCell {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },

    /// A cell coordinate lies outside the board.
    #[display("line {line}: cell {cell} is outside the {side}x{side} board")]
    CellOutOfBounds {
        /// 1-based line number.
        line: usize,
        /// The out-of-bounds cell.
        cell: Position,
        /// The board's side length.
        side: u8,
    },

    /// A cage listed no cells.
    #[display("line {line}: cage has no cells")]
    EmptyCage {
        /// 1-based line number.
        line: usize,
    },
}

/// Parses a cage file into `(target, region)` pairs.
///
/// # Errors
///
/// Returns a [`CageParseError`] describing the first malformed line.
pub fn parse(input: &str, side: u8) -> Result<Vec<(u16, Region)>, CageParseError> {
    let mut cages = Vec::new();
    for (i, raw) in input.lines().enumerate() {
        let line = i + 1;
        let raw = raw.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        let Some((target, cells)) = raw.split_once(':') else {
            return Err(CageParseError::MissingTarget { line });
        };
        let target: u16 = target
            .trim()
            .parse()
            .map_err(|_| CageParseError::BadTarget {
                line,
                token: target.trim().to_owned(),
            })?;

        let mut positions = Vec::new();
        for token in cells.split_whitespace() {
            let cell = parse_cell(token).ok_or_else(|| CageParseError::BadCell {
                line,
                token: token.to_owned(),
            })?;
            if cell.x() >= side || cell.y() >= side {
                return Err(CageParseError::CellOutOfBounds { line, cell, side });
            }
            positions.push(cell);
        }
        if positions.is_empty() {
            return Err(CageParseError::EmptyCage { line });
        }
        cages.push((target, Region::from_cells(positions)));
    }
    Ok(cages)
}

fn parse_cell(token: &str) -> Option<Position> {
    let (x, y) = token.split_once(',')?;
    Some(Position::new(x.parse().ok()?, y.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cages() {
        let cages = parse("17: 0,0 1,0\n# comment\n\n10: 2,0 3,0 3,1\n", 9).unwrap();
        assert_eq!(cages.len(), 2);
        assert_eq!(cages[0].0, 17);
        assert_eq!(cages[0].1.cells(), [Position::new(0, 0), Position::new(1, 0)]);
        assert_eq!(cages[1].0, 10);
        assert_eq!(cages[1].1.len(), 3);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("17 0,0 1,0", 9),
            Err(CageParseError::MissingTarget { line: 1 })
        );
        assert!(matches!(
            parse("x: 0,0", 9),
            Err(CageParseError::BadTarget { line: 1, .. })
        ));
        assert!(matches!(
            parse("17: 0;0", 9),
            Err(CageParseError::BadCell { line: 1, .. })
        ));
        assert_eq!(
            parse("17: 9,0", 9),
            Err(CageParseError::CellOutOfBounds {
                line: 1,
                cell: Position::new(9, 0),
                side: 9,
            })
        );
        assert_eq!(parse("17:", 9), Err(CageParseError::EmptyCage { line: 1 }));
    }
}

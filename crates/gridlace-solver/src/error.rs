//! Rule violations reported by the verify probe.

use derive_more::{Display, Error};
use gridlace_core::Position;

/// A consistency violation detected by a rule's `verify`.
///
/// Violations never surface from the main solve path (a contradiction is
/// consumed by the search frame that found it); they are returned by the
/// explicit [`Solver::verify`] probe to name the failing condition.
///
/// [`Solver::verify`]: crate::Solver::verify
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum RuleViolation {
    /// A cell has no remaining candidate digits.
    #[display("cell {position} has no remaining candidates")]
    NoCandidates {
        /// The exhausted cell.
        position: Position,
    },

    /// A digit appears twice among the filled cells of one region.
    #[display("digit {digit} appears at both {first} and {second} in one region")]
    DuplicateInRegion {
        /// The repeated digit.
        digit: u8,
        /// First occurrence in region order.
        first: Position,
        /// Second occurrence in region order.
        second: Position,
    },

    /// Two cells related by an adjacency offset hold the same digit.
    #[display("digit {digit} at {first} repeats at the related cell {second}")]
    AdjacentDuplicate {
        /// The repeated digit.
        digit: u8,
        /// The cell the offset was applied to.
        first: Position,
        /// The related cell.
        second: Position,
    },

    /// A cage sum can no longer be reached by its unfilled cells.
    #[display("cage sum {target} is unreachable ({remaining} left across {cells} cells)")]
    UnreachableSum {
        /// The cage's target sum.
        target: u16,
        /// Sum still to distribute (negative when overshot).
        remaining: i32,
        /// Number of unfilled cells in the cage.
        cells: usize,
    },
}

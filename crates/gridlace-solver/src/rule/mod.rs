//! Solving rules.
//!
//! Each rule owns its region or offset set and implements the [`Rule`]
//! trait over a shared [`GridState`]. Rules never talk to each other; every
//! deduction flows through the state's candidate tensor.

use std::fmt::Debug;

use gridlace_core::Region;

pub use self::{
    adjacency_exclusion::AdjacencyExclusion, cell_uniqueness::CellUniqueness,
    group_uniqueness::GroupUniqueness, sum_region::SumRegion,
};
use crate::{GridState, RuleViolation, ScoreGrid};

mod adjacency_exclusion;
mod cell_uniqueness;
mod group_uniqueness;
mod sum_region;

/// A pluggable constraint over the shared search state.
///
/// Every variant supports four operations. `reduce` and `find_solvable` are
/// the propagation surface; `verify` is the read-only probe; and
/// `restriction_estimate` feeds guess selection. `reduce` is monotone —
/// candidates are only ever removed — so rule execution order affects
/// convergence speed but never the fixed point.
pub trait Rule: Debug {
    /// Returns the name of the rule.
    fn name(&self) -> &'static str;

    /// Returns a boxed clone of the rule.
    fn clone_box(&self) -> BoxedRule;

    /// Removes candidates the rule can exclude; never writes the board.
    ///
    /// `extended` enables the rule's expensive tightening (naked subsets,
    /// exact cage bounds); the engine requests it only when the cheap pass
    /// is stuck. Returns `true` if any candidate was removed.
    fn reduce(&self, state: &mut GridState, extended: bool) -> bool;

    /// Commits cells this rule can prove, returning `true` if any were
    /// committed. Pure-exclusion rules keep the default no-op.
    fn find_solvable(&self, state: &mut GridState) -> bool {
        let _ = state;
        false
    }

    /// Checks the state for violations of this rule, read-only.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] found.
    fn verify(&self, state: &GridState) -> Result<(), RuleViolation>;

    /// Adds desirability weights for (cell, digit) guesses, read-only.
    ///
    /// Rules with no opinion keep the default no-op.
    fn restriction_estimate(&self, state: &GridState, scores: &mut ScoreGrid) {
        let _ = (state, scores);
    }
}

/// A boxed rule.
pub type BoxedRule = Box<dyn Rule>;

impl Clone for BoxedRule {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Returns the classic rule set for a `side × side` board: cell uniqueness
/// plus one strong group-uniqueness rule per row, column, and block.
#[must_use]
pub fn classic_rules(side: u8) -> Vec<BoxedRule> {
    let mut rules: Vec<BoxedRule> = vec![Box::new(CellUniqueness::new())];
    rules.extend(
        Region::all_houses(side)
            .into_iter()
            .map(|house| Box::new(GroupUniqueness::new(house, true)) as BoxedRule),
    );
    rules
}

use gridlace_core::DigitSet;

use crate::{
    GridState, RuleViolation, ScoreGrid,
    rule::{BoxedRule, Rule},
};

const NAME: &str = "cell uniqueness";

/// Guarantees that each cell ultimately holds exactly one digit.
///
/// `reduce` masks every filled cell's candidates down to its committed
/// value, protecting known values from other rules' side effects.
/// `find_solvable` commits any cell with a single remaining candidate (a
/// naked single). `verify` reports the first cell with no candidates left.
#[derive(Debug, Default, Clone, Copy)]
pub struct CellUniqueness {}

impl CellUniqueness {
    /// Creates a new `CellUniqueness` rule.
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl Rule for CellUniqueness {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(*self)
    }

    fn reduce(&self, state: &mut GridState, _extended: bool) -> bool {
        let mut changed = false;
        for pos in state.positions() {
            let value = state.value_at(pos);
            if value != 0 {
                changed |= state.restrict_candidates(pos, DigitSet::from_elem(value));
            }
        }
        changed
    }

    fn find_solvable(&self, state: &mut GridState) -> bool {
        let mut changed = false;
        for pos in state.positions() {
            if state.value_at(pos) != 0 {
                continue;
            }
            if let Some(digit) = state.candidates_at(pos).as_single() {
                state.assign(pos, digit);
                changed = true;
            }
        }
        changed
    }

    fn verify(&self, state: &GridState) -> Result<(), RuleViolation> {
        match state.contradiction() {
            Some(position) => Err(RuleViolation::NoCandidates { position }),
            None => Ok(()),
        }
    }

    fn restriction_estimate(&self, state: &GridState, scores: &mut ScoreGrid) {
        for pos in state.positions() {
            if state.value_at(pos) != 0 {
                continue;
            }
            let candidates = state.candidates_at(pos);
            if candidates.is_empty() {
                continue;
            }
            #[expect(clippy::cast_precision_loss)]
            let weight = 1.0 / candidates.len() as f64;
            for digit in candidates.iter() {
                scores.add(pos, digit, weight);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gridlace_core::{Board, Position};

    use super::*;
    use crate::testing::RuleTester;

    #[test]
    fn test_reduce_masks_filled_cells() {
        RuleTester::from_text("1,0,0,4\n0,0,1,0\n0,1,0,0\n4,0,0,1")
            .reduce_once(&CellUniqueness::new(), false)
            .assert_candidates(Position::new(0, 0), [1])
            .assert_candidates(Position::new(3, 0), [4])
            // unfilled cells keep the full set
            .assert_candidates(Position::new(1, 0), [1, 2, 3, 4]);
    }

    #[test]
    fn test_find_solvable_commits_naked_single() {
        RuleTester::new(Board::empty(4))
            .prepare(|state| {
                let pos = Position::new(2, 1);
                state.restrict_candidates(pos, gridlace_core::DigitSet::from_elem(3));
            })
            .find_solvable_once(&CellUniqueness::new())
            .assert_committed(Position::new(2, 1), 3);
    }

    #[test]
    fn test_find_solvable_ignores_wider_cells() {
        RuleTester::new(Board::empty(4))
            .find_solvable_once(&CellUniqueness::new())
            .assert_not_committed(Position::new(0, 0))
            .assert_no_change(Position::new(3, 3));
    }

    #[test]
    fn test_verify_reports_exhausted_cell() {
        let mut state = crate::GridState::new(Board::empty(4));
        assert!(CellUniqueness::new().verify(&state).is_ok());

        let pos = Position::new(1, 3);
        state.clear_candidates(pos);
        assert_eq!(
            CellUniqueness::new().verify(&state),
            Err(RuleViolation::NoCandidates { position: pos })
        );
    }

    #[test]
    fn test_restriction_favors_forced_cells() {
        let mut state = crate::GridState::new(Board::empty(9));
        let tight = Position::new(0, 0);
        let loose = Position::new(8, 8);
        state.restrict_candidates(tight, gridlace_core::DigitSet::from_iter([4, 5]));

        let mut scores = ScoreGrid::new(9);
        CellUniqueness::new().restriction_estimate(&state, &mut scores);

        assert!(scores.get(tight, 4) > scores.get(loose, 4));
        assert!((scores.get(tight, 4) - 0.5).abs() < f64::EPSILON);
    }
}

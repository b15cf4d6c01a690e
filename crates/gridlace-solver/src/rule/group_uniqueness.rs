use gridlace_core::{DigitSet, Position, Region};
use tinyvec::ArrayVec;

use crate::{
    GridState, RuleViolation,
    rule::{BoxedRule, Rule},
};

const NAME: &str = "group uniqueness";

/// Forbids repeated digits within one region.
///
/// A `strong` region has exactly `side` cells and must therefore contain
/// every digit once — the classic row/column/block constraint. A weak
/// region (a cage) only forbids repeats; it may be smaller than `side` and
/// never forces a digit to appear.
///
/// The basic `reduce` removes every filled cell's digit from the other
/// cells of the region. The extended `reduce` adds naked-subset tightening:
/// when `k` unfilled cells jointly hold exactly `k` distinct candidates,
/// those digits belong to the subset and are excluded from the rest of the
/// region. `find_solvable` (strong regions only) commits hidden singles.
#[derive(Debug, Clone)]
pub struct GroupUniqueness {
    region: Region,
    strong: bool,
}

impl GroupUniqueness {
    /// Creates a rule over a region.
    ///
    /// `strong` regions must contain every digit once; callers pass `true`
    /// only for regions of exactly `side` cells.
    #[must_use]
    pub fn new(region: Region, strong: bool) -> Self {
        Self { region, strong }
    }

    /// Returns the constrained region.
    #[must_use]
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Returns `true` if the region must contain every digit.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.strong
    }

    fn eliminate_filled(&self, state: &mut GridState) -> bool {
        let mut changed = false;
        for &pos in self.region.cells() {
            let value = state.value_at(pos);
            if value == 0 {
                continue;
            }
            for &other in self.region.cells() {
                if other != pos && state.value_at(other) == 0 {
                    changed |= state.remove_candidate(other, value);
                }
            }
        }
        changed
    }

    fn naked_subsets(&self, state: &mut GridState) -> bool {
        let free: Vec<Position> = self
            .region
            .cells()
            .iter()
            .copied()
            .filter(|&pos| state.value_at(pos) == 0)
            .collect();
        // a subset of size k < 2 or k >= free count excludes nothing
        if free.len() < 3 {
            return false;
        }
        let sets: Vec<DigitSet> = free.iter().map(|&pos| state.candidates_at(pos)).collect();
        let mut chosen = ArrayVec::<[usize; 32]>::new();
        subset_search(state, &free, &sets, 0, DigitSet::EMPTY, &mut chosen)
    }

    fn hidden_singles(&self, state: &mut GridState) -> bool {
        let mut placed = DigitSet::EMPTY;
        for &pos in self.region.cells() {
            let value = state.value_at(pos);
            if value != 0 {
                placed.insert(value);
            }
        }

        let mut changed = false;
        for digit in 1..=state.side() {
            if placed.contains(digit) {
                continue;
            }
            let mut sole = None;
            let mut count = 0;
            for &pos in self.region.cells() {
                if state.value_at(pos) == 0 && state.candidates_at(pos).contains(digit) {
                    sole = Some(pos);
                    count += 1;
                }
            }
            if count == 1
                && let Some(pos) = sole
            {
                state.assign(pos, digit);
                changed = true;
            }
        }
        changed
    }

    pub(crate) fn verify_distinct(&self, state: &GridState) -> Result<(), RuleViolation> {
        let mut seen: [Option<Position>; 26] = [None; 26];
        for &pos in self.region.cells() {
            let value = state.value_at(pos);
            if value == 0 {
                continue;
            }
            if let Some(first) = seen[usize::from(value)] {
                return Err(RuleViolation::DuplicateInRegion {
                    digit: value,
                    first,
                    second: pos,
                });
            }
            seen[usize::from(value)] = Some(pos);
        }
        Ok(())
    }
}

/// Depth-first enumeration of cell subsets, pruned once the running
/// candidate union can no longer equal any admissible subset size.
fn subset_search(
    state: &mut GridState,
    free: &[Position],
    sets: &[DigitSet],
    start: usize,
    union: DigitSet,
    chosen: &mut ArrayVec<[usize; 32]>,
) -> bool {
    let mut changed = false;
    for i in start..free.len() {
        let union = union | sets[i];
        if union.len() >= free.len() {
            continue;
        }
        chosen.push(i);
        if chosen.len() >= 2 && union.len() == chosen.len() {
            for (j, &other) in free.iter().enumerate() {
                if !chosen.contains(&j) {
                    for digit in union.iter() {
                        changed |= state.remove_candidate(other, digit);
                    }
                }
            }
        }
        changed |= subset_search(state, free, sets, i + 1, union, chosen);
        chosen.pop();
    }
    changed
}

impl Rule for GroupUniqueness {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(self.clone())
    }

    fn reduce(&self, state: &mut GridState, extended: bool) -> bool {
        let mut changed = self.eliminate_filled(state);
        if extended {
            changed |= self.naked_subsets(state);
        }
        changed
    }

    fn find_solvable(&self, state: &mut GridState) -> bool {
        if self.strong {
            self.hidden_singles(state)
        } else {
            false
        }
    }

    fn verify(&self, state: &GridState) -> Result<(), RuleViolation> {
        self.verify_distinct(state)
    }
}

#[cfg(test)]
mod tests {
    use gridlace_core::Board;

    use super::*;
    use crate::testing::RuleTester;

    fn row_rule(side: u8, y: u8) -> GroupUniqueness {
        GroupUniqueness::new(Region::row(side, y), true)
    }

    #[test]
    fn test_basic_elimination_in_row() {
        RuleTester::from_text("1,0,0,4\n0,0,0,0\n0,0,0,0\n0,0,0,0")
            .reduce_once(&row_rule(4, 0), false)
            .assert_candidates(Position::new(1, 0), [2, 3])
            .assert_candidates(Position::new(2, 0), [2, 3])
            // other rows are untouched
            .assert_no_change(Position::new(1, 1));
    }

    #[test]
    fn test_hidden_single_in_row() {
        RuleTester::new(Board::empty(9))
            .prepare(|state| {
                // digit 5 is impossible everywhere in row 2 except (3, 2)
                for x in 0..9 {
                    if x != 3 {
                        state.remove_candidate(Position::new(x, 2), 5);
                    }
                }
            })
            .find_solvable_once(&row_rule(9, 2))
            .assert_committed(Position::new(3, 2), 5);
    }

    #[test]
    fn test_hidden_single_skips_placed_digits() {
        RuleTester::from_text(
            "
            5,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            0,0,0,0,0,0,0,0,0
            ",
        )
        .reduce_once(&row_rule(9, 0), false)
        .find_solvable_once(&row_rule(9, 0))
        // 5 is already in the row; nothing else is forced
        .assert_not_committed(Position::new(1, 0));
    }

    #[test]
    fn test_weak_region_never_commits() {
        let cage = GroupUniqueness::new(
            Region::from_cells(vec![Position::new(0, 0), Position::new(1, 0)]),
            false,
        );
        RuleTester::new(Board::empty(9))
            .prepare(|state| {
                // digit 7 fits only at (0, 0) within the cage; a strong
                // region would commit it
                state.restrict_candidates(Position::new(1, 0), DigitSet::from_iter([1, 2]));
            })
            .find_solvable_once(&cage)
            .assert_not_committed(Position::new(0, 0));
    }

    #[test]
    fn test_naked_pair_excludes_digits() {
        RuleTester::new(Board::empty(9))
            .prepare(|state| {
                // (0, 0) and (4, 0) form a naked {1, 2} pair in row 0
                state.restrict_candidates(Position::new(0, 0), DigitSet::from_iter([1, 2]));
                state.restrict_candidates(Position::new(4, 0), DigitSet::from_iter([1, 2]));
            })
            .reduce_once(&row_rule(9, 0), true)
            .assert_removed(Position::new(1, 0), [1, 2])
            .assert_removed(Position::new(8, 0), [1, 2])
            // the pair cells themselves keep their candidates
            .assert_candidates(Position::new(0, 0), [1, 2])
            .assert_candidates(Position::new(4, 0), [1, 2]);
    }

    #[test]
    fn test_naked_triple_with_partial_sets() {
        RuleTester::new(Board::empty(9))
            .prepare(|state| {
                // {1,2}, {2,3}, {1,3} across three cells form a naked triple
                state.restrict_candidates(Position::new(0, 0), DigitSet::from_iter([1, 2]));
                state.restrict_candidates(Position::new(1, 0), DigitSet::from_iter([2, 3]));
                state.restrict_candidates(Position::new(2, 0), DigitSet::from_iter([1, 3]));
            })
            .reduce_once(&row_rule(9, 0), true)
            .assert_removed(Position::new(3, 0), [1, 2, 3])
            .assert_candidates(Position::new(0, 0), [1, 2]);
    }

    #[test]
    fn test_basic_reduce_skips_subsets() {
        RuleTester::new(Board::empty(9))
            .prepare(|state| {
                state.restrict_candidates(Position::new(0, 0), DigitSet::from_iter([1, 2]));
                state.restrict_candidates(Position::new(4, 0), DigitSet::from_iter([1, 2]));
            })
            .reduce_once(&row_rule(9, 0), false)
            .assert_no_change(Position::new(1, 0));
    }

    #[test]
    fn test_verify_reports_duplicate() {
        let rule = row_rule(4, 1);
        let state = crate::GridState::new(
            Board::from_text("0,0,0,0\n3,0,3,0\n0,0,0,0\n0,0,0,0").unwrap(),
        );
        assert_eq!(
            rule.verify(&state),
            Err(RuleViolation::DuplicateInRegion {
                digit: 3,
                first: Position::new(0, 1),
                second: Position::new(2, 1),
            })
        );
    }

    #[test]
    fn test_verify_accepts_distinct_fill() {
        let rule = row_rule(4, 0);
        let state =
            crate::GridState::new(Board::from_text("1,2,3,4\n0,0,0,0\n0,0,0,0\n0,0,0,0").unwrap());
        assert!(rule.verify(&state).is_ok());
    }
}

use std::sync::Arc;

use gridlace_core::{DigitSet, Position, Region};

use crate::{
    CageCombinatorics, GridState, RuleViolation, ScoreGrid,
    rule::{BoxedRule, GroupUniqueness, Rule},
};

const NAME: &str = "sum region";

/// A killer cage: distinct digits summing to a fixed target.
///
/// Built on a weak [`GroupUniqueness`] (repeats are forbidden but the cage
/// need not contain every digit), plus a sum window over the unfilled
/// cells. The cheap window uses each cell's smallest and largest remaining
/// candidate; the extended window is exact, from an exhaustive
/// distinct-assignment search over the current candidate sets. When the
/// remaining sum falls outside the window the cage is provably unsolvable
/// and every unfilled cell is cleared, failing the branch upstream.
/// Otherwise each unfilled cell is intersected with the digits the shared
/// [`CageCombinatorics`] table proves participable.
#[derive(Debug, Clone)]
pub struct SumRegion {
    distinct: GroupUniqueness,
    target: u16,
    combinatorics: Arc<CageCombinatorics>,
}

impl SumRegion {
    /// Creates a cage over a region with a target sum.
    ///
    /// The combinatorics table is shared across all cages of a solve.
    #[must_use]
    pub fn new(region: Region, target: u16, combinatorics: Arc<CageCombinatorics>) -> Self {
        Self {
            distinct: GroupUniqueness::new(region, false),
            target,
            combinatorics,
        }
    }

    /// Returns the cage's region.
    #[must_use]
    pub fn region(&self) -> &Region {
        self.distinct.region()
    }

    /// Returns the cage's target sum.
    #[must_use]
    pub fn target(&self) -> u16 {
        self.target
    }

    /// Splits the cage into its unfilled cells (with candidates) and the
    /// sum of its filled cells.
    fn free_cells(&self, state: &GridState) -> (Vec<(Position, DigitSet)>, u16) {
        let mut free = Vec::new();
        let mut filled_sum = 0;
        for &pos in self.region().cells() {
            let value = state.value_at(pos);
            if value == 0 {
                free.push((pos, state.candidates_at(pos)));
            } else {
                filled_sum += u16::from(value);
            }
        }
        (free, filled_sum)
    }

    /// Sum window ignoring distinctness: each cell contributes its
    /// smallest/largest remaining candidate. `None` if a cell is exhausted.
    fn cheap_bounds(free: &[(Position, DigitSet)]) -> Option<(u16, u16)> {
        let mut min_sum = 0;
        let mut max_sum = 0;
        for &(_, candidates) in free {
            min_sum += u16::from(candidates.min()?);
            max_sum += u16::from(candidates.max()?);
        }
        Some((min_sum, max_sum))
    }

    /// Exact sum window over distinct assignments drawn from the current
    /// candidate sets. `None` if no distinct assignment exists at all.
    fn exact_bounds(free: &[(Position, DigitSet)]) -> Option<(u16, u16)> {
        fn assignments(
            free: &[(Position, DigitSet)],
            index: usize,
            used: DigitSet,
            sum: u16,
            window: &mut Option<(u16, u16)>,
        ) {
            if index == free.len() {
                *window = match *window {
                    None => Some((sum, sum)),
                    Some((lo, hi)) => Some((lo.min(sum), hi.max(sum))),
                };
                return;
            }
            for digit in free[index].1.difference(used).iter() {
                assignments(
                    free,
                    index + 1,
                    used.union(DigitSet::from_elem(digit)),
                    sum + u16::from(digit),
                    window,
                );
            }
        }

        let mut window = None;
        assignments(free, 0, DigitSet::EMPTY, 0, &mut window);
        window
    }

    fn clear_free(state: &mut GridState, free: &[(Position, DigitSet)]) -> bool {
        let mut changed = false;
        for &(pos, _) in free {
            changed |= state.clear_candidates(pos);
        }
        changed
    }
}

impl Rule for SumRegion {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(self.clone())
    }

    fn reduce(&self, state: &mut GridState, extended: bool) -> bool {
        let mut changed = self.distinct.reduce(state, extended);

        let (free, filled_sum) = self.free_cells(state);
        if free.is_empty() {
            return changed;
        }
        if filled_sum > self.target {
            return changed | Self::clear_free(state, &free);
        }
        let remaining = self.target - filled_sum;

        let bounds = if extended {
            Self::exact_bounds(&free)
        } else {
            Self::cheap_bounds(&free)
        };
        let Some((min_sum, max_sum)) = bounds else {
            // a cell is already exhausted (cheap) or no distinct assignment
            // is left (exact); either way the cage cannot be completed
            return changed | Self::clear_free(state, &free);
        };
        if remaining < min_sum || remaining > max_sum {
            return changed | Self::clear_free(state, &free);
        }

        #[expect(clippy::cast_possible_truncation)]
        let allowed = self
            .combinatorics
            .possible_digits(free.len() as u8, remaining);
        for &(pos, _) in &free {
            changed |= state.restrict_candidates(pos, allowed);
        }
        changed
    }

    fn verify(&self, state: &GridState) -> Result<(), RuleViolation> {
        self.distinct.verify_distinct(state)?;

        let (free, filled_sum) = self.free_cells(state);
        let remaining = i32::from(self.target) - i32::from(filled_sum);
        let unreachable = RuleViolation::UnreachableSum {
            target: self.target,
            remaining,
            cells: free.len(),
        };
        if free.is_empty() {
            return if remaining == 0 { Ok(()) } else { Err(unreachable) };
        }
        if filled_sum > self.target {
            return Err(unreachable);
        }
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let participable = self
            .combinatorics
            .possible_digits(free.len() as u8, remaining as u16);
        if participable.is_empty() {
            return Err(unreachable);
        }
        // every open cell must still be able to contribute to the sum
        if free
            .iter()
            .any(|&(_, candidates)| candidates.intersection(participable).is_empty())
        {
            return Err(unreachable);
        }
        Ok(())
    }

    fn restriction_estimate(&self, state: &GridState, scores: &mut ScoreGrid) {
        let (free, filled_sum) = self.free_cells(state);
        if free.is_empty() || filled_sum > self.target {
            return;
        }
        let remaining = self.target - filled_sum;
        let Some((min_sum, max_sum)) = Self::cheap_bounds(&free) else {
            return;
        };
        // the closer the remaining sum sits to either bound, the fewer
        // assignments the cage admits
        let margin = remaining
            .saturating_sub(min_sum)
            .min(max_sum.saturating_sub(remaining));
        let tightness = 1.0 / (1.0 + f64::from(margin));

        for (i, &(pos, candidates)) in free.iter().enumerate() {
            let mut others_min = 0u16;
            let mut others_max = 0u16;
            for (j, &(_, other)) in free.iter().enumerate() {
                if i == j {
                    continue;
                }
                let (Some(min), Some(max)) = (other.min(), other.max()) else {
                    return;
                };
                others_min += u16::from(min);
                others_max += u16::from(max);
            }
            // window of values this cell can take while the rest of the
            // cage stays within its own bounds
            let low = remaining.saturating_sub(others_max);
            let Some(high) = remaining.checked_sub(others_min) else {
                continue;
            };
            if low > high {
                continue;
            }
            for digit in candidates.iter() {
                let value = u16::from(digit);
                let weight = if value < low {
                    -f64::from(low - value) * tightness
                } else if value > high {
                    -f64::from(value - high) * tightness
                } else {
                    tightness
                };
                scores.add(pos, digit, weight);
            }
        }
    }
}

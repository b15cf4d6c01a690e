//! Fixed-point propagation across the rule set.

use log::{debug, trace};

use crate::{GridState, rule::BoxedRule};

/// The terminal condition of a propagation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    /// Every cell is filled.
    Complete,
    /// No rule can change anything (a fixed point short of completion).
    Stuck,
    /// A cell ran out of candidates; the branch is dead.
    Contradiction,
}

/// Drives every rule to a fixed point over one state.
///
/// One round runs the cheap `reduce` across all rules, falls back to the
/// extended `reduce` only when the cheap pass changed nothing, then runs
/// `find_solvable` across all rules. Rounds repeat until the board is
/// complete, a cell runs out of candidates, or a whole round changes
/// nothing. Since every `reduce` is monotone, rule order affects how fast
/// the fixed point is reached but never which fixed point it is.
#[derive(Debug, Clone, Copy)]
pub struct PropagationEngine<'a> {
    rules: &'a [BoxedRule],
}

impl<'a> PropagationEngine<'a> {
    /// Creates an engine over a rule list.
    #[must_use]
    pub fn new(rules: &'a [BoxedRule]) -> Self {
        Self { rules }
    }

    /// Runs rounds until a terminal condition is reached.
    pub fn run(&self, state: &mut GridState) -> Propagation {
        loop {
            let mut changed = false;
            for rule in self.rules {
                if rule.reduce(state, false) {
                    trace!("{} reduced candidates", rule.name());
                    changed = true;
                }
            }
            if !changed {
                for rule in self.rules {
                    if rule.reduce(state, true) {
                        trace!("{} reduced candidates (extended)", rule.name());
                        changed = true;
                    }
                }
            }
            if let Some(pos) = state.contradiction() {
                debug!("contradiction: cell {pos} has no candidates");
                return Propagation::Contradiction;
            }
            for rule in self.rules {
                if rule.find_solvable(state) {
                    trace!("{} committed cells", rule.name());
                    changed = true;
                }
            }

            if let Some(pos) = state.contradiction() {
                debug!("contradiction: cell {pos} has no candidates");
                return Propagation::Contradiction;
            }
            if state.is_complete() {
                debug!("propagation completed the board");
                return Propagation::Complete;
            }
            if !changed {
                return Propagation::Stuck;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use gridlace_core::{Board, Position};

    use super::*;
    use crate::rule::classic_rules;

    #[test]
    fn test_solves_singles_only_board() {
        // A 4x4 with enough givens resolves by propagation alone.
        let board = Board::from_text("1,0,3,0\n0,0,0,2\n0,1,0,3\n3,0,2,0").unwrap();
        let rules = classic_rules(4);
        let mut state = GridState::new(board);

        assert_eq!(PropagationEngine::new(&rules).run(&mut state), Propagation::Complete);
        let solved = state.into_board();
        assert_eq!(
            solved,
            Board::from_text("1,2,3,4\n4,3,1,2\n2,1,4,3\n3,4,2,1").unwrap()
        );
    }

    #[test]
    fn test_reports_contradiction() {
        let rules = classic_rules(4);
        let mut state = GridState::new(Board::empty(4));
        state.clear_candidates(Position::new(2, 2));

        assert_eq!(
            PropagationEngine::new(&rules).run(&mut state),
            Propagation::Contradiction
        );
    }

    #[test]
    fn test_stuck_round_is_idempotent() {
        // Re-running propagation on an already-stuck state changes nothing.
        let board = Board::from_text(
            "
            5,3,0,0,7,0,0,0,0
            6,0,0,1,9,5,0,0,0
            0,9,8,0,0,0,0,6,0
            8,0,0,0,6,0,0,0,3
            4,0,0,8,0,3,0,0,1
            7,0,0,0,2,0,0,0,6
            0,6,0,0,0,0,2,8,0
            0,0,0,4,1,9,0,0,5
            0,0,0,0,8,0,0,7,9
            ",
        )
        .unwrap();
        // only a partial rule set, so this puzzle cannot finish without
        // guessing
        let rules = classic_rules(9).into_iter().take(10).collect::<Vec<_>>();
        let mut state = GridState::new(board);

        let first = PropagationEngine::new(&rules).run(&mut state);
        let snapshot = state.clone();
        let second = PropagationEngine::new(&rules).run(&mut state);

        assert_eq!(first, Propagation::Stuck);
        assert_eq!(second, Propagation::Stuck);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_empty_board_is_stuck() {
        let rules = classic_rules(9);
        let mut state = GridState::new(Board::empty(9));
        assert_eq!(PropagationEngine::new(&rules).run(&mut state), Propagation::Stuck);
    }
}

//! Depth-first backtracking search with propagation as pruning.

use std::fmt;

use derive_more::IsVariant;
use gridlace_core::{Board, Position};
use log::debug;

use crate::{
    GridState, GuessSelector, Propagation, PropagationEngine, RuleViolation, rule::BoxedRule,
};

/// The result of a solve: a solved board or an explicit "no solution".
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Outcome {
    /// The puzzle was solved; the board satisfies every rule.
    Solved(Board),
    /// The search space was exhausted without a solution.
    NoSolution,
}

/// Counters collected during one solve.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SolveStats {
    guesses: usize,
    propagations: usize,
}

impl SolveStats {
    /// Returns the number of guesses tried across all branches.
    #[must_use]
    pub fn guesses(&self) -> usize {
        self.guesses
    }

    /// Returns the number of propagation runs across all branches.
    #[must_use]
    pub fn propagations(&self) -> usize {
        self.propagations
    }
}

/// Observation hook: `(board, changed_cell, is_guess)`, fired after each
/// committed cell.
pub type Observer = Box<dyn FnMut(&Board, Position, bool)>;

/// Result of one recursive search frame.
enum Search {
    Solved(GridState),
    Failed,
}

/// Exhaustive depth-first solver over a fixed rule list.
///
/// Each frame propagates to a fixed point, then either terminates
/// (complete or contradicted) or asks the [`GuessSelector`] for a branch.
/// A failed child eliminates its guessed digit in the parent only — the
/// child state is discarded, and an eliminated guess is never retried in
/// that branch.
///
/// # Examples
///
/// ```
/// use gridlace_core::Board;
/// use gridlace_solver::{Outcome, Solver};
///
/// let board = Board::from_text("1,0,3,0\n0,0,0,2\n0,1,0,3\n3,0,2,0")?;
/// let mut solver = Solver::classic(board.side());
/// let (outcome, stats) = solver.solve(&board);
/// assert!(outcome.is_solved());
/// assert_eq!(stats.guesses(), 0);
/// # Ok::<(), gridlace_core::ParseError>(())
/// ```
pub struct Solver {
    rules: Vec<BoxedRule>,
    seed: u64,
    observer: Option<Observer>,
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("rules", &self.rules)
            .field("seed", &self.seed)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl Solver {
    /// Creates a solver over the given rule list.
    #[must_use]
    pub fn new(rules: Vec<BoxedRule>) -> Self {
        Self {
            rules,
            seed: 0,
            observer: None,
        }
    }

    /// Creates a solver with the classic rule set for a `side × side` board.
    #[must_use]
    pub fn classic(side: u8) -> Self {
        Self::new(crate::rule::classic_rules(side))
    }

    /// Adds a rule to the set.
    #[must_use]
    pub fn with_rule(mut self, rule: BoxedRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the guess tie-break seed.
    ///
    /// Uniquely solvable puzzles return the same grid for every seed; for
    /// multi-solution puzzles the seed may pick a different valid solution.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Installs an observation hook, fired synchronously after each
    /// committed cell (`is_guess = false`) or applied guess (`true`).
    ///
    /// The hook is purely additive: its presence never changes the solving
    /// outcome.
    #[must_use]
    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&Board, Position, bool) + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Returns the configured rules.
    #[must_use]
    pub fn rules(&self) -> &[BoxedRule] {
        &self.rules
    }

    /// Checks a board against every rule without solving.
    ///
    /// This is the diagnostic probe: unlike [`solve`](Self::solve), it names
    /// the violated condition.
    ///
    /// # Errors
    ///
    /// Returns the first [`RuleViolation`] any rule reports.
    pub fn verify(&self, board: &Board) -> Result<(), RuleViolation> {
        self.verify_state(&GridState::new(board.clone()))
    }

    fn verify_state(&self, state: &GridState) -> Result<(), RuleViolation> {
        self.rules.iter().try_for_each(|rule| rule.verify(state))
    }

    /// Solves a board, returning the outcome and search counters.
    ///
    /// A given board that already violates a rule is rejected before the
    /// first propagation round, with zero guesses.
    pub fn solve(&mut self, board: &Board) -> (Outcome, SolveStats) {
        let mut stats = SolveStats::default();
        let mut state = GridState::new(board.clone());

        if let Err(violation) = self.verify_state(&state) {
            debug!("rejecting given board: {violation}");
            return (Outcome::NoSolution, stats);
        }

        let mut selector = GuessSelector::new(self.seed);
        match self.search(&mut state, &mut selector, &mut stats) {
            Search::Solved(solved) => (Outcome::Solved(solved.into_board()), stats),
            Search::Failed => (Outcome::NoSolution, stats),
        }
    }

    fn search(
        &mut self,
        state: &mut GridState,
        selector: &mut GuessSelector,
        stats: &mut SolveStats,
    ) -> Search {
        loop {
            stats.propagations += 1;
            let outcome = PropagationEngine::new(&self.rules).run(state);
            self.notify(state, false);
            match outcome {
                Propagation::Contradiction => return Search::Failed,
                Propagation::Complete => {
                    return if self.verify_state(state).is_ok() {
                        Search::Solved(state.clone())
                    } else {
                        Search::Failed
                    };
                }
                Propagation::Stuck => {}
            }

            let Some((pos, digit)) = selector.select(state, &self.rules) else {
                debug_assert!(false, "stuck state with no guessable cell");
                return Search::Failed;
            };
            stats.guesses += 1;
            debug!("guess #{}: {digit} at {pos}", stats.guesses);

            let mut child = state.clone();
            child.assign(pos, digit);
            self.notify(&mut child, true);
            if let Search::Solved(solved) = self.search(&mut child, selector, stats) {
                return Search::Solved(solved);
            }

            // the guess is dead in this branch; eliminate it in the parent
            // and re-propagate
            state.remove_candidate(pos, digit);
            if state.candidates_at(pos).is_empty() {
                return Search::Failed;
            }
        }
    }

    fn notify(&mut self, state: &mut GridState, is_guess: bool) {
        let changes = state.take_changes();
        if let Some(observer) = &mut self.observer {
            for pos in changes {
                observer(state.board(), pos, is_guess);
            }
        }
    }
}

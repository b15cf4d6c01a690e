//! Test utilities for rule implementations.
//!
//! [`RuleTester`] tracks the initial and current state of a board, letting
//! tests apply a rule operation and assert the changes it produced.
//!
//! # Example
//!
//! ```ignore
//! RuleTester::from_text("1,0,0,4\n0,0,1,0\n0,1,0,0\n4,0,0,1")
//!     .reduce_once(&CellUniqueness::new(), false)
//!     .assert_candidates(Position::new(0, 0), [1]);
//! ```

use gridlace_core::{Board, DigitSet, Position};

use crate::{GridState, rule::Rule};

/// A fluent harness for rule tests.
///
/// All assertion methods return `self` for chaining and panic with a
/// located message on failure.
#[derive(Debug)]
pub struct RuleTester {
    initial: GridState,
    current: GridState,
}

impl RuleTester {
    /// Creates a tester over a board with a fresh tensor.
    pub fn new(board: Board) -> Self {
        let initial = GridState::new(board);
        let current = initial.clone();
        Self { initial, current }
    }

    /// Creates a tester from delimited grid text.
    ///
    /// # Panics
    ///
    /// Panics if the text is not a valid grid.
    #[track_caller]
    pub fn from_text(text: &str) -> Self {
        Self::new(Board::from_text(text).unwrap())
    }

    /// Applies a setup closure to both the initial snapshot and the current
    /// state, so `assert_removed`/`assert_no_change` compare against the
    /// prepared tensor.
    pub fn prepare(mut self, setup: impl Fn(&mut GridState)) -> Self {
        setup(&mut self.initial);
        setup(&mut self.current);
        self.initial.take_changes();
        self.current.take_changes();
        self
    }

    /// Runs `reduce` once.
    pub fn reduce_once(mut self, rule: &dyn Rule, extended: bool) -> Self {
        rule.reduce(&mut self.current, extended);
        self
    }

    /// Runs `reduce` until it stops changing anything.
    pub fn reduce_until_stuck(mut self, rule: &dyn Rule, extended: bool) -> Self {
        while rule.reduce(&mut self.current, extended) {}
        self
    }

    /// Runs `find_solvable` once.
    pub fn find_solvable_once(mut self, rule: &dyn Rule) -> Self {
        rule.find_solvable(&mut self.current);
        self
    }

    /// Returns the current state.
    #[expect(dead_code)]
    pub fn state(&self) -> &GridState {
        &self.current
    }

    /// Asserts that the cell was committed to `digit`.
    #[track_caller]
    pub fn assert_committed(self, pos: Position, digit: u8) -> Self {
        assert_eq!(
            self.current.value_at(pos),
            digit,
            "expected {pos} to be committed to {digit}"
        );
        self
    }

    /// Asserts that the cell is still unfilled.
    #[track_caller]
    pub fn assert_not_committed(self, pos: Position) -> Self {
        assert_eq!(
            self.current.value_at(pos),
            0,
            "expected {pos} to stay unfilled"
        );
        self
    }

    /// Asserts the cell's exact candidate set.
    #[track_caller]
    pub fn assert_candidates(self, pos: Position, digits: impl IntoIterator<Item = u8>) -> Self {
        let expected = DigitSet::from_iter(digits);
        assert_eq!(
            self.current.candidates_at(pos),
            expected,
            "candidates at {pos}"
        );
        self
    }

    /// Asserts that each digit was a candidate before and is gone now.
    #[track_caller]
    pub fn assert_removed(self, pos: Position, digits: impl IntoIterator<Item = u8>) -> Self {
        let before = self.initial.candidates_at(pos);
        let after = self.current.candidates_at(pos);
        for digit in digits {
            assert!(
                before.contains(digit),
                "digit {digit} was not a candidate at {pos} to begin with"
            );
            assert!(
                !after.contains(digit),
                "digit {digit} at {pos} should have been removed"
            );
        }
        self
    }

    /// Asserts that neither the value nor the candidates of a cell changed.
    #[track_caller]
    pub fn assert_no_change(self, pos: Position) -> Self {
        assert_eq!(
            self.initial.value_at(pos),
            self.current.value_at(pos),
            "value at {pos} changed"
        );
        assert_eq!(
            self.initial.candidates_at(pos),
            self.current.candidates_at(pos),
            "candidates at {pos} changed"
        );
        self
    }
}

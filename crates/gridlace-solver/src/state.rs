//! Search state: the board plus its possibility tensor.

use gridlace_core::{Board, DigitSet, Position, Positions};

/// The mutable state of one search branch.
///
/// A `GridState` owns the committed board values and the per-cell candidate
/// sets (the possibility tensor). One value is created per top-level solve;
/// propagation mutates it in place, and the search clones it exactly once
/// per guess so that sibling branches never alias.
///
/// While a branch has not failed, every cell keeps at least one candidate;
/// a filled cell converges to the singleton of its value. The first cell
/// whose set becomes empty is reported by [`contradiction`].
///
/// [`contradiction`]: GridState::contradiction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    board: Board,
    candidates: Vec<DigitSet>,
    journal: Vec<Position>,
}

impl GridState {
    /// Creates a state over the given board with an all-true tensor.
    ///
    /// The tensor starts with every digit conceivable everywhere, including
    /// at filled cells; the first propagation round masks filled cells down
    /// to their singletons.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let side = board.side();
        let cells = usize::from(side) * usize::from(side);
        Self {
            board,
            candidates: vec![DigitSet::full(side); cells],
            journal: Vec::new(),
        }
    }

    fn index(&self, pos: Position) -> usize {
        let side = self.board.side();
        assert!(pos.x() < side && pos.y() < side, "{pos} out of bounds");
        usize::from(pos.y()) * usize::from(side) + usize::from(pos.x())
    }

    /// Returns the board's side length.
    #[must_use]
    pub fn side(&self) -> u8 {
        self.board.side()
    }

    /// Returns the committed board values.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the state and returns the board.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Iterates over all positions in row-major order.
    #[must_use]
    pub fn positions(&self) -> Positions {
        self.board.positions()
    }

    /// Returns the committed value at a position (`0` = unknown).
    #[must_use]
    pub fn value_at(&self, pos: Position) -> u8 {
        self.board.get(pos)
    }

    /// Returns `true` if every cell is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.board.is_complete()
    }

    /// Returns the candidate set at a position.
    #[must_use]
    pub fn candidates_at(&self, pos: Position) -> DigitSet {
        self.candidates[self.index(pos)]
    }

    /// Removes a candidate digit, returning `true` if it was present.
    pub fn remove_candidate(&mut self, pos: Position, digit: u8) -> bool {
        let index = self.index(pos);
        self.candidates[index].remove(digit)
    }

    /// Intersects a cell's candidates with `allowed`, returning `true` if
    /// anything was removed.
    pub fn restrict_candidates(&mut self, pos: Position, allowed: DigitSet) -> bool {
        let index = self.index(pos);
        let before = self.candidates[index];
        self.candidates[index] &= allowed;
        self.candidates[index] != before
    }

    /// Clears a cell's candidates, returning `true` if any were present.
    ///
    /// Used by rules that prove a region unsolvable; the next contradiction
    /// check fails the branch.
    pub fn clear_candidates(&mut self, pos: Position) -> bool {
        self.restrict_candidates(pos, DigitSet::EMPTY)
    }

    /// Commits a value to an unfilled cell.
    ///
    /// This is the only way a value enters the board: either a rule's
    /// `find_solvable` derived it or the search guessed it. The cell's
    /// candidates collapse to the singleton and the change is recorded for
    /// the observation hook.
    ///
    /// # Panics
    ///
    /// Panics if the cell is already filled.
    pub fn assign(&mut self, pos: Position, digit: u8) {
        assert_eq!(self.board.get(pos), 0, "cell {pos} already filled");
        self.board.set(pos, digit);
        let index = self.index(pos);
        self.candidates[index] = DigitSet::from_elem(digit);
        self.journal.push(pos);
    }

    /// Returns the first cell whose candidate set is empty, if any.
    #[must_use]
    pub fn contradiction(&self) -> Option<Position> {
        self.positions()
            .find(|&pos| self.candidates[self.index(pos)].is_empty())
    }

    /// Drains the positions committed since the last drain, in commit order.
    pub fn take_changes(&mut self) -> Vec<Position> {
        std::mem::take(&mut self.journal)
    }
}

#[cfg(test)]
mod tests {
    use gridlace_core::Board;

    use super::*;

    #[test]
    fn test_new_state_has_full_tensor() {
        let state = GridState::new(Board::empty(9));
        for pos in state.positions() {
            assert_eq!(state.candidates_at(pos), DigitSet::full(9));
        }
        assert!(state.contradiction().is_none());
        assert!(!state.is_complete());
    }

    #[test]
    fn test_assign_collapses_candidates() {
        let mut state = GridState::new(Board::empty(9));
        let pos = Position::new(4, 4);
        state.assign(pos, 7);
        assert_eq!(state.value_at(pos), 7);
        assert_eq!(state.candidates_at(pos), DigitSet::from_elem(7));
        assert_eq!(state.take_changes(), vec![pos]);
        assert!(state.take_changes().is_empty());
    }

    #[test]
    #[should_panic(expected = "already filled")]
    fn test_assign_rejects_filled_cell() {
        let mut state = GridState::new(Board::empty(9));
        state.assign(Position::new(0, 0), 1);
        state.assign(Position::new(0, 0), 2);
    }

    #[test]
    fn test_remove_and_restrict() {
        let mut state = GridState::new(Board::empty(4));
        let pos = Position::new(1, 2);

        assert!(state.remove_candidate(pos, 3));
        assert!(!state.remove_candidate(pos, 3));
        assert_eq!(state.candidates_at(pos), DigitSet::from_iter([1, 2, 4]));

        assert!(state.restrict_candidates(pos, DigitSet::from_iter([2, 3])));
        assert_eq!(state.candidates_at(pos), DigitSet::from_elem(2));
        assert!(!state.restrict_candidates(pos, DigitSet::from_iter([2, 3])));
    }

    #[test]
    fn test_contradiction_reports_first_empty_cell() {
        let mut state = GridState::new(Board::empty(4));
        assert!(state.contradiction().is_none());
        let pos = Position::new(3, 1);
        assert!(state.clear_candidates(pos));
        assert_eq!(state.contradiction(), Some(pos));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut state = GridState::new(Board::empty(4));
        let mut child = state.clone();
        child.assign(Position::new(0, 0), 1);
        child.remove_candidate(Position::new(1, 1), 2);

        assert_eq!(state.value_at(Position::new(0, 0)), 0);
        assert_eq!(state.candidates_at(Position::new(1, 1)), DigitSet::full(4));
        assert!(state.take_changes().is_empty());
    }
}

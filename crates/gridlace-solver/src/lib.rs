//! Rule-driven solving for Gridlace puzzles.
//!
//! The solver combines three pieces:
//!
//! 1. **Rules** ([`rule`]) — pluggable constraints over a shared
//!    [`GridState`]: cell uniqueness, group uniqueness (rows, columns,
//!    blocks, and cages), anti-knight adjacency exclusion, and killer-cage
//!    sum regions backed by [`CageCombinatorics`].
//! 2. **Propagation** ([`PropagationEngine`]) — drives every rule to a
//!    fixed point, pruning candidates and committing forced cells.
//! 3. **Search** ([`Solver`]) — depth-first backtracking over propagated
//!    states, branching on the [`GuessSelector`]'s most-restricted
//!    (cell, digit) pair and eliminating failed guesses in the parent.
//!
//! # Examples
//!
//! ```
//! use gridlace_core::Board;
//! use gridlace_solver::{Outcome, Solver};
//!
//! let board = Board::from_text(
//!     "
//!     5,3,0,0,7,0,0,0,0
//!     6,0,0,1,9,5,0,0,0
//!     0,9,8,0,0,0,0,6,0
//!     8,0,0,0,6,0,0,0,3
//!     4,0,0,8,0,3,0,0,1
//!     7,0,0,0,2,0,0,0,6
//!     0,6,0,0,0,0,2,8,0
//!     0,0,0,4,1,9,0,0,5
//!     0,0,0,0,8,0,0,7,9
//!     ",
//! )?;
//!
//! let mut solver = Solver::classic(board.side());
//! let (outcome, _stats) = solver.solve(&board);
//! assert!(outcome.is_solved());
//! # Ok::<(), gridlace_core::ParseError>(())
//! ```

pub use self::{
    combinatorics::CageCombinatorics,
    error::RuleViolation,
    guess::{GuessSelector, ScoreGrid},
    propagation::{Propagation, PropagationEngine},
    rule::{
        AdjacencyExclusion, BoxedRule, CellUniqueness, GroupUniqueness, Rule, SumRegion,
        classic_rules,
    },
    solver::{Observer, Outcome, SolveStats, Solver},
    state::GridState,
};

mod combinatorics;
mod error;
mod guess;
mod propagation;
pub mod rule;
mod solver;
mod state;

#[cfg(test)]
mod testing;

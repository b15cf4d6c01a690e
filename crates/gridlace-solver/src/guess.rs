//! Guess selection for stuck states.

use gridlace_core::Position;
use rand::{RngExt as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

use crate::{GridState, rule::BoxedRule};

/// Scale of the random perturbation used to break score ties.
///
/// Small enough that it can only reorder pairs with equal rule scores.
const TIE_BREAK: f64 = 1e-6;

/// A score surface over (cell, digit) pairs.
///
/// Rules add desirability weights through their `restriction_estimate`;
/// the [`GuessSelector`] reads the summed surface to pick the next branch.
#[derive(Debug, Clone)]
pub struct ScoreGrid {
    side: u8,
    scores: Vec<f64>,
}

impl ScoreGrid {
    /// Creates an all-zero surface for a `side × side` board.
    #[must_use]
    pub fn new(side: u8) -> Self {
        let side_len = usize::from(side);
        Self {
            side,
            scores: vec![0.0; side_len * side_len * side_len],
        }
    }

    fn index(&self, pos: Position, digit: u8) -> usize {
        let side = usize::from(self.side);
        assert!(pos.x() < self.side && pos.y() < self.side, "{pos} out of bounds");
        assert!((1..=self.side).contains(&digit), "digit {digit} out of range");
        (usize::from(pos.y()) * side + usize::from(pos.x())) * side + usize::from(digit) - 1
    }

    /// Adds a weight to a (cell, digit) pair.
    pub fn add(&mut self, pos: Position, digit: u8, weight: f64) {
        let index = self.index(pos, digit);
        self.scores[index] += weight;
    }

    /// Returns the accumulated weight of a (cell, digit) pair.
    #[must_use]
    pub fn get(&self, pos: Position, digit: u8) -> f64 {
        self.scores[self.index(pos, digit)]
    }
}

/// Picks the next guess when propagation is stuck.
///
/// The selector sums every rule's restriction estimate into one
/// [`ScoreGrid`], perturbs each entry by a seeded sub-epsilon random value
/// purely to break ties, and returns the argmax (cell, digit) pair over the
/// unfilled cells' remaining candidates.
#[derive(Debug, Clone)]
pub struct GuessSelector {
    rng: Pcg64Mcg,
}

impl GuessSelector {
    /// Creates a selector with a deterministic tie-break stream.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    /// Returns the most promising (cell, digit) pair, or `None` when no
    /// unfilled cell has a candidate left.
    pub fn select(&mut self, state: &GridState, rules: &[BoxedRule]) -> Option<(Position, u8)> {
        let mut scores = ScoreGrid::new(state.side());
        for rule in rules {
            rule.restriction_estimate(state, &mut scores);
        }

        let mut best: Option<(Position, u8, f64)> = None;
        for pos in state.positions() {
            if state.value_at(pos) != 0 {
                continue;
            }
            for digit in state.candidates_at(pos).iter() {
                let score = scores.get(pos, digit) + TIE_BREAK * self.rng.random::<f64>();
                if best.is_none_or(|(_, _, top)| score > top) {
                    best = Some((pos, digit, score));
                }
            }
        }
        best.map(|(pos, digit, _)| (pos, digit))
    }
}

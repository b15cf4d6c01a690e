use crate::{
    GridState, RuleViolation,
    rule::{BoxedRule, Rule},
};

/// The eight knight moves.
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const NAME: &str = "adjacency exclusion";

/// Forbids equal digits in cells related by a fixed set of offsets.
///
/// The offset set must be symmetric (contain the mirror of each entry), so
/// applying every offset from every filled cell covers both directions of
/// each related pair. The rule is pure exclusion: it removes candidates and
/// detects violations but never forces a value by itself, so it has no
/// `find_solvable` contribution.
#[derive(Debug, Clone)]
pub struct AdjacencyExclusion {
    offsets: Vec<(i8, i8)>,
}

impl AdjacencyExclusion {
    /// Creates a rule over a symmetric offset set.
    #[must_use]
    pub fn new(offsets: Vec<(i8, i8)>) -> Self {
        debug_assert!(
            offsets
                .iter()
                .all(|&(dx, dy)| offsets.contains(&(-dx, -dy))),
            "offset set must be symmetric"
        );
        Self { offsets }
    }

    /// The anti-knight rule: no repeats a knight's move apart.
    #[must_use]
    pub fn anti_knight() -> Self {
        Self::new(KNIGHT_OFFSETS.to_vec())
    }
}

impl Rule for AdjacencyExclusion {
    fn name(&self) -> &'static str {
        NAME
    }

    fn clone_box(&self) -> BoxedRule {
        Box::new(self.clone())
    }

    fn reduce(&self, state: &mut GridState, _extended: bool) -> bool {
        let side = state.side();
        let mut changed = false;
        for pos in state.positions() {
            let value = state.value_at(pos);
            if value == 0 {
                continue;
            }
            for &(dx, dy) in &self.offsets {
                if let Some(other) = pos.offset(dx, dy, side)
                    && state.value_at(other) == 0
                {
                    changed |= state.remove_candidate(other, value);
                }
            }
        }
        changed
    }

    fn verify(&self, state: &GridState) -> Result<(), RuleViolation> {
        let side = state.side();
        for pos in state.positions() {
            let value = state.value_at(pos);
            if value == 0 {
                continue;
            }
            for &(dx, dy) in &self.offsets {
                if let Some(other) = pos.offset(dx, dy, side)
                    && state.value_at(other) == value
                {
                    return Err(RuleViolation::AdjacentDuplicate {
                        digit: value,
                        first: pos,
                        second: other,
                    });
                }
            }
        }
        Ok(())
    }
}

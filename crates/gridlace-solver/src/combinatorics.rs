//! Memoized cage-sum combinatorics.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use gridlace_core::DigitSet;

/// Memoized enumeration of achievable killer-cage digit sets.
///
/// [`possible_digits`] answers "which digits 1-9 appear in at least one
/// strictly increasing sequence of `count` distinct digits summing to
/// `target`?". The domain is tiny (`count <= 9`, `target <= 45`), so the
/// cache saturates quickly and later lookups are constant-time.
///
/// One value is created per solve setup and shared by every [`SumRegion`]
/// rule; the table only ever grows and is never invalidated, so sharing it
/// across concurrent solves of independent puzzles is safe.
///
/// [`possible_digits`]: CageCombinatorics::possible_digits
/// [`SumRegion`]: crate::SumRegion
///
/// # Examples
///
/// ```
/// use gridlace_core::DigitSet;
/// use gridlace_solver::CageCombinatorics;
///
/// let combinatorics = CageCombinatorics::new();
/// assert_eq!(
///     combinatorics.possible_digits(2, 17),
///     DigitSet::from_iter([8, 9])
/// );
/// ```
#[derive(Debug, Default)]
pub struct CageCombinatorics {
    cache: Mutex<HashMap<(u8, u16), DigitSet>>,
}

impl CageCombinatorics {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the digits that can take part in some combination of
    /// `count` distinct digits from 1-9 summing to `target`.
    ///
    /// Returns the empty set when no such combination exists.
    #[must_use]
    pub fn possible_digits(&self, count: u8, target: u16) -> DigitSet {
        let mut cache = lock_ignoring_poison(&self.cache);
        *cache
            .entry((count, target))
            .or_insert_with(|| enumerate(count, target))
    }
}

// The table holds no invariants a panicked writer could break (entries are
// written whole), so a poisoned lock is still usable.
fn lock_ignoring_poison<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn enumerate(count: u8, target: u16) -> DigitSet {
    let mut found = DigitSet::EMPTY;
    walk(1, count, target, DigitSet::EMPTY, &mut found);
    found
}

fn walk(start: u8, count: u8, target: u16, chosen: DigitSet, found: &mut DigitSet) {
    if count == 0 {
        if target == 0 {
            *found |= chosen;
        }
        return;
    }
    for digit in start..=9 {
        let value = u16::from(digit);
        if value > target {
            break;
        }
        walk(
            digit + 1,
            count - 1,
            target - value,
            chosen.union(DigitSet::from_elem(digit)),
            found,
        );
    }
}

//! Drag commit
//!
//! A finished drag reports where the placeholder ended up among the rows *other* than the
//! dragged one. Committing removes the dragged element and reinserts it at that index of the
//! remainder, on a fresh copy.

use crate::error::{PackoutError, PackoutResult};
use crate::item::Item;

/// Result of a completed drag within one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropOutcome {
    /// Index of the dragged row in the list as rendered.
    pub source: usize,
    /// Placeholder index among the remaining rows.
    pub target: usize,
}

impl DropOutcome {
    pub fn is_noop(&self) -> bool {
        self.source == self.target
    }
}

/// Remove the element at `from` and insert it at `to` within the remainder.
///
/// `to` may be at most `list.len() - 1` (the end of the remainder).
pub fn move_element<T: Clone>(list: &[T], from: usize, to: usize) -> PackoutResult<Vec<T>> {
    let len = list.len();
    if from >= len {
        return Err(PackoutError::ItemOutOfRange { index: from, len });
    }
    if to >= len {
        return Err(PackoutError::ItemOutOfRange { index: to, len });
    }

    let mut next = list.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Ok(next)
}

/// New ordering for a drop, or `None` when the item landed where it started.
pub fn commit_order(items: &[Item], outcome: DropOutcome) -> PackoutResult<Option<Vec<Item>>> {
    if outcome.source >= items.len() {
        return Err(PackoutError::ItemOutOfRange { index: outcome.source, len: items.len() });
    }
    if outcome.is_noop() {
        return Ok(None);
    }
    move_element(items, outcome.source, outcome.target).map(Some)
}

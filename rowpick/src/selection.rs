//! Selection set and aggregate state derivation.
//!
//! This module is the pure layer: a collection of selected row ids and the
//! tri-state aggregate derived from it. Selection uses id membership rather
//! than positional flags so it stays stable when items are added or removed.
//! No side effects and no notifications happen here; that is the provider's
//! job.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RowId;

/// Aggregate selection state, driving a tri-state "select all" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkState {
    /// Every id in the universe is selected (universe non-empty).
    All,
    /// Nothing is selected. An empty universe is `None`, never `All`.
    None,
    /// A non-empty strict subset is selected.
    Some,
}

impl fmt::Display for BulkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::None => write!(f, "none"),
            Self::Some => write!(f, "some"),
        }
    }
}

/// The select-all control's resulting target state.
///
/// Policy: select-all is the default action whenever the table is not
/// already fully selected. `Some` always resolves to select-all, never
/// deselect-all.
pub fn toggle_all_target(state: BulkState) -> bool {
    match state {
        BulkState::All => false,
        BulkState::None | BulkState::Some => true,
    }
}

/// Id-based selection state.
///
/// Set semantics: no duplicates, insertion order meaningless. Snapshots are
/// returned sorted for deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: HashSet<RowId>,
}

impl SelectionSet {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from the earlier boolean-flags model: positions of
    /// `true` flags become index ids.
    pub fn from_flags(flags: &[bool]) -> Self {
        flags
            .iter()
            .enumerate()
            .filter(|(_, on)| **on)
            .map(|(i, _)| RowId::from(i))
            .collect()
    }

    /// Get all selected ids (sorted for deterministic ordering).
    pub fn ids(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected ids.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Derive the aggregate state against the universe of all known ids.
    ///
    /// Total for every `universe_len`, including zero.
    pub fn bulk_state(&self, universe_len: usize) -> BulkState {
        let selected = self.selected.len();
        if selected == 0 {
            BulkState::None
        } else if selected == universe_len {
            BulkState::All
        } else {
            BulkState::Some
        }
    }

    /// Toggle membership of an id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Add an id. Returns true if it was newly selected.
    pub fn insert(&mut self, id: RowId) -> bool {
        self.selected.insert(id)
    }

    /// Remove an id. Returns true if it was selected.
    pub fn remove(&mut self, id: &RowId) -> bool {
        self.selected.remove(id)
    }

    /// Clear all selection. Returns the ids that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.selected.drain().collect()
    }

    /// Replace the contents with the given ids.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RowId>,
    {
        self.selected = ids.into_iter().collect();
    }

    /// Replace the selection with every id in the given universe.
    /// Returns the ids that were newly selected, in universe order.
    pub fn select_all(&mut self, universe: &[RowId]) -> Vec<RowId> {
        let added = universe
            .iter()
            .filter(|id| !self.selected.contains(*id))
            .cloned()
            .collect();
        self.selected = universe.iter().cloned().collect();
        added
    }

    /// Per-slot membership against an ordered universe, the outbound shape of
    /// the boolean-flags model.
    pub fn flags(&self, universe: &[RowId]) -> Vec<bool> {
        universe.iter().map(|id| self.selected.contains(id)).collect()
    }
}

impl FromIterator<RowId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

//! Selection provider: the stateful owner of a table's selection.
//!
//! A `SelectionProvider` holds the canonical `SelectionSet` for one table,
//! derives the aggregate state against the host-supplied universe, and
//! notifies the host after every locally-originated mutation. An optional
//! externally-controlled value is adopted through [`SelectionProvider::reconcile`];
//! adoption never fires the change handler, so external deliveries cannot
//! echo back into the host.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::error::SelectionError;
use crate::id::{RowId, ids_from_value};
use crate::selection::{BulkState, SelectionSet, toggle_all_target};

/// Unique identifier for a SelectionProvider instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId(usize);

impl ProviderId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__selection_{}", self.0)
    }
}

/// Handler invoked with a snapshot of the selection after each local mutation.
pub type ChangeHandler = Arc<dyn Fn(Vec<RowId>) + Send + Sync>;

/// Internal state for a SelectionProvider.
struct ProviderInner {
    /// All known ids, host-supplied, in host order.
    universe: Vec<RowId>,
    /// The canonical selection.
    selection: SelectionSet,
    /// Whether an external value was ever delivered.
    controlled: bool,
    /// Host change handler for locally-originated mutations.
    on_change: Option<ChangeHandler>,
}

/// The stateful owner of a table's selection.
///
/// The provider is a cheap-to-clone handle over shared state; all methods
/// take `&self`. Getters return newly built snapshots, never references into
/// the internal collection, and setters take owned values, so no consumer
/// can alias provider-internal state across the API boundary.
///
/// # Example
///
/// ```ignore
/// let provider = SelectionProvider::new(["a", "b", "c"])
///     .on_change(|ids| println!("selected: {ids:?}"));
///
/// provider.toggle_select(&"a".into());
/// assert_eq!(provider.bulk_state(), BulkState::Some);
/// provider.toggle_bulk();
/// assert_eq!(provider.bulk_state(), BulkState::All);
/// ```
pub struct SelectionProvider {
    /// Unique identifier.
    id: ProviderId,
    /// Shared internal state.
    inner: Arc<RwLock<ProviderInner>>,
    /// Set on every state change; hosts poll and clear it to drive re-renders.
    dirty: Arc<AtomicBool>,
}

impl Clone for SelectionProvider {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl fmt::Debug for SelectionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.read();
        f.debug_struct("SelectionProvider")
            .field("id", &self.id)
            .field("universe_len", &g.universe.len())
            .field("num_selected", &g.selection.len())
            .field("controlled", &g.controlled)
            .finish()
    }
}

impl SelectionProvider {
    /// Create an uncontrolled provider with an empty selection.
    pub fn new<I>(universe: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RowId>,
    {
        Self {
            id: ProviderId::new(),
            inner: Arc::new(RwLock::new(ProviderInner {
                universe: universe.into_iter().map(Into::into).collect(),
                selection: SelectionSet::new(),
                controlled: false,
                on_change: None,
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Initialize the selection from an externally-supplied value.
    ///
    /// The provider starts in controlled mode; subsequent deliveries go
    /// through [`SelectionProvider::reconcile`].
    pub fn with_selected<I>(self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RowId>,
    {
        {
            let mut g = self.write();
            g.selection.replace(ids.into_iter().map(Into::into));
            g.controlled = true;
        }
        self
    }

    /// Register the change handler invoked after every local mutation.
    pub fn on_change<F>(self, handler: F) -> Self
    where
        F: Fn(Vec<RowId>) + Send + Sync + 'static,
    {
        self.write().on_change = Some(Arc::new(handler));
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, ProviderInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ProviderInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the unique ID.
    pub fn id(&self) -> ProviderId {
        self.id
    }

    /// Get the unique ID as a string (for node binding).
    pub fn id_string(&self) -> String {
        self.id.to_string()
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.read().selection.is_selected(id)
    }

    /// Get all selected ids (sorted snapshot).
    pub fn selected_ids(&self) -> Vec<RowId> {
        self.read().selection.ids()
    }

    /// Get the number of selected ids.
    pub fn num_selected(&self) -> usize {
        self.read().selection.len()
    }

    /// Check if anything is selected.
    pub fn any_selected(&self) -> bool {
        !self.read().selection.is_empty()
    }

    /// Derive the aggregate state against the current universe.
    pub fn bulk_state(&self) -> BulkState {
        let g = self.read();
        g.selection.bulk_state(g.universe.len())
    }

    /// Get the current universe (copy, in host order).
    pub fn universe(&self) -> Vec<RowId> {
        self.read().universe.clone()
    }

    /// Whether an external value was ever delivered.
    pub fn is_controlled(&self) -> bool {
        self.read().controlled
    }

    /// Check if the state has changed and needs re-render.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag after rendering.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Universe delivery
    // -------------------------------------------------------------------------

    /// Re-deliver the universe when the host data changes.
    ///
    /// Never mutates the selection and never notifies; ids outside the new
    /// universe stay selected until the caller removes them.
    pub fn set_universe<I>(&self, universe: I)
    where
        I: IntoIterator,
        I::Item: Into<RowId>,
    {
        self.write().universe = universe.into_iter().map(Into::into).collect();
        self.dirty.store(true, Ordering::SeqCst);
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Commit a local mutation: mark dirty, then hand the handler a snapshot.
    ///
    /// Called with the write lock released so the handler can re-read the
    /// provider; the snapshot it receives is already the committed state.
    fn commit(&self, snapshot: Vec<RowId>, handler: Option<ChangeHandler>) {
        self.dirty.store(true, Ordering::SeqCst);
        if let Some(handler) = handler {
            handler(snapshot);
        }
    }

    /// Toggle selection of an id. Returns whether it is selected afterwards.
    ///
    /// Ids outside the universe are accepted verbatim; membership against a
    /// stale universe is the caller's responsibility.
    pub fn toggle_select(&self, id: &RowId) -> bool {
        let (selected, snapshot, handler) = {
            let mut g = self.write();
            let selected = g.selection.toggle(id);
            (selected, g.selection.ids(), g.on_change.clone())
        };
        self.commit(snapshot, handler);
        selected
    }

    /// Replace the selection with the full universe.
    /// Returns the ids that were newly selected.
    pub fn select_all(&self) -> Vec<RowId> {
        let (added, snapshot, handler) = {
            let mut g = self.write();
            let inner = &mut *g;
            let added = inner.selection.select_all(&inner.universe);
            (added, inner.selection.ids(), inner.on_change.clone())
        };
        self.commit(snapshot, handler);
        added
    }

    /// Clear the selection. Returns the ids that were deselected.
    pub fn deselect_all(&self) -> Vec<RowId> {
        let (removed, snapshot, handler) = {
            let mut g = self.write();
            let removed = g.selection.clear();
            (removed, g.selection.ids(), g.on_change.clone())
        };
        self.commit(snapshot, handler);
        removed
    }

    /// Apply the select-all control: select everything unless already fully
    /// selected, in which case deselect everything.
    /// Returns the resulting aggregate state.
    pub fn toggle_bulk(&self) -> BulkState {
        let (state, snapshot, handler) = {
            let mut g = self.write();
            let inner = &mut *g;
            if toggle_all_target(inner.selection.bulk_state(inner.universe.len())) {
                inner.selection.select_all(&inner.universe);
            } else {
                inner.selection.clear();
            }
            let state = inner.selection.bulk_state(inner.universe.len());
            (state, inner.selection.ids(), inner.on_change.clone())
        };
        log::debug!("selection provider {}: bulk toggled to {state}", self.id);
        self.commit(snapshot, handler);
        state
    }

    /// Replace the selection with the given ids.
    pub fn set_selected_ids<I>(&self, ids: I)
    where
        I: IntoIterator,
        I::Item: Into<RowId>,
    {
        let (snapshot, handler) = {
            let mut g = self.write();
            g.selection.replace(ids.into_iter().map(Into::into));
            (g.selection.ids(), g.on_change.clone())
        };
        self.commit(snapshot, handler);
    }

    /// Replace the selection from an untyped host value.
    ///
    /// The value must be a JSON array of string/number ids; anything else is
    /// rejected with [`SelectionError::InvalidArgument`] and the selection is
    /// left untouched (the value is parsed in full before any state changes).
    pub fn set_selected_value(&self, value: &Value) -> Result<(), SelectionError> {
        let ids = ids_from_value(value)?;
        self.set_selected_ids(ids);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Reconcile an externally-delivered `selected_ids` value.
    ///
    /// `None` is a no-op: an uncontrolled provider stays uncontrolled, and a
    /// provider that has entered controlled mode keeps its last value; there
    /// is no transition back. `Some` enters controlled mode and overwrites
    /// the internal selection only when the content actually differs (set
    /// equality: same elements, any order, any instance). Adoption never
    /// fires the change handler.
    pub fn reconcile(&self, external: Option<&[RowId]>) {
        let Some(external) = external else {
            return;
        };
        let mut g = self.write();
        if !g.controlled {
            log::debug!("selection provider {}: entering controlled mode", self.id);
            g.controlled = true;
        }
        let incoming: SelectionSet = external.iter().cloned().collect();
        if incoming == g.selection {
            return;
        }
        log::debug!(
            "selection provider {}: adopting external selection ({} ids)",
            self.id,
            incoming.len()
        );
        g.selection = incoming;
        drop(g);
        self.dirty.store(true, Ordering::SeqCst);
    }
}

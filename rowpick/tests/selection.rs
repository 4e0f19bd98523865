use rowpick::id::RowId;
use rowpick::selection::{BulkState, SelectionSet, toggle_all_target};

fn ids(raw: &[&str]) -> Vec<RowId> {
    raw.iter().map(|s| RowId::from(*s)).collect()
}

// ============================================================================
// Aggregate derivation
// ============================================================================

#[test]
fn test_empty_selection_is_none() {
    let selection = SelectionSet::new();
    assert_eq!(selection.bulk_state(3), BulkState::None);
}

#[test]
fn test_full_selection_is_all() {
    let selection: SelectionSet = ids(&["a", "b", "c"]).into_iter().collect();
    assert_eq!(selection.bulk_state(3), BulkState::All);
}

#[test]
fn test_partial_selection_is_some() {
    let selection: SelectionSet = ids(&["a"]).into_iter().collect();
    assert_eq!(selection.bulk_state(3), BulkState::Some);
}

#[test]
fn test_empty_universe_is_none() {
    // Tie-break: empty universe with empty selection is NONE, not ALL.
    let selection = SelectionSet::new();
    assert_eq!(selection.bulk_state(0), BulkState::None);
}

#[test]
fn test_stale_universe_stays_defined() {
    // More selected ids than the universe knows about: still a defined state.
    let selection: SelectionSet = ids(&["a", "b", "c"]).into_iter().collect();
    assert_eq!(selection.bulk_state(2), BulkState::Some);
}

// ============================================================================
// Select-all policy
// ============================================================================

#[test]
fn test_toggle_all_target_policy() {
    // SOME always resolves to select-all, never deselect-all.
    assert!(toggle_all_target(BulkState::None));
    assert!(toggle_all_target(BulkState::Some));
    assert!(!toggle_all_target(BulkState::All));
}

// ============================================================================
// Set operations
// ============================================================================

#[test]
fn test_toggle_is_self_inverse() {
    let mut selection = SelectionSet::new();
    let id = RowId::from("x");

    assert!(selection.toggle(&id));
    assert!(selection.is_selected(&id));
    assert!(!selection.toggle(&id));
    assert!(!selection.is_selected(&id));
}

#[test]
fn test_no_duplicates() {
    let mut selection = SelectionSet::new();
    assert!(selection.insert(RowId::from("a")));
    assert!(!selection.insert(RowId::from("a")));
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_ids_sorted() {
    let selection: SelectionSet = ids(&["c", "a", "b"]).into_iter().collect();
    assert_eq!(selection.ids(), ids(&["a", "b", "c"]));
}

#[test]
fn test_numeric_ids_sort_before_text() {
    let selection: SelectionSet =
        vec![RowId::from("a"), RowId::from(2u64), RowId::from(10u64)].into_iter().collect();
    assert_eq!(
        selection.ids(),
        vec![RowId::from(2u64), RowId::from(10u64), RowId::from("a")]
    );
}

#[test]
fn test_replace_overwrites_contents() {
    let mut selection: SelectionSet = ids(&["a", "b"]).into_iter().collect();
    selection.replace(ids(&["c"]));
    assert_eq!(selection.ids(), ids(&["c"]));
}

#[test]
fn test_select_all_replaces_with_universe() {
    let universe = ids(&["a", "b"]);
    let mut selection: SelectionSet = ids(&["b", "stray"]).into_iter().collect();

    let added = selection.select_all(&universe);

    assert_eq!(added, ids(&["a"]));
    assert_eq!(selection.ids(), ids(&["a", "b"]));
}

#[test]
fn test_clear_returns_removed() {
    let mut selection: SelectionSet = ids(&["a", "b"]).into_iter().collect();
    let mut removed = selection.clear();
    removed.sort();
    assert_eq!(removed, ids(&["a", "b"]));
    assert!(selection.is_empty());
}

// ============================================================================
// Boolean-flags bridge
// ============================================================================

#[test]
fn test_from_flags_positions() {
    let selection = SelectionSet::from_flags(&[true, false, true]);
    assert_eq!(selection.ids(), vec![RowId::from(0u64), RowId::from(2u64)]);
    assert_eq!(selection.bulk_state(3), BulkState::Some);
}

#[test]
fn test_flags_align_with_universe() {
    let universe: Vec<RowId> = vec![0u64.into(), 1u64.into(), 2u64.into()];
    let selection: SelectionSet = vec![RowId::from(1u64)].into_iter().collect();
    assert_eq!(selection.flags(&universe), vec![false, true, false]);
}

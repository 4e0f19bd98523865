use rowpick::id::RowId;
use rowpick::provider::SelectionProvider;
use rowpick::scope::SelectionScope;
use rowpick::selection::BulkState;

fn ids(raw: &[&str]) -> Vec<RowId> {
    raw.iter().map(|s| RowId::from(*s)).collect()
}

// ============================================================================
// Lookup failure
// ============================================================================

#[test]
fn test_missing_provider_fails_with_default_message() {
    let scope = SelectionScope::new();
    let err = scope.with_provider(|p| p.num_selected()).unwrap_err();
    assert!(err.message.contains("SelectionProvider"));
}

#[test]
fn test_missing_provider_custom_message() {
    let scope = SelectionScope::new();
    let err = scope
        .with_provider_or("the message", |p| p.num_selected())
        .unwrap_err();
    assert_eq!(err.message, "the message");
    assert_eq!(err.to_string(), "the message");
}

#[test]
fn test_custom_message_unused_when_provider_exists() {
    let scope = SelectionScope::new();
    let _guard = scope.enter(SelectionProvider::new(["0"]));
    let count = scope
        .with_provider_or("the message", |p| p.num_selected())
        .expect("provider in scope");
    assert_eq!(count, 0);
}

// ============================================================================
// Nearest-provider resolution
// ============================================================================

#[test]
fn test_consumer_reads_and_mutates_through_scope() {
    let scope = SelectionScope::new();
    let provider = SelectionProvider::new(["0", "1"]);
    let _guard = scope.enter(provider.clone());

    scope
        .with_provider(|p| p.toggle_bulk())
        .expect("provider in scope");

    // The host-held handle observes the consumer's mutation.
    assert_eq!(provider.bulk_state(), BulkState::All);
    assert_eq!(provider.selected_ids(), ids(&["0", "1"]));
}

#[test]
fn test_nested_scopes_resolve_to_innermost() {
    let scope = SelectionScope::new();
    let outer = SelectionProvider::new(["a"]);
    let inner = SelectionProvider::new(["x", "y"]);

    let _outer_guard = scope.enter(outer.clone());
    let _inner_guard = scope.enter(inner.clone());

    let universe = scope.with_provider(|p| p.universe()).unwrap();
    assert_eq!(universe, ids(&["x", "y"]));
}

#[test]
fn test_dropping_inner_guard_restores_outer() {
    let scope = SelectionScope::new();
    let outer = SelectionProvider::new(["a"]);
    let inner = SelectionProvider::new(["x", "y"]);

    let _outer_guard = scope.enter(outer.clone());
    {
        let _inner_guard = scope.enter(inner.clone());
        assert_eq!(scope.depth(), 2);
    }

    assert_eq!(scope.depth(), 1);
    let universe = scope.with_provider(|p| p.universe()).unwrap();
    assert_eq!(universe, ids(&["a"]));
}

#[test]
fn test_out_of_order_guard_drop_removes_the_right_provider() {
    let scope = SelectionScope::new();
    let outer = SelectionProvider::new(["a"]);
    let inner = SelectionProvider::new(["x"]);

    let outer_guard = scope.enter(outer.clone());
    let _inner_guard = scope.enter(inner.clone());

    drop(outer_guard);

    assert_eq!(scope.depth(), 1);
    let universe = scope.with_provider(|p| p.universe()).unwrap();
    assert_eq!(universe, ids(&["x"]));
}

// ============================================================================
// Scope holds no state
// ============================================================================

#[test]
fn test_scope_is_empty_after_all_guards_drop() {
    let scope = SelectionScope::new();
    let provider = SelectionProvider::new(["0"]);
    {
        let _guard = scope.enter(provider.clone());
        scope.with_provider(|p| p.toggle_select(&"0".into())).unwrap();
    }

    assert_eq!(scope.depth(), 0);
    assert!(scope.with_provider(|p| p.num_selected()).is_err());
    // The selection lives in the provider, not the scope.
    assert_eq!(provider.selected_ids(), ids(&["0"]));
}

#[test]
fn test_provider_handle_clone_shares_state() {
    let scope = SelectionScope::new();
    let provider = SelectionProvider::new(["0", "1"]);
    let _guard = scope.enter(provider.clone());

    let handle = scope.provider().expect("provider in scope");
    handle.toggle_select(&"1".into());

    assert!(provider.is_selected(&"1".into()));
}

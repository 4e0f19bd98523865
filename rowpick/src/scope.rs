//! Consumer bridge: scoped lookup of the nearest enclosing provider.
//!
//! Descendants of a table (header checkbox, row checkboxes, footer summary)
//! need the provider's API without it being threaded through every layer in
//! between. A `SelectionScope` is an explicit stack keyed by structural
//! nesting: entering a provider covers a subtree, and a lookup resolves to
//! the innermost provider currently entered. The scope holds provider
//! handles, never selection data, and a lookup with no enclosing provider
//! fails immediately rather than handing back nothing.

use std::sync::{Arc, PoisonError, RwLock};

use crate::error::MissingProviderError;
use crate::provider::{ProviderId, SelectionProvider};

/// Scoped registry of selection providers, innermost last.
#[derive(Debug, Clone, Default)]
pub struct SelectionScope {
    stack: Arc<RwLock<Vec<SelectionProvider>>>,
}

impl SelectionScope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a provider for the duration of a subtree.
    ///
    /// The returned guard removes exactly this provider when dropped, so
    /// guards may be dropped in any order without corrupting the stack.
    #[must_use = "the provider leaves the scope when the guard is dropped"]
    pub fn enter(&self, provider: SelectionProvider) -> ScopeGuard {
        let id = provider.id();
        self.stack
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(provider);
        ScopeGuard {
            scope: self.clone(),
            id,
        }
    }

    /// Number of providers currently entered.
    pub fn depth(&self) -> usize {
        self.stack
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn nearest(&self) -> Option<SelectionProvider> {
        // Clone the handle out so the lock is released before caller code runs.
        self.stack
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Hand the nearest enclosing provider to the given callback.
    ///
    /// Fails with the default [`MissingProviderError`] when no provider is in
    /// scope.
    pub fn with_provider<R>(
        &self,
        f: impl FnOnce(&SelectionProvider) -> R,
    ) -> Result<R, MissingProviderError> {
        match self.nearest() {
            Some(provider) => Ok(f(&provider)),
            None => Err(MissingProviderError::default()),
        }
    }

    /// Like [`SelectionScope::with_provider`], with a caller-supplied
    /// message replacing the default error text entirely.
    pub fn with_provider_or<R>(
        &self,
        message: impl Into<String>,
        f: impl FnOnce(&SelectionProvider) -> R,
    ) -> Result<R, MissingProviderError> {
        match self.nearest() {
            Some(provider) => Ok(f(&provider)),
            None => Err(MissingProviderError::new(message)),
        }
    }

    /// Clone the nearest enclosing provider handle out of the scope.
    pub fn provider(&self) -> Result<SelectionProvider, MissingProviderError> {
        self.nearest().ok_or_else(MissingProviderError::default)
    }
}

/// Removes its provider from the scope on drop.
#[derive(Debug)]
pub struct ScopeGuard {
    scope: SelectionScope,
    id: ProviderId,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let mut stack = self
            .scope
            .stack
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = stack.iter().rposition(|p| p.id() == self.id) {
            stack.remove(pos);
        }
    }
}

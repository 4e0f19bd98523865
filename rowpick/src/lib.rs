pub mod error;
pub mod id;
pub mod provider;
pub mod scope;
pub mod selection;

pub use error::{MissingProviderError, SelectionError};
pub use id::RowId;
pub use provider::SelectionProvider;
pub use scope::SelectionScope;
pub use selection::{BulkState, SelectionSet};

pub mod prelude {
    pub use crate::error::{MissingProviderError, SelectionError};
    pub use crate::id::{RowId, ids_from_value};
    pub use crate::provider::{ChangeHandler, ProviderId, SelectionProvider};
    pub use crate::scope::{ScopeGuard, SelectionScope};
    pub use crate::selection::{BulkState, SelectionSet, toggle_all_target};
}

use shared_types::StorageError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("Store {store} failed: {source}")]
    Storage {
        store: usize,
        #[source]
        source: StorageError,
    },

    #[error("Inconsistent store histories: {0}")]
    Consistency(String),

    #[error("At least one store is required")]
    NoStores,

    #[error("Unknown store {index} (adapter has {count})")]
    UnknownStore { index: usize, count: usize },

    #[error("Stores must be recovered before changes are applied")]
    RecoveryRequired,

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl StateError {
    pub(crate) fn storage(store: usize) -> impl FnOnce(StorageError) -> Self {
        move |source| Self::Storage { store, source }
    }
}

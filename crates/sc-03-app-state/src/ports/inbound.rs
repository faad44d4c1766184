//! Inbound (Driving) ports: what a block-processing driver calls.

use crate::domain::StateError;
use shared_types::{BlockId, StorageKey, StorageValue, VersionId};

/// Pluggable application logic of a sidechain node.
///
/// `B` and `T` are the driver's block and transaction types. Validation
/// hooks accept everything unless overridden.
pub trait ApplicationState<B, T>: Send + Sync {
    fn validate_block(&self, _block: &B) -> Result<(), StateError> {
        Ok(())
    }

    fn validate_transaction(&self, _tx: &T) -> Result<(), StateError> {
        Ok(())
    }

    /// Persists the state changes of block `block_id`.
    fn on_apply_changes(
        &self,
        block_id: &BlockId,
        upserts: &[(StorageKey, StorageValue)],
        deletes: &[StorageKey],
    ) -> Result<&Self, StateError>;

    /// Reverts to the state committed by `block_id`.
    fn on_rollback(&self, block_id: &BlockId) -> Result<&Self, StateError>;

    /// Latest version of every store, in store order.
    fn storages_version_list(&self) -> Result<Vec<VersionId>, StateError>;
}

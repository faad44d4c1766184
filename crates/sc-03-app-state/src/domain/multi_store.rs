//! # Multi-Store Application State
//!
//! Composes an ordered list of versioned stores into one logical state whose
//! version is the id of the last applied block.
//!
//! Commits and rollbacks visit the stores in order and stop at the first
//! failure. Stores that already committed stay one version ahead: nothing is
//! compensated in-process. After any failure the adapter refuses new commits
//! until `recover` realigns the stores.

use super::entities::{RecoveryReport, StateConfig};
use super::errors::StateError;
use super::recovery::plan_recovery;
use crate::ports::{ApplicationState, VersionedStore};
use shared_types::{short_hex, BlockId, StorageKey, StorageValue, VersionId, NULL_VERSION};
use std::sync::atomic::{AtomicBool, Ordering};

/// Version-aligned application state over `stores`.
#[derive(Debug)]
pub struct MultiStoreState<S> {
    stores: Vec<S>,
    config: StateConfig,
    recovered: AtomicBool,
}

impl<S: VersionedStore> MultiStoreState<S> {
    /// Wraps `stores`; `recover` must succeed before changes are applied.
    pub fn new(stores: Vec<S>) -> Result<Self, StateError> {
        Self::with_config(stores, StateConfig::default())
    }

    pub fn with_config(stores: Vec<S>, config: StateConfig) -> Result<Self, StateError> {
        if stores.is_empty() {
            return Err(StateError::NoStores);
        }
        Ok(Self {
            stores,
            config,
            recovered: AtomicBool::new(false),
        })
    }

    pub fn stores(&self) -> &[S] {
        &self.stores
    }

    pub fn config(&self) -> &StateConfig {
        &self.config
    }

    pub fn is_recovered(&self) -> bool {
        self.recovered.load(Ordering::SeqCst)
    }

    /// Latest version of every store, `NULL_VERSION` for empty stores.
    pub fn storages_version_list(&self) -> Result<Vec<VersionId>, StateError> {
        self.stores
            .iter()
            .enumerate()
            .map(|(index, store)| {
                let version = store.last_version_id().map_err(StateError::storage(index))?;
                Ok(version.unwrap_or_else(|| {
                    tracing::debug!("[sc-03] Store {} has no version yet", index);
                    NULL_VERSION
                }))
            })
            .collect()
    }

    /// Aligns all stores on their newest common version.
    ///
    /// # Errors
    /// - `Consistency` if the store histories cannot be reconciled
    /// - `Storage` if a store fails while being inspected or rolled back
    pub fn recover(&self) -> Result<RecoveryReport, StateError> {
        let tips = self.storages_version_list()?;
        let histories = if tips.iter().all(|tip| *tip == tips[0]) {
            Vec::new()
        } else {
            self.histories()?
        };

        let plan = plan_recovery(&tips, &histories).map_err(|err| {
            tracing::error!("[sc-03] Recovery failed, operator action required: {}", err);
            err
        })?;

        for &index in &plan.rollbacks {
            tracing::warn!(
                "[sc-03] Recovery: rolling store {} back from {} to {}",
                index,
                short_hex(&tips[index]),
                short_hex(&plan.common_version)
            );
            self.stores[index]
                .rollback(&plan.common_version)
                .map_err(StateError::storage(index))?;
        }

        self.recovered.store(true, Ordering::SeqCst);
        tracing::info!(
            "[sc-03] {} stores aligned at version {}",
            self.stores.len(),
            short_hex(&plan.common_version)
        );

        Ok(RecoveryReport {
            common_version: plan.common_version,
            rolled_back: plan.rollbacks,
        })
    }

    /// Commits the changes of `block_id` to every store, in order.
    ///
    /// # Errors
    /// - `RecoveryRequired` before a successful `recover`, or after a failed
    ///   commit or rollback
    /// - `Storage` naming the first store that failed; earlier stores keep
    ///   the new version
    pub fn on_apply_changes(
        &self,
        block_id: &BlockId,
        upserts: &[(StorageKey, StorageValue)],
        deletes: &[StorageKey],
    ) -> Result<&Self, StateError> {
        if !self.is_recovered() {
            return Err(StateError::RecoveryRequired);
        }

        for (index, store) in self.stores.iter().enumerate() {
            if let Err(source) = store.update(block_id, upserts, deletes) {
                self.mark_unaligned(index, "commit", block_id);
                return Err(StateError::Storage {
                    store: index,
                    source,
                });
            }
        }

        tracing::info!(
            "[sc-03] Applied block {} ({} upserts, {} deletes)",
            short_hex(block_id),
            upserts.len(),
            deletes.len()
        );
        Ok(self)
    }

    /// Rolls every store back to `block_id`, in order.
    pub fn on_rollback(&self, block_id: &BlockId) -> Result<&Self, StateError> {
        for (index, store) in self.stores.iter().enumerate() {
            if let Err(source) = store.rollback(block_id) {
                self.mark_unaligned(index, "rollback", block_id);
                return Err(StateError::Storage {
                    store: index,
                    source,
                });
            }
        }

        tracing::info!("[sc-03] Rolled back to block {}", short_hex(block_id));
        Ok(self)
    }

    /// Reads `key` from store `store_index`.
    pub fn get(&self, store_index: usize, key: &[u8]) -> Result<Option<StorageValue>, StateError> {
        let store = self.stores.get(store_index).ok_or(StateError::UnknownStore {
            index: store_index,
            count: self.stores.len(),
        })?;
        store.get(key).map_err(StateError::storage(store_index))
    }

    fn histories(&self) -> Result<Vec<Vec<VersionId>>, StateError> {
        self.stores
            .iter()
            .enumerate()
            .map(|(index, store)| {
                store
                    .rollback_versions(self.config.recovery_depth)
                    .map_err(StateError::storage(index))
            })
            .collect()
    }

    fn mark_unaligned(&self, failed_store: usize, operation: &str, block_id: &BlockId) {
        self.recovered.store(false, Ordering::SeqCst);
        tracing::error!(
            "[sc-03] Store {} failed {} of block {}; stores 0..{} already done",
            failed_store,
            operation,
            short_hex(block_id),
            failed_store
        );
    }
}

impl<S: VersionedStore, B, T> ApplicationState<B, T> for MultiStoreState<S> {
    fn on_apply_changes(
        &self,
        block_id: &BlockId,
        upserts: &[(StorageKey, StorageValue)],
        deletes: &[StorageKey],
    ) -> Result<&Self, StateError> {
        MultiStoreState::on_apply_changes(self, block_id, upserts, deletes)
    }

    fn on_rollback(&self, block_id: &BlockId) -> Result<&Self, StateError> {
        MultiStoreState::on_rollback(self, block_id)
    }

    fn storages_version_list(&self) -> Result<Vec<VersionId>, StateError> {
        MultiStoreState::storages_version_list(self)
    }
}

//! # Transaction Pool Snapshots
//!
//! A `TransactionPool` is a handle to an id-ordered map of pending
//! transactions. Writers never mutate the map behind an existing handle:
//! `admit`, `admit_batch`, `evict` and `evict_many` copy it, change the copy,
//! and return a handle to the copy. `retain` is the single exception and
//! filters the shared map in place, so every clone of the handle observes it.
//!
//! ```text
//!   pool ──admit(tx)──→ pool' (copy + tx)        pool unchanged
//!   pool ──retain(p)──→ pool  (same map, filtered; visible via clones)
//! ```

use super::entities::{MempoolConfig, PoolTransaction, TxId};
use super::errors::MempoolError;
use parking_lot::RwLock;
use shared_types::short_hex;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

type Entries<T> = BTreeMap<TxId, T>;

/// Copy-on-write transaction pool.
///
/// Cloning is cheap and shares the backing map.
#[derive(Debug)]
pub struct TransactionPool<T> {
    config: MempoolConfig,
    entries: Arc<RwLock<Entries<T>>>,
}

impl<T> Clone for TransactionPool<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<T: PoolTransaction> Default for TransactionPool<T> {
    fn default() -> Self {
        Self::new(MempoolConfig::default())
    }
}

impl<T: PoolTransaction> TransactionPool<T> {
    /// Creates an empty pool.
    pub fn new(config: MempoolConfig) -> Self {
        Self {
            config,
            entries: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Creates a pool from `txs`, applying the same checks as `admit_batch`.
    pub fn from_transactions<I>(config: MempoolConfig, txs: I) -> Result<Self, MempoolError>
    where
        I: IntoIterator<Item = T>,
    {
        Self::new(config).admit_batch(txs)
    }

    pub fn config(&self) -> &MempoolConfig {
        &self.config
    }

    /// Returns true if both handles share one backing map.
    pub fn shares_store_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub fn lookup(&self, id: &TxId) -> Option<T> {
        self.entries.read().get(id).cloned()
    }

    pub fn contains(&self, id: &TxId) -> bool {
        self.entries.read().contains_key(id)
    }

    pub fn size(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the pooled transactions among `ids`, in request order.
    ///
    /// Unknown ids are skipped.
    pub fn get_many(&self, ids: &[TxId]) -> Vec<T> {
        let entries = self.entries.read();
        ids.iter().filter_map(|id| entries.get(id).cloned()).collect()
    }

    /// Returns up to `limit` transactions with the highest fees.
    ///
    /// Equal fees are ordered by ascending id.
    pub fn take_top(&self, limit: usize) -> Vec<T> {
        if limit == 0 {
            return Vec::new();
        }
        let entries = self.entries.read();
        let mut ranked: Vec<&T> = entries.values().collect();
        // stable: the map already yields ascending ids
        ranked.sort_by(|a, b| b.fee().cmp(&a.fee()));
        ranked.into_iter().take(limit).cloned().collect()
    }

    /// Returns the ids among `ids` this pool does not hold.
    pub fn not_in(&self, ids: &[TxId]) -> Vec<TxId> {
        let entries = self.entries.read();
        ids.iter()
            .filter(|id| !entries.contains_key(*id))
            .copied()
            .collect()
    }

    /// Returns every pooled transaction, ordered by id.
    pub fn transactions(&self) -> Vec<T> {
        self.entries.read().values().cloned().collect()
    }

    pub fn total_fees(&self) -> u128 {
        self.entries
            .read()
            .values()
            .map(|tx| u128::from(tx.fee()))
            .sum()
    }

    // =========================================================================
    // SNAPSHOT WRITES
    // =========================================================================

    /// Returns a new pool holding every transaction of this one plus `tx`.
    ///
    /// # Errors
    /// - `DuplicateTransaction` if `tx.id()` is already pooled
    /// - `Incompatible` if the transaction's checker reports a conflict
    /// - `PoolFull` if the pool holds `max_transactions`
    pub fn admit(&self, tx: T) -> Result<Self, MempoolError> {
        let mut entries = self.snapshot();
        if let Err(err) = self.check_admission(&entries, &tx) {
            tracing::debug!("[sc-02] Rejected transaction: {}", err);
            return Err(err);
        }
        tracing::debug!(
            "[sc-02] Admitted transaction {} (fee {})",
            short_hex(&tx.id()),
            tx.fee()
        );
        entries.insert(tx.id(), tx);
        Ok(self.derive(entries))
    }

    /// Admits `txs` in order, all or nothing.
    ///
    /// Each candidate is checked against this pool plus the candidates before
    /// it. On the first failure the error is returned and this pool is left
    /// as it was.
    pub fn admit_batch<I>(&self, txs: I) -> Result<Self, MempoolError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut entries = self.snapshot();
        let mut admitted = 0usize;
        for tx in txs {
            if let Err(err) = self.check_admission(&entries, &tx) {
                tracing::debug!(
                    "[sc-02] Batch rejected after {} admissions: {}",
                    admitted,
                    err
                );
                return Err(err);
            }
            entries.insert(tx.id(), tx);
            admitted += 1;
        }
        Ok(self.derive(entries))
    }

    /// Returns a new pool without `id`. Absent ids are ignored.
    pub fn evict(&self, id: &TxId) -> Self {
        let mut entries = self.snapshot();
        entries.remove(id);
        self.derive(entries)
    }

    /// Returns a new pool without any of `ids`.
    pub fn evict_many(&self, ids: &[TxId]) -> Self {
        let doomed: HashSet<&TxId> = ids.iter().collect();
        let mut entries = self.snapshot();
        entries.retain(|id, _| !doomed.contains(id));
        self.derive(entries)
    }

    // =========================================================================
    // IN-PLACE MAINTENANCE
    // =========================================================================

    /// Drops every transaction failing `predicate` from the shared map.
    ///
    /// Every handle cloned from this one observes the removal. The returned
    /// handle shares the same map. Intended for a single maintenance caller.
    pub fn retain<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let removed = {
            let mut entries = self.entries.write();
            let before = entries.len();
            entries.retain(|_, tx| predicate(tx));
            before - entries.len()
        };
        if removed > 0 {
            tracing::info!("[sc-02] Retain dropped {} transactions", removed);
        }
        self.clone()
    }

    /// Unchecked insertion is not offered.
    pub fn put_without_check(&self, _txs: Vec<T>) -> Result<Self, MempoolError> {
        Err(MempoolError::UnsupportedOperation("put_without_check"))
    }

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn snapshot(&self) -> Entries<T> {
        self.entries.read().clone()
    }

    fn derive(&self, entries: Entries<T>) -> Self {
        Self {
            config: self.config.clone(),
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    fn check_admission(&self, entries: &Entries<T>, tx: &T) -> Result<(), MempoolError> {
        let id = tx.id();
        if entries.contains_key(&id) {
            return Err(MempoolError::DuplicateTransaction(id));
        }

        let pooled: Vec<&T> = entries.values().collect();
        if tx.incompatibility_checker().has_conflict(tx, &pooled) {
            return Err(MempoolError::Incompatible(id));
        }

        if entries.len() >= self.config.max_transactions {
            return Err(MempoolError::PoolFull {
                capacity: self.config.max_transactions,
            });
        }
        Ok(())
    }
}

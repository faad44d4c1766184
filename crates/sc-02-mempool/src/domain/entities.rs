//! Core domain entities for the Mempool subsystem.

use crate::ports::IncompatibilityChecker;

pub use shared_types::{Hash, TxId};

/// A transaction the pool can hold.
///
/// The pool is agnostic of transaction kinds: each kind supplies its own
/// incompatibility rule through `incompatibility_checker`.
///
/// INVARIANT: `id()` is unique within any pool snapshot.
pub trait PoolTransaction: Clone + Send + Sync + 'static {
    /// Unique transaction identifier.
    fn id(&self) -> TxId;

    /// Fee used for prioritization (higher first).
    fn fee(&self) -> u64;

    /// Identifiers of the state entries this transaction consumes.
    fn spent_ids(&self) -> Vec<Hash> {
        Vec::new()
    }

    /// Conflict rule for this transaction's kind.
    fn incompatibility_checker(&self) -> &dyn IncompatibilityChecker<Self>;
}

/// Mempool configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MempoolConfig {
    /// Maximum transactions in the pool.
    pub max_transactions: usize,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            max_transactions: 50_000,
        }
    }
}

impl MempoolConfig {
    /// Creates a minimal config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_transactions: 100,
        }
    }
}

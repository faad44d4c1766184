//! Mempool error types.
//!
//! Every failing pool operation leaves the snapshot it was called on untouched.

use shared_types::{short_hex, TxId};
use thiserror::Error;

/// Mempool error type.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MempoolError {
    /// The candidate conflicts with a pooled transaction.
    #[error("Transaction {} is incompatible with the pool", short_hex(.0))]
    Incompatible(TxId),

    /// A transaction with the same id is already pooled.
    #[error("Duplicate transaction: {}", short_hex(.0))]
    DuplicateTransaction(TxId),

    /// Pool has reached maximum capacity.
    #[error("Pool full at {capacity} transactions")]
    PoolFull { capacity: usize },

    /// The operation is not available.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(&'static str),
}

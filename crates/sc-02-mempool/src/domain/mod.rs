//! # Domain Layer - Mempool Subsystem
//!
//! - `pool`: TransactionPool snapshots
//! - `entities`: PoolTransaction, MempoolConfig
//! - `checkers`: AlwaysCompatible, DoubleSpendChecker
//! - `errors`: MempoolError

pub mod checkers;
pub mod entities;
pub mod errors;
pub mod pool;

pub use checkers::*;
pub use entities::*;
pub use errors::*;
pub use pool::*;

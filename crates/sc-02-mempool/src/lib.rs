//! # Transaction Pool (Mempool) Subsystem
//!
//! Holds transactions waiting for inclusion in a sidechain block. The pool is
//! a snapshot: every write that adds or evicts transactions yields a new pool
//! and leaves the old one intact, so a block forger can keep reading a stable
//! view while new transactions arrive.
//!
//! ## Guarantees
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | Unique ids per snapshot | `BTreeMap<TxId, T>` + `DuplicateTransaction` |
//! | No conflicting transactions | `IncompatibilityChecker` per transaction kind |
//! | Batches admit all or nothing | `admit_batch` works on a private copy |
//! | Readers never see a half-written map | `parking_lot::RwLock` |
//! | Deterministic prioritization | fee descending, then ascending id |
//!
//! ## Snapshot Semantics
//!
//! ```text
//! [pool A] ──admit / admit_batch / evict / evict_many──→ [pool B]   (A intact)
//! [pool A] ──retain──→ [pool A]   (filtered in place, seen by all clones of A)
//! ```
//!
//! `retain` is meant for one maintenance caller, e.g. dropping transactions
//! invalidated by a newly applied block.
//!
//! ## Module Structure
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs - IncompatibilityChecker              │
//! └──────────────────────────────────────────────────────────┘
//!                        ↑ uses ↑
//! ┌──────────────────────────────────────────────────────────┐
//! │  domain/pool.rs     - TransactionPool                    │
//! │  domain/checkers.rs - AlwaysCompatible, DoubleSpend      │
//! │  domain/entities.rs - PoolTransaction, MempoolConfig     │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;

//! # Application State Subsystem
//!
//! Keeps the sidechain's application state in several versioned key/value
//! stores and makes them behave as one: every block is committed to every
//! store under the block's id, and rollbacks move all stores together.
//!
//! ## Commit Flow
//!
//! ```text
//! on_apply_changes(block) ──→ [store 0].update(block) ──→ [store 1].update(block) ──→ ...
//!                                   │ failure                 │ failure
//!                                   ↓                         ↓
//!                         Err(Storage{0}), unaligned   Err(Storage{1}), store 0 ahead
//! ```
//!
//! There is no two-phase commit. A failure mid-way leaves the earlier stores
//! one version ahead; the adapter then refuses new commits until `recover`
//! rolls them back.
//!
//! ## Recovery
//!
//! | Store tips | Outcome |
//! |------------|---------|
//! | all equal | nothing to do |
//! | one store behind the others | others rolled back to its tip |
//! | unrelated tips | `StateError::Consistency` (operator resync) |
//! | empty store next to non-empty ones | `StateError::Consistency` |
//!
//! ## Module Structure
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - ApplicationState                          │
//! │  ports/outbound.rs - VersionedStore                            │
//! └────────────────────────────────────────────────────────────────┘
//!          ↑ implements                      ↑ implements
//! ┌──────────────────────────────┐  ┌─────────────────────────────┐
//! │  domain/multi_store.rs       │  │  adapters/memory_store.rs   │
//! │  domain/recovery.rs          │  │  InMemoryVersionedStore     │
//! └──────────────────────────────┘  └─────────────────────────────┘
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::*;
pub use domain::*;
pub use ports::*;

//! # Domain Layer - Application State Subsystem
//!
//! - `multi_store`: MultiStoreState (commit, rollback, recovery driver)
//! - `recovery`: pure recovery planning
//! - `entities`: StateConfig, RecoveryReport
//! - `errors`: StateError

pub mod entities;
pub mod errors;
pub mod multi_store;
pub mod recovery;

pub use entities::*;
pub use errors::*;
pub use multi_store::*;
pub use recovery::*;

//! # Shared Types Crate
//!
//! Identifier aliases and error types used by more than one subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: block ids, version ids and transaction ids are
//!   all 32-byte values and are defined once here.
//! - **Engine-agnostic storage errors**: `StorageError` is what every
//!   `VersionedStore` implementation reports, whatever engine sits behind it.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;

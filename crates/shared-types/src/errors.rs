//! # Error Types
//!
//! Defines error types used across subsystems.

use crate::entities::{short_hex, VersionId};
use thiserror::Error;

/// Errors reported by a versioned key/value store.
///
/// Storage failures are never retried by the callers in this workspace: a
/// failed `update` or `rollback` aborts the in-flight block application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The version was already committed to this store.
    #[error("Version {} already committed", short_hex(.0))]
    VersionExists(VersionId),

    /// The version is not part of this store's history.
    #[error("Version {} not found in store history", short_hex(.0))]
    VersionNotFound(VersionId),

    /// The underlying engine failed (I/O, corruption, ...).
    #[error("Storage backend error: {0}")]
    Backend(String),
}

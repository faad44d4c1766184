//! Outbound (Driven) ports: the versioned key/value stores the application
//! state is composed of.

use shared_types::{StorageError, StorageKey, StorageValue, VersionId};
use std::sync::Arc;

/// A key/value store whose every commit is tagged with a version id.
///
/// Calls are synchronous and may block on durable I/O. Failures are final
/// for the operation that reported them; callers do not retry.
pub trait VersionedStore: Send + Sync {
    /// Commits `upserts` then `deletes` as `version`.
    ///
    /// # Errors
    /// `VersionExists` if `version` is already in this store's history.
    fn update(
        &self,
        version: &VersionId,
        upserts: &[(StorageKey, StorageValue)],
        deletes: &[StorageKey],
    ) -> Result<(), StorageError>;

    /// Restores the state as committed by `version`, dropping later commits.
    ///
    /// # Errors
    /// `VersionNotFound` if `version` is not in this store's history.
    fn rollback(&self, version: &VersionId) -> Result<(), StorageError>;

    /// Latest committed version, `None` for a store without history.
    fn last_version_id(&self) -> Result<Option<VersionId>, StorageError>;

    fn get(&self, key: &[u8]) -> Result<Option<StorageValue>, StorageError>;

    /// Up to `max` committed versions, newest first.
    fn rollback_versions(&self, max: usize) -> Result<Vec<VersionId>, StorageError>;

    fn contains_version(&self, version: &VersionId) -> Result<bool, StorageError> {
        Ok(self.rollback_versions(usize::MAX)?.contains(version))
    }
}

impl<S: VersionedStore + ?Sized> VersionedStore for Arc<S> {
    fn update(
        &self,
        version: &VersionId,
        upserts: &[(StorageKey, StorageValue)],
        deletes: &[StorageKey],
    ) -> Result<(), StorageError> {
        (**self).update(version, upserts, deletes)
    }

    fn rollback(&self, version: &VersionId) -> Result<(), StorageError> {
        (**self).rollback(version)
    }

    fn last_version_id(&self) -> Result<Option<VersionId>, StorageError> {
        (**self).last_version_id()
    }

    fn get(&self, key: &[u8]) -> Result<Option<StorageValue>, StorageError> {
        (**self).get(key)
    }

    fn rollback_versions(&self, max: usize) -> Result<Vec<VersionId>, StorageError> {
        (**self).rollback_versions(max)
    }

    fn contains_version(&self, version: &VersionId) -> Result<bool, StorageError> {
        (**self).contains_version(version)
    }
}

use crate::ports::VersionedStore;
use parking_lot::RwLock;
use shared_types::{short_hex, StorageError, StorageKey, StorageValue, VersionId};
use std::collections::HashMap;

/// One committed version and the prior values it overwrote.
#[derive(Debug)]
struct Commit {
    version: VersionId,
    undo: Vec<(StorageKey, Option<StorageValue>)>,
}

#[derive(Debug, Default)]
struct StoreInner {
    data: HashMap<StorageKey, StorageValue>,
    /// Oldest first.
    history: Vec<Commit>,
    updates_before_failure: Option<usize>,
}

impl StoreInner {
    fn position(&self, version: &VersionId) -> Option<usize> {
        self.history.iter().position(|c| c.version == *version)
    }
}

/// In-memory implementation of VersionedStore with an undo log per version.
#[derive(Debug, Default)]
pub struct InMemoryVersionedStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryVersionedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that accepts `n` more updates, then fails every update with a
    /// backend error.
    pub fn with_failure_after(n: usize) -> Self {
        let store = Self::new();
        store.set_failure_after(Some(n));
        store
    }

    /// Arms (`Some(n)`) or disarms (`None`) update fault injection.
    pub fn set_failure_after(&self, n: Option<usize>) {
        self.inner.write().updates_before_failure = n;
    }

    pub fn len(&self) -> usize {
        self.inner.read().data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().data.is_empty()
    }

    pub fn version_count(&self) -> usize {
        self.inner.read().history.len()
    }
}

impl VersionedStore for InMemoryVersionedStore {
    fn update(
        &self,
        version: &VersionId,
        upserts: &[(StorageKey, StorageValue)],
        deletes: &[StorageKey],
    ) -> Result<(), StorageError> {
        let mut inner = self.inner.write();

        let remaining = inner.updates_before_failure;
        match remaining {
            Some(0) => {
                return Err(StorageError::Backend(format!(
                    "injected failure at version {}",
                    short_hex(version)
                )))
            }
            Some(n) => inner.updates_before_failure = Some(n - 1),
            None => {}
        }

        if inner.position(version).is_some() {
            return Err(StorageError::VersionExists(*version));
        }

        let mut undo = Vec::with_capacity(upserts.len() + deletes.len());
        for (key, value) in upserts {
            let prior = inner.data.insert(key.clone(), value.clone());
            undo.push((key.clone(), prior));
        }
        for key in deletes {
            let prior = inner.data.remove(key);
            undo.push((key.clone(), prior));
        }

        inner.history.push(Commit {
            version: *version,
            undo,
        });
        Ok(())
    }

    fn rollback(&self, version: &VersionId) -> Result<(), StorageError> {
        let mut inner = self.inner.write();
        let position = inner
            .position(version)
            .ok_or(StorageError::VersionNotFound(*version))?;

        let reverted = inner.history.split_off(position + 1);
        for commit in reverted.into_iter().rev() {
            for (key, prior) in commit.undo.into_iter().rev() {
                match prior {
                    Some(value) => inner.data.insert(key, value),
                    None => inner.data.remove(&key),
                };
            }
        }
        Ok(())
    }

    fn last_version_id(&self) -> Result<Option<VersionId>, StorageError> {
        Ok(self.inner.read().history.last().map(|c| c.version))
    }

    fn get(&self, key: &[u8]) -> Result<Option<StorageValue>, StorageError> {
        Ok(self.inner.read().data.get(key).cloned())
    }

    fn rollback_versions(&self, max: usize) -> Result<Vec<VersionId>, StorageError> {
        Ok(self
            .inner
            .read()
            .history
            .iter()
            .rev()
            .take(max)
            .map(|c| c.version)
            .collect())
    }

    fn contains_version(&self, version: &VersionId) -> Result<bool, StorageError> {
        Ok(self.inner.read().position(version).is_some())
    }
}

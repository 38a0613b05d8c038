//! In-memory storage backend.

use crate::error::StoreError;
use crate::filter::ResourceFilter;
use crate::traits::ResourceStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// Process-lifetime store backed by a `HashMap` behind a `RwLock`.
///
/// Readers share the lock; each write takes it exclusively for the duration
/// of a single map operation.
#[derive(Debug)]
pub struct InMemoryStore<R> {
    entries: RwLock<HashMap<Uuid, R>>,
}

impl<R> InMemoryStore<R> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<R> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ResourceStore<R> for InMemoryStore<R>
where
    R: Clone + Send + Sync,
{
    fn get(&self, id: &Uuid) -> Result<Option<R>, StoreError> {
        Ok(self.entries.read().get(id).cloned())
    }

    fn put(&self, id: Uuid, resource: R) -> Result<Option<R>, StoreError> {
        Ok(self.entries.write().insert(id, resource))
    }

    fn delete(&self, id: &Uuid) -> Result<Option<R>, StoreError> {
        Ok(self.entries.write().remove(id))
    }

    fn contains(&self, id: &Uuid) -> Result<bool, StoreError> {
        Ok(self.entries.read().contains_key(id))
    }

    fn list(&self, filter: &dyn ResourceFilter<R>) -> Result<Vec<R>, StoreError> {
        Ok(self
            .entries
            .read()
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

//! Per-identifier write serialization.
//!
//! A precondition check and the write it guards must be one step. Holding
//! the [`KeyGuard`] for an identifier across both keeps two writers from
//! validating against the same version.

use dashmap::DashMap;
use parking_lot::{Mutex, RawMutex};
use std::sync::Arc;
use uuid::Uuid;

/// Guard returned by [`KeyLocks::acquire`]; the identifier stays locked
/// until it is dropped.
pub type KeyGuard = parking_lot::lock_api::ArcMutexGuard<RawMutex, ()>;

/// Lazily created mutex per identifier.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl KeyLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Blocks until the write lock for `id` is held.
    pub fn acquire(&self, id: Uuid) -> KeyGuard {
        // Clone the Arc out so the DashMap shard is released before blocking.
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_arc()
    }

    /// Drops the lock entry for an identifier that no longer exists.
    ///
    /// A writer still waiting on the old mutex will find the resource absent
    /// once it gets in.
    pub fn remove(&self, id: &Uuid) {
        self.locks.remove(id);
        tracing::trace!(%id, "released key lock entry");
    }

    /// Number of identifiers with a lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns true if no lock entries exist.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

//! Storage backend traits.

use crate::error::StoreError;
use crate::filter::ResourceFilter;
use uuid::Uuid;

/// Keyed storage for one resource kind.
///
/// A store holds at most one live value per identifier. Implementations must
/// make each individual call atomic; sequences of calls (check then write)
/// are serialized by the caller through [`crate::KeyLocks`].
pub trait ResourceStore<R>: Send + Sync {
    /// Returns the current value for `id`, if any.
    fn get(&self, id: &Uuid) -> Result<Option<R>, StoreError>;

    /// Stores `resource` under `id`, returning the value it replaced.
    fn put(&self, id: Uuid, resource: R) -> Result<Option<R>, StoreError>;

    /// Removes `id`, returning the value that was stored.
    fn delete(&self, id: &Uuid) -> Result<Option<R>, StoreError>;

    /// Returns true if a value is stored under `id`.
    fn contains(&self, id: &Uuid) -> Result<bool, StoreError>;

    /// Returns every stored value accepted by `filter`, in no particular order.
    fn list(&self, filter: &dyn ResourceFilter<R>) -> Result<Vec<R>, StoreError>;
}

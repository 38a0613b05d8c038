//! Resource filtering API for selective listing.

/// Trait for filtering resources during listing.
pub trait ResourceFilter<R> {
    /// Returns true if the resource matches the filter criteria.
    fn matches(&self, resource: &R) -> bool;
}

//! Cache Builder Module
//!
//! Fluent construction of a size-bounded cache from a budget, an estimator
//! and a clock.

use crate::cache::{BoundedLruCache, Clock, JsonSizeEstimator, SizeEstimator, SystemClock};
use crate::cache::DEFAULT_CAPACITY_BYTES;

// == Cache Builder ==
/// Builder for configuring a [`BoundedLruCache`].
///
/// # Example
///
/// ```
/// use kv_lru::cache::{BoundedLruCache, CacheBuilder};
///
/// let cache: BoundedLruCache<String> = CacheBuilder::new(1024 * 1024).build();
/// assert_eq!(cache.capacity(), 1024 * 1024);
/// ```
pub struct CacheBuilder<E = JsonSizeEstimator, C = SystemClock> {
    capacity_bytes: u64,
    estimator: E,
    clock: C,
}

impl CacheBuilder {
    // == Constructor ==
    /// Create a new builder with the given size budget in bytes.
    pub fn new(capacity_bytes: u64) -> Self {
        Self {
            capacity_bytes,
            estimator: JsonSizeEstimator,
            clock: SystemClock,
        }
    }
}

impl<E, C> CacheBuilder<E, C> {
    // == Setters ==
    /// Set the size budget in bytes.
    pub fn capacity(mut self, capacity_bytes: u64) -> Self {
        self.capacity_bytes = capacity_bytes;
        self
    }

    /// Replace the size estimator.
    ///
    /// Default: [`JsonSizeEstimator`]
    pub fn estimator<E2>(self, estimator: E2) -> CacheBuilder<E2, C> {
        CacheBuilder {
            capacity_bytes: self.capacity_bytes,
            estimator,
            clock: self.clock,
        }
    }

    /// Replace the time source used for TTL expiry.
    ///
    /// Default: [`SystemClock`]
    pub fn clock<C2>(self, clock: C2) -> CacheBuilder<E, C2> {
        CacheBuilder {
            capacity_bytes: self.capacity_bytes,
            estimator: self.estimator,
            clock,
        }
    }

    // == Build ==
    /// Build the cache with the configured settings.
    pub fn build<V>(self) -> BoundedLruCache<V, E, C>
    where
        E: SizeEstimator<V>,
        C: Clock,
    {
        BoundedLruCache::with_parts(self.capacity_bytes, self.estimator, self.clock)
    }
}

// == Default Implementation ==
impl Default for CacheBuilder {
    /// Create a builder with the default 30 MiB budget.
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY_BYTES)
    }
}

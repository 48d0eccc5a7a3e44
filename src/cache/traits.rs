//! Store Trait Module
//!
//! The backing-store capability a key-value facade programs against.

use std::time::Duration;

use crate::cache::{BoundedLruCache, Clock, SizeEstimator};
use crate::error::{CacheError, Result};

// == Store Trait ==
/// Backing store consumed by a key-value store facade.
///
/// The facade owns namespacing and serialization adapters; it only needs
/// these operations from whatever sits underneath, so it can hold a
/// `Box<dyn Store<V>>` and swap implementations.
///
/// # Example
///
/// ```
/// use kv_lru::cache::{BoundedLruCache, Store};
///
/// let mut store: Box<dyn Store<String>> = Box::new(BoundedLruCache::<String>::new(1024));
/// store.set("greeting".to_string(), "hello".to_string(), None).unwrap();
/// assert_eq!(store.get("greeting"), Some("hello".to_string()));
/// assert_eq!(store.total_size().unwrap(), 7);
/// ```
pub trait Store<V> {
    /// Stores `value` under `key`, expiring after `ttl` if given.
    fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()>;

    /// Returns the live value under `key`, if any.
    fn get(&mut self, key: &str) -> Option<V>;

    /// Removes `key`. Returns whether it was present.
    fn delete(&mut self, key: &str) -> bool;

    /// Removes every entry.
    fn clear(&mut self);

    /// Total charged size of the stored entries.
    ///
    /// Stores that do not track size keep this default and report
    /// `CacheError::NotSupported`.
    fn total_size(&self) -> Result<u64> {
        Err(CacheError::NotSupported(
            "store does not track entry sizes".to_string(),
        ))
    }
}

// == Bounded Cache Implementation ==
impl<V, E, C> Store<V> for BoundedLruCache<V, E, C>
where
    V: Clone,
    E: SizeEstimator<V>,
    C: Clock,
{
    fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()> {
        BoundedLruCache::set(self, key, value, ttl)
    }

    fn get(&mut self, key: &str) -> Option<V> {
        BoundedLruCache::get(self, key)
    }

    fn delete(&mut self, key: &str) -> bool {
        BoundedLruCache::delete(self, key)
    }

    fn clear(&mut self) {
        BoundedLruCache::clear(self)
    }

    fn total_size(&self) -> Result<u64> {
        Ok(BoundedLruCache::total_size(self))
    }
}

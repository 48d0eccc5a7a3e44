//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, a byte
//! budget and lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{
    CacheEntry, CacheStats, Clock, JsonSizeEstimator, LruTracker, SizeEstimator, SystemClock,
};
use crate::error::Result;

// == Bounded LRU Cache ==
/// Size-bounded cache with LRU eviction and lazy TTL expiry.
///
/// Every entry is charged the size reported by the estimator. Before each
/// `set` lands, least recently used entries are evicted one at a time until
/// the new entry fits the capacity. A single entry larger than the
/// whole capacity is still admitted; it then evicts everything else and
/// leaves the cache over budget until it is removed.
///
/// Expired entries keep counting toward `total_size` until a `get`, a
/// `purge_expired` or an eviction removes them.
///
/// The cache assumes one logical owner. Share it behind a single lock.
#[derive(Debug)]
pub struct BoundedLruCache<V, E = JsonSizeEstimator, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Sum of `size_bytes` over all entries
    total_size: u64,
    /// Maximum total size in bytes
    capacity: u64,
    /// Charges each value against the budget
    estimator: E,
    /// Time source for TTL expiry
    clock: C,
    /// Performance statistics
    stats: CacheStats,
}

impl<V> BoundedLruCache<V>
where
    V: serde::Serialize,
{
    // == Constructor ==
    /// Creates a cache charging JSON-encoded size against `capacity_bytes`.
    pub fn new(capacity_bytes: u64) -> Self {
        Self::with_parts(capacity_bytes, JsonSizeEstimator, SystemClock)
    }
}

impl<V, E, C> BoundedLruCache<V, E, C>
where
    E: SizeEstimator<V>,
    C: Clock,
{
    /// Creates a cache from an explicit estimator and clock.
    ///
    /// Prefer [`CacheBuilder`](crate::cache::CacheBuilder) outside of tests.
    pub fn with_parts(capacity_bytes: u64, estimator: E, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            total_size: 0,
            capacity: capacity_bytes,
            estimator,
            clock,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a value under `key`, optionally expiring after `ttl`.
    ///
    /// The size is estimated before anything changes, so a value that cannot
    /// be measured is rejected with `CacheError::Serialization` and the cache
    /// is left exactly as it was. Overwriting a key replaces its size
    /// contribution and resets its TTL.
    pub fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()> {
        let size_bytes = self.estimator.estimate(&value)?;
        let now = self.clock.now_ms();

        self.remove_entry(&key);

        if size_bytes > self.capacity {
            warn!(
                key = %key,
                size_bytes,
                capacity = self.capacity,
                "Entry exceeds cache capacity on its own; admitting it over budget"
            );
        }

        self.make_room(size_bytes);

        // Either the total plus the new size fits the capacity or the cache is empty
        self.entries
            .insert(key.clone(), CacheEntry::new(value, size_bytes, now, ttl));
        self.total_size += size_bytes;
        self.lru.touch(&key);
        Ok(())
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// An expired entry is removed on the spot and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(key = %key, "Lazily expired entry on read");
            return None;
        }

        self.lru.touch(key);
        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry and resets the running size.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.total_size = 0;
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
            self.stats.record_expiration();
        }

        expired_keys.len()
    }

    // == Eviction ==
    /// Evicts least recently used entries until `incoming` more bytes fit the
    /// budget, or until the cache is empty.
    ///
    /// An incoming entry larger than the capacity therefore ends up alone.
    fn make_room(&mut self, incoming: u64) {
        while !self.entries.is_empty() && self.total_size.saturating_add(incoming) > self.capacity {
            let Some(oldest) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                self.total_size -= evicted.size_bytes;
                self.stats.record_eviction();
                debug!(
                    key = %oldest,
                    size_bytes = evicted.size_bytes,
                    total_size = self.total_size,
                    "Evicted least recently used entry"
                );
            }
        }
    }

    /// Removes one whole entry: value, size debit and recency slot together.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(key);
        self.total_size -= entry.size_bytes;
        Some(entry)
    }
}

impl<V, E, C> BoundedLruCache<V, E, C> {
    // == Total Size ==
    /// Returns the sum of charged sizes of all resident entries.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Returns the size budget in bytes.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks residency without touching recency or expiring the entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the size charged for `key`, without touching recency.
    pub fn entry_size(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.size_bytes)
    }

    /// Iterates resident keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.lru.iter()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            total_size: self.total_size,
            capacity: self.capacity,
            ..self.stats.clone()
        }
    }
}

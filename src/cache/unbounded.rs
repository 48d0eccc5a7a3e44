//! Unbounded Store Module
//!
//! Plain map store with lazy TTL expiry and no size accounting. Useful as a
//! backing store when no memory budget is wanted.

use std::collections::HashMap;
use std::time::Duration;

use crate::cache::{CacheEntry, Clock, Store, SystemClock};
use crate::error::Result;

// == Unbounded Store ==
/// Store without a size budget. Never evicts; `total_size` is unsupported.
#[derive(Debug)]
pub struct UnboundedStore<V, C = SystemClock> {
    entries: HashMap<String, CacheEntry<V>>,
    clock: C,
}

impl<V> UnboundedStore<V> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<V> Default for UnboundedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> UnboundedStore<V, C> {
    /// Creates a store reading expiry time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V, C> Store<V> for UnboundedStore<V, C>
where
    V: Clone,
    C: Clock,
{
    fn set(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<()> {
        // Size is not tracked
        let entry = CacheEntry::new(value, 0, self.clock.now_ms(), ttl);
        self.entries.insert(key, entry);
        Ok(())
    }

    fn get(&mut self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();
        if self.entries.get(key)?.is_expired(now) {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

//! Cache Module
//!
//! Provides a size-bounded in-memory cache with LRU eviction and lazy TTL expiration.

mod builder;
mod clock;
mod entry;
mod lru;
mod size;
mod stats;
mod store;
mod traits;
mod unbounded;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use builder::CacheBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use size::{json_size, FnEstimator, JsonSizeEstimator, SizeEstimator};
pub use stats::CacheStats;
pub use store::BoundedLruCache;
pub use traits::Store;
pub use unbounded::UnboundedStore;

// == Public Constants ==
/// Default size budget: 30 MiB
pub const DEFAULT_CAPACITY_BYTES: u64 = 30 * 1024 * 1024;

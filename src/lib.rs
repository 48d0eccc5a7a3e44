//! kv_lru - A size-bounded in-memory LRU store
//!
//! Holds serializable values under string keys, charges each one its
//! JSON-encoded size against a byte budget, evicts least recently used
//! entries when the budget is exceeded and expires entries lazily by TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedLruCache, CacheBuilder, Store};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;

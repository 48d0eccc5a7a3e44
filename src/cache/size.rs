//! Size Estimator Module
//!
//! Approximates how many bytes a value occupies by measuring its JSON
//! encoding. The same number is charged against the cache budget and reported
//! as footprint, so the two never drift apart.

use serde::Serialize;

use crate::error::Result;

// == Size Estimator Trait ==
/// Computes the charged size of a cached value.
///
/// Implementations must be deterministic: the same value always yields the
/// same size, otherwise eviction decisions stop being comparable.
pub trait SizeEstimator<V: ?Sized>: Send + Sync {
    /// Returns the approximate size of `value` in bytes.
    fn estimate(&self, value: &V) -> Result<u64>;
}

// == JSON Estimator ==
/// Default estimator: byte length of the `serde_json` encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSizeEstimator;

impl<V> SizeEstimator<V> for JsonSizeEstimator
where
    V: Serialize + ?Sized,
{
    fn estimate(&self, value: &V) -> Result<u64> {
        json_size(value)
    }
}

/// Returns the UTF-8 byte length of `value` encoded as JSON.
///
/// Fails when the value cannot be serialized (non-string map keys, a
/// `Serialize` impl that reports an error).
pub fn json_size<V>(value: &V) -> Result<u64>
where
    V: Serialize + ?Sized,
{
    let encoded = serde_json::to_vec(value)?;
    Ok(encoded.len() as u64)
}

// == Closure Estimator ==
/// Estimator backed by an infallible closure.
///
/// ```
/// use kv_lru::cache::{BoundedLruCache, CacheBuilder, FnEstimator};
///
/// let cache: BoundedLruCache<Vec<u8>, _> = CacheBuilder::new(1024)
///     .estimator(FnEstimator(|bytes: &Vec<u8>| bytes.len() as u64))
///     .build();
/// assert_eq!(cache.capacity(), 1024);
/// ```
pub struct FnEstimator<F>(pub F);

impl<V, F> SizeEstimator<V> for FnEstimator<F>
where
    V: ?Sized,
    F: Fn(&V) -> u64 + Send + Sync,
{
    fn estimate(&self, value: &V) -> Result<u64> {
        Ok((self.0)(value))
    }
}

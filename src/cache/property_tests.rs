//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the size accounting, eviction order and expiry rules.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{BoundedLruCache, FnEstimator, ManualClock};

// == Test Configuration ==
const TEST_CAPACITY: u64 = 1_000;

type LenCache = BoundedLruCache<String, FnEstimator<fn(&String) -> u64>, ManualClock>;

fn len_cache(capacity: u64) -> (LenCache, ManualClock) {
    let clock = ManualClock::new(0);
    let estimator: FnEstimator<fn(&String) -> u64> = FnEstimator(|s: &String| s.len() as u64);
    (
        BoundedLruCache::with_parts(capacity, estimator, clock.clone()),
        clock,
    )
}

// == Strategies ==
/// Generates cache keys from a small alphabet so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

/// Generates values up to just over the test capacity
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,1100}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String, ttl_ms: Option<u64> },
    Get { key: String },
    Delete { key: String },
    Advance { ms: u64 },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy(), prop::option::of(1u64..500))
            .prop_map(|(key, value, ttl_ms)| CacheOp::Set { key, value, ttl_ms }),
        4 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => key_strategy().prop_map(|key| CacheOp::Delete { key }),
        2 => (1u64..300).prop_map(|ms| CacheOp::Advance { ms }),
        1 => Just(CacheOp::Clear),
    ]
}

fn apply(cache: &mut LenCache, clock: &ManualClock, op: CacheOp) {
    match op {
        CacheOp::Set { key, value, ttl_ms } => {
            cache
                .set(key, value, ttl_ms.map(Duration::from_millis))
                .unwrap();
        }
        CacheOp::Get { key } => {
            let _ = cache.get(&key);
        }
        CacheOp::Delete { key } => {
            let _ = cache.delete(&key);
        }
        CacheOp::Advance { ms } => clock.advance(Duration::from_millis(ms)),
        CacheOp::Clear => cache.clear(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // *For any* sequence of operations, the running total equals the sum of the
    // charged sizes of resident entries, and recency order holds exactly the
    // resident keys.
    #[test]
    fn prop_total_size_matches_resident_sum(ops in prop::collection::vec(cache_op_strategy(), 1..60)) {
        let (mut cache, clock) = len_cache(TEST_CAPACITY);

        for op in ops {
            apply(&mut cache, &clock, op);

            let keys: Vec<String> = cache.keys().map(str::to_owned).collect();
            let unique: HashSet<&String> = keys.iter().collect();
            prop_assert_eq!(unique.len(), keys.len(), "Recency order has duplicates");
            prop_assert_eq!(keys.len(), cache.len(), "Recency order out of sync with entries");

            let sum: u64 = keys
                .iter()
                .map(|key| cache.entry_size(key).unwrap())
                .sum();
            prop_assert_eq!(cache.total_size(), sum, "Running total drifted");
        }
    }

    // *For any* sequence of SET operations, the budget holds after each one
    // unless the entry just written is alone and larger than the budget.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..80)
    ) {
        let (mut cache, _) = len_cache(TEST_CAPACITY);

        for (key, value) in entries {
            let size = value.len() as u64;
            cache.set(key.clone(), value, None).unwrap();

            if size > TEST_CAPACITY {
                prop_assert_eq!(cache.len(), 1);
                prop_assert!(cache.contains_key(&key));
                prop_assert_eq!(cache.total_size(), size);
            } else {
                prop_assert!(
                    cache.total_size() <= TEST_CAPACITY,
                    "Total size {} exceeds capacity {}",
                    cache.total_size(),
                    TEST_CAPACITY
                );
            }
            // The entry just written is never the one evicted
            prop_assert!(cache.contains_key(&key));
        }
    }

    // *For any* value, storing and then immediately retrieving it returns the
    // same value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in "[^\"]{0,200}") {
        let mut cache: BoundedLruCache<String> = BoundedLruCache::new(TEST_CAPACITY);

        cache.set(key.clone(), value.clone(), None).unwrap();

        prop_assert_eq!(cache.get(&key), Some(value));
    }

    // *For any* key, storing V1 then V2 leaves only V2, charged at V2's size.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in "[a-z]{0,400}",
        value2 in "[a-z]{0,400}"
    ) {
        let (mut cache, _) = len_cache(TEST_CAPACITY);

        cache.set(key.clone(), value1, None).unwrap();
        cache.set(key.clone(), value2.clone(), None).unwrap();

        prop_assert_eq!(cache.len(), 1);
        prop_assert_eq!(cache.total_size(), value2.len() as u64);
        prop_assert_eq!(cache.get(&key), Some(value2));
    }

    // *For any* entry with a TTL, the entry is live up to and including its
    // expiry millisecond; once the clock passes it the entry reads as absent
    // and its size is released.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in key_strategy(),
        value in "[a-z]{1,100}",
        ttl_ms in 1u64..10_000,
        overshoot in 0u64..1_000
    ) {
        let (mut cache, clock) = len_cache(TEST_CAPACITY);

        cache.set(key.clone(), value.clone(), Some(Duration::from_millis(ttl_ms))).unwrap();
        clock.advance(Duration::from_millis(ttl_ms));
        prop_assert_eq!(cache.get(&key), Some(value));

        clock.advance(Duration::from_millis(1 + overshoot));
        prop_assert_eq!(cache.get(&key), None);
        prop_assert_eq!(cache.total_size(), 0);
    }
}

// Property tests for LRU eviction behavior
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // *For any* cache holding exactly N equal entries, adding one more evicts
    // the entry written first.
    #[test]
    fn prop_lru_eviction_order(
        initial_keys in prop::collection::hash_set("[a-z]{1,8}", 2..10),
        new_key in "[A-Z]{1,8}",
        entry_size in 1usize..50
    ) {
        let keys: Vec<String> = initial_keys.into_iter().collect();
        let capacity = (keys.len() * entry_size) as u64;
        let (mut cache, _) = len_cache(capacity);

        for key in &keys {
            cache.set(key.clone(), "v".repeat(entry_size), None).unwrap();
        }
        prop_assert_eq!(cache.total_size(), capacity, "Cache should be full");

        cache.set(new_key.clone(), "v".repeat(entry_size), None).unwrap();

        prop_assert!(!cache.contains_key(&keys[0]), "Oldest key should have been evicted");
        prop_assert!(cache.contains_key(&new_key));
        for key in keys.iter().skip(1) {
            prop_assert!(cache.contains_key(key), "Key '{}' should still exist", key);
        }
        prop_assert_eq!(cache.total_size(), capacity);
    }

    // *For any* full cache, reading the oldest key protects it: the next
    // insert evicts the second-oldest instead.
    #[test]
    fn prop_lru_access_tracking(
        initial_keys in prop::collection::hash_set("[a-z]{1,8}", 3..8),
        new_key in "[A-Z]{1,8}",
        entry_size in 1usize..50
    ) {
        let keys: Vec<String> = initial_keys.into_iter().collect();
        let capacity = (keys.len() * entry_size) as u64;
        let (mut cache, _) = len_cache(capacity);

        for key in &keys {
            cache.set(key.clone(), "v".repeat(entry_size), None).unwrap();
        }

        prop_assert!(cache.get(&keys[0]).is_some());
        cache.set(new_key.clone(), "v".repeat(entry_size), None).unwrap();

        prop_assert!(cache.contains_key(&keys[0]), "Touched key should survive");
        prop_assert!(!cache.contains_key(&keys[1]), "Second-oldest key should be evicted");
        prop_assert!(cache.contains_key(&new_key));
    }
}

// == Property Test for Error Response Format ==
// This tests the CacheError -> HTTP response conversion

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // *For any* error condition, the HTTP response carries a JSON body with an
    // "error" field holding the error's message.
    #[test]
    fn prop_error_response_format(error_msg in "[a-zA-Z0-9 _-]{1,100}") {
        use crate::error::CacheError;
        use axum::body::to_bytes;
        use axum::response::IntoResponse;

        let error_variants = vec![
            CacheError::NotFound(error_msg.clone()),
            CacheError::NotSupported(error_msg.clone()),
            CacheError::InvalidRequest(error_msg.clone()),
        ];

        for error in error_variants {
            let expected_msg = error.to_string();
            let response = error.into_response();

            let content_type = response
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok());
            prop_assert!(
                content_type.map(|ct| ct.contains("application/json")).unwrap_or(false),
                "Response should have JSON content-type"
            );

            let bytes = tokio_test::block_on(async {
                to_bytes(response.into_body(), usize::MAX).await.unwrap()
            });
            let json: serde_json::Value = serde_json::from_slice(&bytes)
                .expect("Response body should be valid JSON");

            prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
        }
    }
}

// == Property Test for Concurrent Operation Correctness ==
// Shares the cache behind one exclusive lock, the way the server does.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // *For any* set of concurrent operations serialized by a single lock, the
    // size accounting stays exact.
    #[test]
    fn prop_concurrent_operation_correctness(ops in prop::collection::vec(cache_op_strategy(), 10..50)) {
        use std::sync::Arc;
        use tokio::sync::RwLock;

        let (cache, clock) = len_cache(TEST_CAPACITY);
        let store = Arc::new(RwLock::new(cache));

        let (total, sum) = tokio_test::block_on(async {
            let mut handles = vec![];

            for op in ops {
                let store = Arc::clone(&store);
                let clock = clock.clone();
                handles.push(tokio::spawn(async move {
                    let mut cache = store.write().await;
                    apply(&mut cache, &clock, op);
                }));
            }

            for handle in handles {
                handle.await.expect("Task should not panic");
            }

            let cache = store.read().await;
            let sum: u64 = cache.keys().map(|key| cache.entry_size(key).unwrap()).sum();
            (cache.total_size(), sum)
        });

        prop_assert_eq!(total, sum);
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_keeps_only_latest() {
        let (mut cache, _) = len_cache(0);

        cache.set("a".to_string(), "x".to_string(), None).unwrap();
        cache.set("b".to_string(), "y".to_string(), None).unwrap();

        assert_eq!(cache.keys().collect::<Vec<_>>(), vec!["b"]);
        assert_eq!(cache.total_size(), 1);
    }

    #[test]
    fn test_zero_sized_entries_never_evict() {
        let (mut cache, _) = len_cache(0);

        cache.set("a".to_string(), String::new(), None).unwrap();
        cache.set("b".to_string(), String::new(), None).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.total_size(), 0);
    }

    #[test]
    fn test_expired_entries_still_count_until_touched() {
        let (mut cache, clock) = len_cache(TEST_CAPACITY);

        cache
            .set("a".to_string(), "x".repeat(600), Some(Duration::from_millis(10)))
            .unwrap();
        clock.advance(Duration::from_millis(20));
        cache.set("b".to_string(), "y".repeat(600), None).unwrap();

        // The expired entry is evicted as the least recently used one
        assert!(!cache.contains_key("a"));
        assert_eq!(cache.total_size(), 600);
        assert_eq!(cache.stats().evictions, 1);
    }
}

//! Correctness Tests for the Bounded Cache
//!
//! Validates the eviction behaviour of both policies with small caches and
//! deterministic access patterns. Each test states which key is evicted by
//! each put that overflows the cache.
//!
//! ## Test Strategy
//! - Small cache sizes (2-5 entries) for predictable behavior
//! - Eviction listener records every evicted pair so the victim is checked
//!   explicitly, not inferred from misses
//! - Identical call sequences run under both policies where they diverge

use bounded_cache::{Cache, ConfigError, EvictionPolicyKind};
use std::sync::{Arc, Mutex};

type Evictions<K, V> = Arc<Mutex<Vec<(K, V)>>>;

// ============================================================================
// HELPER FUNCTIONS FOR CACHE CREATION
// ============================================================================

/// Helper to create a cache whose evictions are recorded in order
fn make_recording<K, V>(cap: usize, policy: EvictionPolicyKind) -> (Cache<K, V>, Evictions<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    let evicted: Evictions<K, V> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let cache = Cache::builder(cap)
        .eviction_policy(policy)
        .on_eviction(move |k, v| sink.lock().unwrap().push((k, v)))
        .build()
        .unwrap();
    (cache, evicted)
}

fn make_lru<K, V>(cap: usize) -> (Cache<K, V>, Evictions<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    make_recording(cap, EvictionPolicyKind::Recency)
}

fn make_fifo<K, V>(cap: usize) -> (Cache<K, V>, Evictions<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Send + 'static,
    V: Send + 'static,
{
    make_recording(cap, EvictionPolicyKind::InsertionOrder)
}

fn taken<K, V>(evicted: &Evictions<K, V>) -> Vec<(K, V)> {
    std::mem::take(&mut *evicted.lock().unwrap())
}

fn sorted_keys<K: Ord + Clone + std::hash::Hash + Eq, V>(cache: &Cache<K, V>) -> Vec<K> {
    let mut keys = cache.keys();
    keys.sort();
    keys
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_zero_capacity_fails_construction() {
    assert_eq!(
        Cache::<u32, u32>::new(0).unwrap_err(),
        ConfigError::ZeroCapacity
    );
    assert_eq!(
        Cache::<u32, u32>::builder(0)
            .eviction_policy(EvictionPolicyKind::InsertionOrder)
            .build()
            .unwrap_err(),
        ConfigError::ZeroCapacity
    );
}

#[test]
fn test_fresh_cache_state() {
    let cache: Cache<u32, u32> = Cache::new(5).unwrap();
    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
    assert_eq!(cache.capacity(), 5);
    assert_eq!(cache.policy(), EvictionPolicyKind::Recency);
    assert_eq!(cache.policy_name(), "LRU");
}

// ============================================================================
// SCENARIOS (capacity = 2)
// ============================================================================

#[test]
fn test_scenario_recency_get_protects_entry() {
    let (cache, evicted) = make_lru(2);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"a");
    cache.put("c", 3);

    assert_eq!(taken(&evicted), vec![("b", 2)]);
    assert_eq!(sorted_keys(&cache), vec!["a", "c"]);
    assert_eq!(cache.get(&"b"), None);
}

#[test]
fn test_scenario_insertion_order_ignores_get() {
    let (cache, evicted) = make_fifo(2);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.get(&"a");
    cache.put("c", 3);

    assert_eq!(taken(&evicted), vec![("a", 1)]);
    assert_eq!(sorted_keys(&cache), vec!["b", "c"]);
    assert_eq!(cache.get(&"a"), None);
}

#[test]
fn test_scenario_overwrite_same_key() {
    for policy in [EvictionPolicyKind::Recency, EvictionPolicyKind::InsertionOrder] {
        let (cache, evicted) = make_recording(2, policy);
        cache.put("a", 1);
        cache.put("a", 2);
        assert_eq!(cache.get(&"a"), Some(2));
        assert_eq!(cache.len(), 1);
        assert!(taken(&evicted).is_empty());
    }
}

#[test]
fn test_scenario_remove_makes_room() {
    for policy in [EvictionPolicyKind::Recency, EvictionPolicyKind::InsertionOrder] {
        let (cache, evicted) = make_recording(2, policy);
        cache.put("a", 1);
        cache.put("b", 2);
        assert_eq!(cache.remove(&"a"), Some(1));
        assert_eq!(cache.len(), 1);
        cache.put("c", 3);

        assert!(taken(&evicted).is_empty(), "policy {}", policy);
        assert_eq!(cache.len(), 2);
        assert_eq!(sorted_keys(&cache), vec!["b", "c"]);
    }
}

#[test]
fn test_scenario_listener_reports_policy_candidate() {
    let (lru, lru_evicted) = make_lru(2);
    let (fifo, fifo_evicted) = make_fifo(2);
    for cache in [&lru, &fifo] {
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);
    }
    // With no intervening access both policies pick the oldest entry.
    assert_eq!(taken(&lru_evicted), vec![("a", 1)]);
    assert_eq!(taken(&fifo_evicted), vec![("a", 1)]);
}

// ============================================================================
// RECENCY POLICY
// ============================================================================

#[test]
fn test_lru_eviction_order_follows_last_touch() {
    let (cache, evicted) = make_lru(3);
    cache.put(1, "one");
    cache.put(2, "two");
    cache.put(3, "three");

    // Touch order now: 2, 3, 1 (most recent last)
    cache.get(&2);
    cache.get(&3);
    cache.get(&1);

    cache.put(4, "four");
    assert_eq!(taken(&evicted), vec![(2, "two")]);

    cache.put(5, "five");
    assert_eq!(taken(&evicted), vec![(3, "three")]);

    cache.put(6, "six");
    assert_eq!(taken(&evicted), vec![(1, "one")]);
    assert_eq!(cache.keys(), vec![6, 5, 4]);
}

#[test]
fn test_lru_put_of_present_key_refreshes() {
    let (cache, evicted) = make_lru(3);
    cache.put('a', 1);
    cache.put('b', 2);
    cache.put('c', 3);
    cache.put('a', 10);

    cache.put('d', 4);
    assert_eq!(taken(&evicted), vec![('b', 2)]);
    assert_eq!(cache.keys(), vec!['d', 'a', 'c']);
}

#[test]
fn test_lru_miss_does_not_reorder() {
    let (cache, evicted) = make_lru(2);
    cache.put('a', 1);
    cache.put('b', 2);
    assert_eq!(cache.get(&'z'), None);
    cache.put('c', 3);
    assert_eq!(taken(&evicted), vec![('a', 1)]);
}

// ============================================================================
// INSERTION-ORDER POLICY
// ============================================================================

#[test]
fn test_fifo_eviction_equals_arrival_order() {
    let (cache, evicted) = make_fifo(3);
    for i in 0..3 {
        cache.put(i, i * 10);
    }
    // Hammer the oldest entry; it must still go first.
    for _ in 0..10 {
        assert_eq!(cache.get(&0), Some(0));
    }
    cache.put(0, 99);

    for i in 3..6 {
        cache.put(i, i * 10);
    }
    assert_eq!(taken(&evicted), vec![(0, 99), (1, 10), (2, 20)]);
    assert_eq!(cache.keys(), vec![5, 4, 3]);
}

#[test]
fn test_fifo_reinsert_after_remove_goes_to_front() {
    let (cache, evicted) = make_fifo(3);
    cache.put("a", 1);
    cache.put("b", 2);
    cache.put("c", 3);
    cache.remove(&"a");
    cache.put("a", 4);

    cache.put("d", 5);
    assert_eq!(taken(&evicted), vec![("b", 2)]);
}

// ============================================================================
// CONTAINS / PEEK
// ============================================================================

#[test]
fn test_contains_key_never_reorders() {
    for policy in [EvictionPolicyKind::Recency, EvictionPolicyKind::InsertionOrder] {
        let (cache, evicted) = make_recording(2, policy);
        cache.put("a", 1);
        cache.put("b", 2);
        for _ in 0..5 {
            assert!(cache.contains_key(&"a"));
        }
        assert!(!cache.contains_key(&"z"));
        cache.put("c", 3);
        assert_eq!(taken(&evicted), vec![("a", 1)], "policy {}", policy);
    }
}

#[test]
fn test_peek_never_reorders() {
    let (cache, evicted) = make_lru(2);
    cache.put("a", 1);
    cache.put("b", 2);
    assert_eq!(cache.peek(&"a"), Some(1));
    assert_eq!(cache.peek(&"z"), None);
    cache.put("c", 3);
    assert_eq!(taken(&evicted), vec![("a", 1)]);
}

// ============================================================================
// INVARIANTS
// ============================================================================

#[test]
fn test_size_never_exceeds_capacity() {
    for policy in [EvictionPolicyKind::Recency, EvictionPolicyKind::InsertionOrder] {
        let (cache, evicted) = make_recording(5, policy);
        for i in 0..100u32 {
            cache.put(i % 17, i);
            if i % 3 == 0 {
                cache.get(&(i % 7));
            }
            if i % 11 == 0 {
                cache.remove(&(i % 5));
            }
            assert!(cache.len() <= cache.capacity());
        }
        assert_eq!(cache.len(), cache.keys().len());
        assert_eq!(cache.len(), cache.capacity());
        assert!(!taken(&evicted).is_empty());
    }
}

#[test]
fn test_each_overflow_evicts_exactly_one() {
    let (cache, evicted) = make_lru(4);
    for i in 0..4 {
        cache.put(i, i);
    }
    for i in 4..20 {
        cache.put(i, i);
        let victims = taken(&evicted);
        assert_eq!(victims.len(), 1);
        assert_eq!(victims[0], (i - 4, i - 4));
        assert_eq!(cache.get(&(i - 4)), None);
        assert_eq!(cache.len(), 4);
    }
}

#[test]
fn test_clear_resets_to_fresh_behaviour() {
    let (cache, evicted) = make_lru(3);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.put(3, 3);
    cache.clear();
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.capacity(), 3);
    assert!(taken(&evicted).is_empty());

    cache.put(4, 4);
    cache.put(5, 5);
    cache.put(6, 6);
    assert!(taken(&evicted).is_empty());
    cache.put(7, 7);
    assert_eq!(taken(&evicted), vec![(4, 4)]);
}

#[test]
fn test_remove_and_clear_never_notify() {
    let (cache, evicted) = make_fifo(3);
    cache.put(1, 1);
    cache.put(2, 2);
    cache.remove(&1);
    cache.remove(&42);
    cache.clear();
    cache.clear();
    assert!(taken(&evicted).is_empty());
}

#[test]
fn test_string_keys_and_complex_values() {
    #[derive(Debug, Clone, PartialEq)]
    struct ComplexValue {
        val: i32,
        description: String,
    }

    let (cache, evicted) = make_lru::<String, ComplexValue>(2);
    let fruit = |val: i32, description: &str| ComplexValue {
        val,
        description: description.to_string(),
    };
    cache.put("apple".to_string(), fruit(1, "First fruit"));
    cache.put("banana".to_string(), fruit(2, "Second fruit"));
    assert_eq!(cache.get("apple").unwrap().val, 1);
    assert_eq!(cache.get_with("banana", |v| v.description.clone()), Some("Second fruit".to_string()));

    cache.put("cherry".to_string(), fruit(3, "Third fruit"));
    assert_eq!(
        taken(&evicted),
        vec![("apple".to_string(), fruit(1, "First fruit"))]
    );
}

//! Cache Metrics Demonstration
//!
//! Runs an identical workload against a recency cache and an insertion-order
//! cache, then prints their metrics side by side. The workload repeatedly
//! reads a small hot set, which only the recency policy protects.

use bounded_cache::{Cache, CacheMetrics, ConfigError, EvictionPolicyKind};
use std::collections::BTreeMap;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    let capacity = 3;
    println!("Comparing eviction policies with identical workloads:");
    println!("   - Capacity: {} items", capacity);
    println!("   - Insert 5 items, re-read the hot set, insert 2 more\n");

    let caches: Vec<Box<dyn CacheMetrics>> = vec![
        Box::new(run_workload(capacity, EvictionPolicyKind::Recency)?),
        Box::new(run_workload(capacity, EvictionPolicyKind::InsertionOrder)?),
    ];

    display_metrics_comparison(&caches);
    Ok(())
}

fn run_workload(
    capacity: usize,
    policy: EvictionPolicyKind,
) -> Result<Cache<&'static str, i32>, ConfigError> {
    let cache = Cache::with_policy(capacity, policy)?;

    cache.put("apple", 1);
    cache.put("banana", 2);
    cache.put("cherry", 3);

    // Hot set
    for _ in 0..3 {
        cache.get(&"apple");
        cache.get(&"banana");
    }

    cache.put("date", 4);
    cache.put("elderberry", 5);

    for key in ["apple", "banana", "cherry", "date", "elderberry", "fig"] {
        cache.get(&key);
    }

    cache.put("fig", 6);
    cache.put("grape", 7);
    cache.remove(&"grape");

    Ok(cache)
}

fn display_metrics_comparison(caches: &[Box<dyn CacheMetrics>]) {
    let reports: Vec<(&'static str, BTreeMap<String, f64>)> = caches
        .iter()
        .map(|cache| (cache.algorithm_name(), cache.metrics()))
        .collect();

    print!("{:<16}", "metric");
    for (name, _) in &reports {
        print!("{:>12}", name);
    }
    println!();

    // BTreeMap keys iterate in a stable order
    if let Some((_, first)) = reports.first() {
        for metric in first.keys() {
            print!("{:<16}", metric);
            for (_, values) in &reports {
                match values.get(metric) {
                    Some(value) if value.fract() == 0.0 => print!("{:>12}", value),
                    Some(value) => print!("{:>12.3}", value),
                    None => print!("{:>12}", "-"),
                }
            }
            println!();
        }
    }
}

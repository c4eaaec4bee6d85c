//! Concurrent Cache Usage
//!
//! Shares one cache between worker threads through an `Arc`. Writers insert
//! distinct keys, readers look up a hot set, and the eviction listener counts
//! every entry pushed out by capacity pressure.

use bounded_cache::{Cache, CacheMetrics, ConfigError, EvictionPolicyKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

const CAPACITY: usize = 1_000;
const WRITERS: usize = 4;
const READERS: usize = 4;
const OPS_PER_THREAD: usize = 10_000;

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    for policy in [EvictionPolicyKind::Recency, EvictionPolicyKind::InsertionOrder] {
        run(policy)?;
    }
    Ok(())
}

fn run(policy: EvictionPolicyKind) -> Result<(), ConfigError> {
    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let cache: Arc<Cache<String, usize>> = Arc::new(
        Cache::builder(CAPACITY)
            .eviction_policy(policy)
            .on_eviction(move |_key: String, _value: usize| {
                counter.fetch_add(1, Ordering::Relaxed);
            })
            .build()?,
    );

    // Hot set that readers hit repeatedly
    for i in 0..100 {
        cache.put(format!("hot_{}", i), i);
    }

    let start = Instant::now();
    let mut handles: Vec<thread::JoinHandle<usize>> = Vec::new();

    for t in 0..WRITERS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                cache.put(format!("writer_{}_key_{}", t, i), i);
            }
            0
        }));
    }

    for _ in 0..READERS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            let mut hits = 0usize;
            for i in 0..OPS_PER_THREAD {
                if cache.get_with(&format!("hot_{}", i % 100), |v| *v).is_some() {
                    hits += 1;
                }
            }
            hits
        }));
    }

    let mut reader_hits = 0;
    for handle in handles {
        reader_hits += handle.join().unwrap_or(0);
    }
    let elapsed = start.elapsed();

    let metrics = cache.metrics();
    println!("=== {} ===", cache.algorithm_name());
    println!("  elapsed:      {:?}", elapsed);
    println!("  size:         {} / {}", cache.len(), cache.capacity());
    println!("  evictions:    {}", evictions.load(Ordering::Relaxed));
    println!("  reader hits:  {}", reader_hits);
    println!("  hit rate:     {:.2}%", metrics["hit_rate"] * 100.0);
    println!();
    Ok(())
}

//! Basic Cache Usage
//!
//! Runs the same access pattern under both eviction policies and prints which
//! entry each overflowing `put` evicts.
//!
//! Run with `RUST_LOG=debug cargo run --example basic_usage` to also see the
//! cache's own log lines.

use bounded_cache::{Cache, ConfigError, EvictionPolicyKind};

fn run(policy: EvictionPolicyKind) -> Result<(), ConfigError> {
    println!("--- {} ---", policy);

    let cache = Cache::builder(2)
        .eviction_policy(policy)
        .on_eviction(|key: &'static str, value: i32| {
            println!("  evicted {}={}", key, value);
        })
        .build()?;

    cache.put("a", 1);
    cache.put("b", 2);
    println!("  get(a) = {:?}", cache.get(&"a"));
    println!("  put(c, 3)");
    cache.put("c", 3);

    println!("  contains a? {}", cache.contains_key(&"a"));
    println!("  contains b? {}", cache.contains_key(&"b"));
    println!("  eviction order: {:?}", cache.keys());
    println!("  {}", cache);
    Ok(())
}

fn main() -> Result<(), ConfigError> {
    env_logger::init();

    run(EvictionPolicyKind::Recency)?;
    run(EvictionPolicyKind::InsertionOrder)?;

    match Cache::<&str, i32>::new(0) {
        Ok(_) => println!("zero capacity accepted?"),
        Err(e) => println!("zero capacity rejected: {}", e),
    }
    Ok(())
}

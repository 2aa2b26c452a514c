//! Example demonstrating the LRU cache.
//!
//! Run with: cargo run --example basic_lru

use std::sync::Arc;
use std::thread;

use lrukit::LruCache;

fn main() {
    println!("=== LRU Cache Example ===\n");

    let cache: LruCache<&str, u32> = LruCache::new(3);
    println!("Created LRU cache: capacity={}\n", cache.capacity());

    for (key, value) in [("aaa", 100), ("bbb", 200), ("ccc", 300)] {
        let was_present = cache.set(key, value);
        println!("set({key}, {value}) -> was_present={was_present}");
    }

    // Touch "aaa" so "bbb" becomes the least recently used.
    println!("\nget(aaa) -> {:?}", cache.get(&"aaa").as_deref());
    println!("next eviction candidate: {:?}", cache.peek_lru().map(|(k, _)| k));

    cache.set("ddd", 400);
    println!("\nAfter set(ddd, 400):");
    for key in ["aaa", "bbb", "ccc", "ddd"] {
        println!("  contains {key}? {}", cache.contains(&key));
    }

    println!("\nOverwrite: set(ccc, 333) -> {}", cache.set("ccc", 333));
    println!("get(ccc) -> {:?}", cache.get(&"ccc").as_deref());

    // Shared across threads.
    let shared: Arc<LruCache<u32, String>> = Arc::new(LruCache::new(8));
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..4 {
                    cache.set(t * 10 + i, format!("worker-{t}-item-{i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }
    println!(
        "\nAfter 4 workers x 4 sets: len={} (capacity {})",
        shared.len(),
        shared.capacity()
    );

    cache.clear();
    println!("\nAfter clear: len={}, get(ddd) -> {:?}", cache.len(), cache.get(&"ddd"));
}

#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::policy::lru::LruCore;
use lrukit::traits::CoreCache;

// Fuzz arbitrary set/get/remove/clear sequences on LruCore
//
// First byte picks the capacity; the rest are (opcode, key) pairs over a
// small key space so overwrites and evictions are frequent.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let mut cache: LruCore<u8, u32> = LruCore::new(capacity);

    for (step, pair) in ops.chunks_exact(2).enumerate() {
        let op = pair[0] % 4;
        let key = pair[1] % 32;

        match op {
            0 => {
                let was_present = cache.contains(&key);
                let old_len = cache.len();
                assert_eq!(cache.set(key, step as u32), was_present);
                if was_present {
                    assert_eq!(cache.len(), old_len);
                }
                assert_eq!(cache.keys_mru().next(), Some(&key));
                assert_eq!(cache.peek(&key).map(|v| **v), Some(step as u32));
            }
            1 => {
                let old_len = cache.len();
                let hit = cache.get(&key).is_some();
                assert_eq!(hit, cache.contains(&key));
                if hit {
                    assert_eq!(cache.keys_mru().next(), Some(&key));
                }
                assert_eq!(cache.len(), old_len);
            }
            2 => {
                let was_present = cache.contains(&key);
                assert_eq!(cache.remove(&key).is_some(), was_present);
                assert!(!cache.contains(&key));
            }
            3 => {
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.capacity(), capacity);
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});

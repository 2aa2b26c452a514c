// ==============================================
// LRU CACHE BEHAVIOUR TESTS (integration)
// ==============================================
//
// Exercises the public Set/Get/Clear contract end to end through the
// thread-safe `LruCache` handle.

#![cfg(feature = "concurrency")]

use lrukit::prelude::*;

mod scenarios {
    use super::*;

    #[test]
    fn end_to_end_capacity_three() {
        let cache = LruCache::new(3);

        assert!(!cache.set("aaa", 100));
        assert!(!cache.set("bbb", 200));
        assert!(!cache.set("ccc", 300));
        assert!(!cache.set("ddd", 400));

        assert!(cache.get(&"aaa").is_none());
        assert_eq!(cache.get(&"bbb").as_deref(), Some(&200));
        assert_eq!(cache.get(&"ccc").as_deref(), Some(&300));
        assert_eq!(cache.get(&"ddd").as_deref(), Some(&400));
        cache.check_invariants().unwrap();
    }

    #[test]
    fn empty_cache_misses() {
        let cache: LruCache<String, i32> = LruCache::new(10);
        assert!(cache.get(&"aaa".to_string()).is_none());
        assert!(cache.get(&"bbb".to_string()).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn simple_set_get_overwrite() {
        let cache = LruCache::new(5);

        assert!(!cache.set("aaa", 100));
        assert!(!cache.set("bbb", 200));
        assert_eq!(cache.get(&"aaa").as_deref(), Some(&100));
        assert_eq!(cache.get(&"bbb").as_deref(), Some(&200));

        assert!(cache.set("aaa", 300));
        assert_eq!(cache.get(&"aaa").as_deref(), Some(&300));
        assert!(cache.get(&"ccc").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn recency_refresh_via_get() {
        let cache = LruCache::new(2);
        cache.set('a', 1);
        cache.set('b', 2);
        assert!(cache.get(&'a').is_some());
        cache.set('c', 3);

        assert!(cache.get(&'b').is_none());
        assert_eq!(cache.get(&'a').as_deref(), Some(&1));
        assert_eq!(cache.get(&'c').as_deref(), Some(&3));
    }

    #[test]
    fn overwrite_keeps_count() {
        let cache = LruCache::new(4);
        assert!(!cache.set("a", 1));
        let before = cache.len();
        assert!(cache.set("a", 2));
        assert_eq!(cache.len(), before);
        assert_eq!(cache.get(&"a").as_deref(), Some(&2));
    }

    #[test]
    fn clear_resets_and_accepts_capacity_again() {
        let capacity = 4;
        let cache = LruCache::new(capacity);
        for i in 0..capacity {
            cache.set(i, i);
        }
        cache.clear();

        for i in 0..capacity {
            assert!(cache.get(&i).is_none());
        }
        assert_eq!(cache.capacity(), capacity);

        for i in 100..100 + capacity {
            assert!(!cache.set(i, i));
        }
        assert_eq!(cache.len(), capacity);
        for i in 100..100 + capacity {
            assert!(cache.contains(&i));
        }

        cache.set(999, 999);
        assert!(!cache.contains(&100));
        assert_eq!(cache.len(), capacity);
    }

    #[test]
    fn eviction_order_follows_insertion_without_gets() {
        for capacity in 1..=6usize {
            let cache = LruCache::new(capacity);
            for k in 0..=capacity {
                cache.set(k, k);
            }
            assert!(!cache.contains(&0), "capacity {capacity}");
            for k in 1..=capacity {
                assert!(cache.contains(&k), "capacity {capacity}, key {k}");
            }
        }
    }

    #[test]
    fn values_are_returned_verbatim() {
        struct Opaque(Vec<u8>);

        let cache = LruCache::new(2);
        cache.set(1, Opaque(vec![1, 2, 3]));
        let first = cache.get(&1).unwrap();
        let second = cache.get(&1).unwrap();
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(first.0, vec![1, 2, 3]);
    }
}

mod construction {
    use super::*;

    #[test]
    fn zero_capacity_policy() {
        assert!(LruCache::<u32, u32>::try_new(0).is_err());

        let clamped: LruCache<u32, u32> = LruCache::new(0);
        assert_eq!(clamped.capacity(), 1);
        clamped.set(1, 1);
        clamped.set(2, 2);
        assert_eq!(clamped.len(), 1);
    }

    #[test]
    fn builder_and_constructor_agree() {
        let built = LruCacheBuilder::new(3).build::<&str, i32>();
        let direct = LruCache::new(3);
        for (k, v) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            built.set(k, v);
            direct.set(k, v);
        }
        for k in ["a", "b", "c", "d"] {
            assert_eq!(built.get(&k), direct.get(&k));
        }
    }
}

mod capacity_bound {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[cfg_attr(miri, ignore)]
        #[test]
        fn len_never_exceeds_capacity(
            capacity in 1usize..16,
            keys in prop::collection::vec(0u16..64, 0..256)
        ) {
            let cache = LruCache::new(capacity);
            for key in keys {
                cache.set(key, u32::from(key));
                prop_assert!(cache.len() <= capacity);
            }
            prop_assert!(cache.check_invariants().is_ok());
        }
    }
}

//! Compute-once cache for spritesheet cells
//!
//! Entries are never evicted: a value stays cached for the lifetime of the
//! cache itself.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Total lookups
    pub lookups: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that computed and inserted a new entry
    pub misses: u64,
}

impl CacheStats {
    /// Hit rate (0.0 - 1.0)
    pub fn hit_rate(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.hits as f64 / self.lookups as f64
        }
    }
}

#[derive(Debug)]
struct Inner<K, V> {
    entries: HashMap<K, Arc<V>>,
    stats: CacheStats,
}

/// A map with a single get-or-compute-and-store operation.
///
/// The check, the computation and the insert all happen under one lock, so
/// two threads asking for the same missing key never both compute it.
#[derive(Debug)]
pub struct CellCache<K, V> {
    inner: Mutex<Inner<K, V>>,
}

impl<K: Eq + Hash, V> CellCache<K, V> {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self { inner: Mutex::new(Inner { entries: HashMap::new(), stats: CacheStats::default() }) }
    }

    // The map only ever holds fully inserted entries, so a panic in another
    // thread's compute closure cannot leave it inconsistent.
    fn lock(&self) -> MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Return the cached value for `key`, computing and storing it first if absent.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        self.get_or_insert_with_hit(key, compute).0
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), also reporting
    /// whether the value was already cached.
    ///
    /// Counters are only updated once the lookup completes, so a panicking
    /// `compute` leaves `misses` equal to the number of stored entries.
    pub fn get_or_insert_with_hit<F>(&self, key: K, compute: F) -> (Arc<V>, bool)
    where
        F: FnOnce() -> V,
    {
        let mut inner = self.lock();

        if let Some(value) = inner.entries.get(&key) {
            let value = Arc::clone(value);
            inner.stats.lookups += 1;
            inner.stats.hits += 1;
            return (value, true);
        }

        let value = Arc::new(compute());
        inner.entries.insert(key, Arc::clone(&value));
        inner.stats.lookups += 1;
        inner.stats.misses += 1;
        (value, false)
    }

    /// Get a cached value without computing. Does not count as a lookup.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.lock().entries.get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the lookup counters
    pub fn stats(&self) -> CacheStats {
        self.lock().stats
    }
}

impl<K: Eq + Hash, V> Default for CellCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_compute_once() {
        let cache: CellCache<usize, String> = CellCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let value = cache.get_or_insert_with(3, || {
                calls.fetch_add(1, Ordering::SeqCst);
                "three".to_string()
            });
            assert_eq!(*value, "three");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), CacheStats { lookups: 5, hits: 4, misses: 1 });
    }

    #[test]
    fn test_returns_same_arc() {
        let cache: CellCache<usize, u32> = CellCache::new();
        let first = cache.get_or_insert_with(0, || 7);
        let second = cache.get_or_insert_with(0, || 99);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 7);
    }

    #[test]
    fn test_get_and_contains_do_not_compute() {
        let cache: CellCache<usize, u32> = CellCache::new();
        assert!(cache.is_empty());
        assert!(cache.get(&1).is_none());
        assert!(!cache.contains(&1));

        cache.get_or_insert_with(1, || 10);
        assert_eq!(cache.get(&1).as_deref(), Some(&10));
        assert!(cache.contains(&1));
        assert_eq!(cache.stats().lookups, 1);
    }

    #[test]
    fn test_hit_flag() {
        let cache: CellCache<usize, u32> = CellCache::new();
        let (first, hit) = cache.get_or_insert_with_hit(2, || 20);
        assert!(!hit);
        let (second, hit) = cache.get_or_insert_with_hit(2, || 99);
        assert!(hit);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_recovers_after_panicking_compute() {
        let cache: CellCache<usize, u32> = CellCache::new();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            cache.get_or_insert_with(1, || panic!("compute failed"));
        }));
        assert!(result.is_err());
        assert!(cache.inner.is_poisoned());
        assert!(cache.is_empty());
        assert_eq!(cache.stats(), CacheStats::default());

        let value = cache.get_or_insert_with(1, || 5);
        assert_eq!(*value, 5);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().misses, cache.len() as u64);
        assert_eq!(cache.stats(), CacheStats { lookups: 1, hits: 0, misses: 1 });
    }

    #[test]
    fn test_hit_rate() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
        let stats = CacheStats { lookups: 4, hits: 3, misses: 1 };
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_concurrent_requests_compute_once() {
        let cache: Arc<CellCache<usize, usize>> = Arc::new(CellCache::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                thread::spawn(move || {
                    for key in 0..16 {
                        cache.get_or_insert_with(key, || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            key * 2
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker should not panic");
        }

        assert_eq!(calls.load(Ordering::SeqCst), 16);
        assert_eq!(cache.len(), 16);
        assert_eq!(cache.stats().misses, 16);
        assert_eq!(cache.stats().hits, 8 * 16 - 16);
    }
}

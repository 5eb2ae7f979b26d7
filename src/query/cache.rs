use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::{Arc, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};
use crate::core::types::RecordPos;

/// Query cache for avoiding recomputation
///
/// Keyed by the exact course list; the registry clears the cache on every
/// bulk load since positions only mean anything against one store generation.
pub struct QueryCache {
    pub cache: Arc<RwLock<LruCache<QueryKey, Vec<RecordPos>>>>,
    pub size_limit: usize,
    pub hit_count: AtomicUsize,
    pub miss_count: AtomicUsize,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct QueryKey {
    pub courses: Vec<String>,
}

impl QueryKey {
    pub fn new(courses: &[String]) -> Self {
        QueryKey {
            courses: courses.to_vec(),
        }
    }
}

impl QueryCache {
    pub fn new(size_limit: usize) -> Self {
        let cap = NonZeroUsize::new(size_limit.max(1)).unwrap();
        QueryCache {
            cache: Arc::new(RwLock::new(LruCache::new(cap))),
            size_limit,
            hit_count: AtomicUsize::new(0),
            miss_count: AtomicUsize::new(0),
        }
    }

    pub fn get(&self, key: &QueryKey) -> Option<Vec<RecordPos>> {
        let mut cache = self.cache.write().unwrap();
        if let Some(result) = cache.get(key) {
            self.hit_count.fetch_add(1, Ordering::Relaxed);
            Some(result.clone())
        } else {
            self.miss_count.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn put(&self, key: QueryKey, result: Vec<RecordPos>) {
        let mut cache = self.cache.write().unwrap();
        cache.put(key, result);
    }

    pub fn clear(&self) {
        let mut cache = self.cache.write().unwrap();
        cache.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
            size: self.cache.read().unwrap().len(),
            capacity: self.size_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub hit_count: usize,
    pub miss_count: usize,
    pub size: usize,
    pub capacity: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hit_count + self.miss_count;
        if total == 0 {
            0.0
        } else {
            self.hit_count as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(names: &[&str]) -> QueryKey {
        QueryKey {
            courses: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn miss_then_hit() {
        let cache = QueryCache::new(4);
        let k = key(&["Math", "CS"]);

        assert!(cache.get(&k).is_none());
        cache.put(k.clone(), vec![RecordPos(1)]);
        assert_eq!(cache.get(&k), Some(vec![RecordPos(1)]));

        let stats = cache.stats();
        assert_eq!(stats.hit_count, 1);
        assert_eq!(stats.miss_count, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn course_order_is_part_of_the_key() {
        let cache = QueryCache::new(4);
        cache.put(key(&["Math", "CS"]), vec![RecordPos(1)]);
        assert!(cache.get(&key(&["CS", "Math"])).is_none());
    }

    #[test]
    fn clear_empties_entries_only() {
        let cache = QueryCache::new(4);
        cache.put(key(&["Math"]), vec![]);
        cache.clear();
        assert_eq!(cache.stats().size, 0);
        assert!(cache.get(&key(&["Math"])).is_none());
    }

    #[test]
    fn evicts_past_capacity() {
        let cache = QueryCache::new(2);
        cache.put(key(&["A"]), vec![]);
        cache.put(key(&["B"]), vec![]);
        cache.put(key(&["C"]), vec![]);
        assert_eq!(cache.stats().size, 2);
        assert!(cache.get(&key(&["A"])).is_none()); // Oldest entry evicted
    }

    #[test]
    fn hit_rate() {
        let cache = QueryCache::new(2);
        let k = key(&["Math"]);
        cache.get(&k); // miss
        cache.put(k.clone(), vec![]);
        cache.get(&k); // hit
        assert!((cache.stats().hit_rate() - 0.5).abs() < f64::EPSILON);
    }
}

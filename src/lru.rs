//! Bounded least-recently-used caching.

use fnv::FnvHashMap;
use std::collections::BTreeMap;
use std::hash::Hash;

struct Entry<V> {
    value: V,
    stamp: u64,
}

/// A capacity-bounded map with least-recently-used eviction.
///
/// Recency is tracked with a monotonic stamp per entry plus a
/// stamp-ordered index, so touching and evicting are both O(log n).
/// A capacity of zero disables storage entirely; lookups simply miss.
pub struct LruCache<K, V> {
    map: FnvHashMap<K, Entry<V>>,
    order: BTreeMap<u64, K>,
    tick: u64,
    max: usize,
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    pub fn new(max: usize) -> Self {
        LruCache {
            map: FnvHashMap::default(),
            order: BTreeMap::new(),
            tick: 0,
            max,
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    /// Look up a key, marking it most recently used on a hit.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.tick += 1;
        let tick = self.tick;
        match self.map.get_mut(key) {
            None => None,
            Some(entry) => {
                self.order.remove(&entry.stamp);
                self.order.insert(tick, key.clone());
                entry.stamp = tick;
                Some(&entry.value)
            }
        }
    }

    /// Insert a key, evicting the least recently used entries if the cache
    /// is over capacity.  Re-inserting an existing key replaces its value;
    /// racing writers computing the same deterministic value make this
    /// idempotent.
    pub fn insert(&mut self, key: K, value: V) {
        if self.max == 0 {
            return;
        }
        self.tick += 1;
        let tick = self.tick;
        if let Some(old) = self.map.insert(key.clone(), Entry { value, stamp: tick }) {
            self.order.remove(&old.stamp);
        }
        self.order.insert(tick, key);
        self.shrink_to(self.max);
    }

    /// Change the capacity, evicting immediately to respect the new bound.
    pub fn resize(&mut self, max: usize) {
        self.max = max;
        self.shrink_to(max);
    }

    fn shrink_to(&mut self, max: usize) {
        while self.map.len() > max {
            let stamp = *self.order.keys().next().unwrap();
            let key = self.order.remove(&stamp).unwrap();
            self.map.remove(&key);
        }
    }
}

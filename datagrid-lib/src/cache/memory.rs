//! In-memory response cache using DashMap

use dashmap::DashMap;
use log::trace;

use super::CacheConfig;
use super::CacheKey;
use super::CachedValue;

/// A bounded in-memory response cache backed by a concurrent hash map.
///
/// Values are cloned out on read, so `V` is typically an `Arc` or a cheap
/// owned response body.
///
/// # Example
///
/// ```
/// use datagrid_lib::cache::{CacheConfig, CacheKey, ResponseCache};
///
/// let cache = ResponseCache::new(CacheConfig::default());
/// cache.insert(CacheKey::get("/api/products"), vec![1, 2, 3]);
/// assert_eq!(cache.get(&CacheKey::get("/api/products")), Some(vec![1, 2, 3]));
/// ```
#[derive(Debug)]
pub struct ResponseCache<V> {
    store: DashMap<CacheKey, CachedValue<V>>,
    config: CacheConfig,
}

impl<V: Clone> ResponseCache<V> {
    /// Creates a new empty cache.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            store: DashMap::with_capacity(config.max_entries),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the cached response, or `None` if absent or expired.
    ///
    /// Expired entries are removed on read.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        let entry = self.store.get(key)?;
        let value = entry.value();

        if value.is_expired() {
            drop(entry);
            self.store.remove(key);
            trace!("[cache] expired {}", key);
            None
        } else {
            Some(value.data.clone())
        }
    }

    /// Stores a response, evicting the oldest entry when full.
    pub fn insert(&self, key: CacheKey, data: V) {
        if !self.config.is_enabled() {
            return;
        }
        if !self.store.contains_key(&key) {
            while self.store.len() >= self.config.max_entries {
                if !self.evict_oldest() {
                    break;
                }
            }
        }
        self.store
            .insert(key, CachedValue::with_ttl(data, self.config.ttl));
    }

    /// Removes a response.
    pub fn remove(&self, key: &CacheKey) -> Option<V> {
        self.store.remove(key).map(|(_, v)| v.data)
    }

    /// Removes every response.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Removes all expired entries, returning how many were dropped.
    pub fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, value| {
            if value.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn evict_oldest(&self) -> bool {
        let oldest = self
            .store
            .iter()
            .min_by_key(|entry| entry.value().created_at)
            .map(|entry| entry.key().clone());
        match oldest {
            Some(key) => {
                trace!("[cache] evict {}", key);
                self.store.remove(&key);
                true
            }
            None => false,
        }
    }
}

impl<V: Clone> Default for ResponseCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

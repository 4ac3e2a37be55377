//! Cache configuration

use std::time::Duration;

/// Expiry and size settings for [`ResponseCache`](super::ResponseCache).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_ttl(Duration::from_secs(60))
///     .with_max_entries(20);
/// assert_eq!(config.max_entries, 20);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a response stays valid.
    ///
    /// Default: 5 minutes
    pub ttl: Duration,

    /// Upper bound on stored responses; the oldest is evicted first.
    ///
    /// Default: 100
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(300), // 5 minutes
            max_entries: 100,
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the entry bound.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Creates a config that stores nothing.
    pub fn no_cache() -> Self {
        Self {
            ttl: Duration::ZERO,
            max_entries: 0,
        }
    }

    /// Returns `true` if this config stores anything at all.
    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero() && self.max_entries > 0
    }
}

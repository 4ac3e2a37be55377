//! Response cache for the data-fetch layer
//!
//! An explicit, owned cache object handed to whatever fetches table data,
//! keyed by request method and endpoint, with TTL expiry and a size bound.

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use std::fmt;

use chrono::DateTime;
use chrono::Utc;

/// Identifies a cached response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Request method, upper-cased (`GET`, `POST`, ...).
    pub method: String,
    /// Request endpoint, as passed to the fetcher.
    pub endpoint: String,
}

impl CacheKey {
    pub fn new(method: impl AsRef<str>, endpoint: impl Into<String>) -> Self {
        Self {
            method: method.as_ref().to_ascii_uppercase(),
            endpoint: endpoint.into(),
        }
    }

    /// Shorthand for a `GET` key.
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new("GET", endpoint)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.endpoint)
    }
}

/// A cached value with metadata about when it was cached and when it expires.
#[derive(Debug, Clone)]
pub struct CachedValue<V> {
    /// The cached response.
    pub data: V,
    /// When this value was cached.
    pub created_at: DateTime<Utc>,
    /// When this value expires and should no longer be returned.
    pub expires_at: DateTime<Utc>,
}

impl<V> CachedValue<V> {
    /// Creates a new cached value with a TTL from now.
    pub fn with_ttl(data: V, ttl: std::time::Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            data,
            created_at: now,
            expires_at,
        }
    }

    /// Returns `true` if this cached value has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_key_normalizes_method() {
        assert_eq!(CacheKey::new("get", "/api/users"), CacheKey::get("/api/users"));
        assert_eq!(CacheKey::new("post", "/x").to_string(), "POST /x");
    }

    #[test]
    fn test_zero_ttl_is_expired() {
        assert!(CachedValue::with_ttl(1, Duration::ZERO).is_expired());
        assert!(!CachedValue::with_ttl(1, Duration::from_secs(60)).is_expired());
    }
}

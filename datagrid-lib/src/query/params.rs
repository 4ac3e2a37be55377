//! Ordered query-string multi-map.

use std::fmt;

use serde::ser::SerializeMap;
use serde::Serialize;
use url::form_urlencoded;

/// Query key holding the current page.
pub const PAGE_KEY: &str = "page";

/// A URL query string parsed as an ordered multi-map.
///
/// Parsing and serialization follow `application/x-www-form-urlencoded`
/// rules, so `a=1&b=x+y` round-trips with spaces encoded as `+`.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::QueryParams;
///
/// let mut params = QueryParams::parse("?color=red&color=blue&page=2");
/// assert_eq!(params.get_all("color"), vec!["red", "blue"]);
/// assert_eq!(params.page(), 2);
///
/// params.set("page", "1");
/// assert_eq!(params.to_string(), "color=red&color=blue&page=1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Returns `true` if `key` has at least one value.
    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Returns `true` if `key=value` is present.
    pub fn has_pair(&self, key: &str, value: &str) -> bool {
        self.pairs.iter().any(|(k, v)| k == key && v == value)
    }

    /// Appends `key=value` at the end.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Sets `key` to a single value.
    ///
    /// The first existing entry is overwritten in place and any later
    /// entries for `key` are removed; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| *k == key) {
            Some(first) => {
                self.pairs[first].1 = value;
                let mut index = 0;
                self.pairs.retain(|(k, _)| {
                    let keep = index <= first || *k != key;
                    index += 1;
                    keep
                });
            }
            None => self.pairs.push((key, value)),
        }
    }

    /// Removes every entry for `key`.
    pub fn delete(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Removes every `key=value` entry.
    pub fn delete_pair(&mut self, key: &str, value: &str) {
        self.pairs.retain(|(k, v)| !(k == key && v == value));
    }

    /// Iterates over all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Distinct keys in first-appearance order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (k, _) in &self.pairs {
            if !keys.contains(&k.as_str()) {
                keys.push(k);
            }
        }
        keys
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Current page: the `page` value if it is a positive integer, else 1.
    pub fn page(&self) -> u32 {
        self.get(PAGE_KEY)
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1)
    }

    /// Literal `key=value[&key=value...]` strings grouped by key.
    pub fn grouped(&self) -> GroupedQueries {
        let mut groups: Vec<(String, String)> = Vec::new();
        for (k, v) in &self.pairs {
            match groups.iter_mut().find(|(key, _)| key == k) {
                Some((_, joined)) => {
                    joined.push('&');
                    joined.push_str(&format!("{}={}", k, v));
                }
                None => groups.push((k.clone(), format!("{}={}", k, v))),
            }
        }
        GroupedQueries { groups }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(&self.pairs)
            .finish();
        f.write_str(&encoded)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Per-key re-joined query strings, in first-appearance order.
///
/// Values are written as they were decoded, not re-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedQueries {
    groups: Vec<(String, String)>,
}

impl GroupedQueries {
    /// The joined string for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(key, joined)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns `true` if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Serialize for GroupedQueries {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (k, v) in &self.groups {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

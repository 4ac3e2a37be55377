//! Locations and the navigation seam.
//!
//! The query manager never touches global state: it reads a [`Location`]
//! from a [`Navigator`] and hands a new one back. A browser router, a test
//! harness or the in-memory [`MemoryHistory`] sit behind the trait.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use url::Url;

use crate::error::LocationError;
use crate::query::QueryParams;

const BASE_URL: &str = "http://localhost/";

/// A path plus its parsed query string.
///
/// # Example
///
/// ```
/// use datagrid_lib::navigate::Location;
///
/// let location = Location::parse("/products?color=red&page=2#top").unwrap();
/// assert_eq!(location.path(), "/products");
/// assert_eq!(location.query().page(), 2);
/// assert_eq!(location.href(), "/products?color=red&page=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: QueryParams,
}

impl Location {
    /// Creates a location with an empty query.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    /// Parses a relative (`/path?query`) or absolute URL.
    ///
    /// Scheme, host and fragment are dropped.
    pub fn parse(href: &str) -> Result<Self, LocationError> {
        let base = Url::parse(BASE_URL).map_err(|e| LocationError::invalid_url(BASE_URL, e))?;
        let url = Url::options()
            .base_url(Some(&base))
            .parse(href)
            .map_err(|e| LocationError::invalid_url(href, e))?;
        Ok(Self {
            path: url.path().to_string(),
            query: QueryParams::parse(url.query().unwrap_or_default()),
        })
    }

    /// Replaces the query, keeping the path.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// The path component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The parsed query.
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// `path?query`. The `?` is always written, even for an empty query.
    pub fn href(&self) -> String {
        format!("{}?{}", self.path, self.query)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}?{}", self.path, self.query)
    }
}

impl FromStr for Location {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The routing layer: where we are, and how to go somewhere else.
pub trait Navigator {
    /// The current location.
    fn location(&self) -> Location;

    /// Navigate to `to`, adding a history entry.
    fn navigate(&self, to: Location);

    /// Navigate to `to` without adding a history entry.
    fn replace(&self, to: Location) {
        self.navigate(to);
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn location(&self) -> Location {
        (**self).location()
    }

    fn navigate(&self, to: Location) {
        (**self).navigate(to);
    }

    fn replace(&self, to: Location) {
        (**self).replace(to);
    }
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn location(&self) -> Location {
        (**self).location()
    }

    fn navigate(&self, to: Location) {
        (**self).navigate(to);
    }

    fn replace(&self, to: Location) {
        (**self).replace(to);
    }
}

/// In-memory history stack.
///
/// `navigate` pushes, `replace` overwrites the top entry. Shareable between
/// tasks behind an `Arc`.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: RwLock<Vec<Location>>,
}

impl MemoryHistory {
    /// Creates a history starting at `initial`.
    pub fn new(initial: Location) -> Self {
        Self {
            entries: RwLock::new(vec![initial]),
        }
    }

    /// Creates a history starting at a parsed href.
    pub fn from_href(href: &str) -> Result<Self, LocationError> {
        Ok(Self::new(Location::parse(href)?))
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<Location> {
        self.entries.read().map(|g| g.clone()).unwrap_or_default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.len()).unwrap_or(0)
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pops the top entry. Returns false at the first entry.
    pub fn back(&self) -> bool {
        if let Ok(mut guard) = self.entries.write()
            && guard.len() > 1
        {
            guard.pop();
            return true;
        }
        false
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(Location::new("/"))
    }
}

impl Navigator for MemoryHistory {
    fn location(&self) -> Location {
        self.entries
            .read()
            .ok()
            .and_then(|g| g.last().cloned())
            .unwrap_or_default()
    }

    fn navigate(&self, to: Location) {
        if let Ok(mut guard) = self.entries.write() {
            guard.push(to);
        }
    }

    fn replace(&self, to: Location) {
        if let Ok(mut guard) = self.entries.write() {
            match guard.last_mut() {
                Some(top) => *top = to,
                None => guard.push(to),
            }
        }
    }
}

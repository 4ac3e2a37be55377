//! URL-backed filter and page state.

use log::debug;

use super::transition;
use super::{FilterConfig, FilterValue, GroupedQueries, QueryParams};
use crate::navigate::{Location, Navigator};

/// Reads and writes filter state through a [`Navigator`].
///
/// The manager owns no state of its own. Every mutator reads the current
/// location, computes the next query and navigates once; rejected input
/// leaves history untouched.
///
/// # Example
///
/// ```
/// use datagrid_lib::navigate::MemoryHistory;
/// use datagrid_lib::query::{FilterConfig, QueryStateManager};
///
/// let manager = QueryStateManager::new(MemoryHistory::default());
/// manager.set_filter("color", "red", &FilterConfig::new());
/// manager.goto_page(3);
/// assert_eq!(manager.location().href(), "/?color=red&page=3");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryStateManager<N: Navigator> {
    navigator: N,
}

impl<N: Navigator> QueryStateManager<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn location(&self) -> Location {
        self.navigator.location()
    }

    /// The current query.
    pub fn params(&self) -> QueryParams {
        self.location().query().clone()
    }

    /// The current page, 1 when absent or invalid.
    pub fn page(&self) -> u32 {
        self.location().query().page()
    }

    /// Per-key re-joined query strings.
    pub fn grouped_queries(&self) -> GroupedQueries {
        self.location().query().grouped()
    }

    /// See [`transition::set_filter`].
    pub fn set_filter(&self, key: &str, value: impl Into<FilterValue>, config: &FilterConfig) {
        let location = self.location();
        let next = transition::set_filter(location.query(), key, &value.into(), config);
        self.push(location, next);
    }

    /// See [`transition::set_filters`].
    pub fn set_filters<I, K, V>(&self, filters: I, config: &FilterConfig)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<FilterValue>,
    {
        let location = self.location();
        let next = transition::set_filters(location.query(), filters, config);
        self.push(location, Some(next));
    }

    /// See [`transition::toggle_filter`].
    pub fn toggle_filter(&self, key: &str, value: &str) {
        let location = self.location();
        let next = transition::toggle_filter(location.query(), key, value);
        self.push(location, next);
    }

    /// Removes `key` without adding a history entry.
    pub fn remove_filter(&self, key: &str) {
        let location = self.location();
        if let Some(next) = transition::remove_filter(location.query(), key) {
            let to = location.with_query(next);
            debug!("[query] replace with {}", to);
            self.navigator.replace(to);
        }
    }

    /// See [`transition::goto_page`].
    pub fn goto_page(&self, page: i64) {
        let location = self.location();
        let next = transition::goto_page(location.query(), page);
        self.push(location, next);
    }

    /// See [`transition::goto_page_str`].
    pub fn goto_page_str(&self, raw: &str) {
        let location = self.location();
        let next = transition::goto_page_str(location.query(), raw);
        self.push(location, next);
    }

    /// See [`transition::clear_filters`].
    pub fn clear_filters<S: AsRef<str>>(&self, exclude_keys: &[S]) {
        let location = self.location();
        let next = transition::clear_filters(location.query(), exclude_keys);
        self.push(location, Some(next));
    }

    fn push(&self, location: Location, next: Option<QueryParams>) {
        if let Some(next) = next {
            let to = location.with_query(next);
            debug!("[query] navigate to {}", to);
            self.navigator.navigate(to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigate::MemoryHistory;

    fn manager(href: &str) -> QueryStateManager<MemoryHistory> {
        QueryStateManager::new(MemoryHistory::from_href(href).unwrap())
    }

    #[test]
    fn test_rejected_input_does_not_navigate() {
        let m = manager("/list?a=1");
        m.set_filter("", "x", &FilterConfig::new());
        m.set_filter("color", "  ", &FilterConfig::new());
        m.goto_page(0);
        m.goto_page_str("NaN");
        m.toggle_filter("color", "");
        assert_eq!(m.navigator().len(), 1);
    }

    #[test]
    fn test_path_is_kept() {
        let m = manager("/products?page=2");
        m.set_filter("brand", "acme", &FilterConfig::new());
        assert_eq!(m.location().href(), "/products?page=1&brand=acme");
        assert_eq!(m.navigator().len(), 2);
    }

    #[test]
    fn test_remove_filter_replaces() {
        let m = manager("/p?search=x&page=3");
        m.remove_filter("search");
        assert_eq!(m.navigator().len(), 1);
        assert_eq!(m.location().href(), "/p?page=3");
    }

    #[test]
    fn test_read_helpers() {
        let m = manager("/p?b=1&page=4&b=2");
        assert_eq!(m.page(), 4);
        assert_eq!(m.params().get_all("b"), vec!["1", "2"]);
        assert_eq!(m.grouped_queries().get("b"), Some("b=1&b=2"));
    }
}

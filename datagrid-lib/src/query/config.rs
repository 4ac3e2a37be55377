//! Filter values and filter update policies.

/// A value passed to a filter update.
///
/// Missing values are rejected outright. Blank strings (empty or whitespace
/// only) are dropped during normalization, and an update whose values all
/// drop is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterValue {
    /// No value (a cleared input, an absent option).
    #[default]
    Missing,
    /// A single value.
    One(String),
    /// Several values for a multi-valued key.
    Many(Vec<String>),
}

impl FilterValue {
    /// The non-blank values, in order.
    pub fn normalize(&self) -> Vec<String> {
        let values: Vec<&String> = match self {
            FilterValue::Missing => return Vec::new(),
            FilterValue::One(v) => vec![v],
            FilterValue::Many(vs) => vs.iter().collect(),
        };
        values
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Returns `true` for [`FilterValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, FilterValue::Missing)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::One(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::One(v)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(v: Vec<String>) -> Self {
        FilterValue::Many(v)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(v: Vec<&str>) -> Self {
        FilterValue::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for FilterValue {
    fn from(v: &[&str]) -> Self {
        FilterValue::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(v: [&str; N]) -> Self {
        FilterValue::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FilterValue::Missing, Into::into)
    }
}

/// How a filter update merges with the current query.
///
/// Unset fields fall back to the defaults of the operation that reads them.
/// `reset_filters` defaults to `false` for a single filter update and to
/// `true` for a bulk update; the other defaults are shared.
///
/// # Example
///
/// ```
/// use datagrid_lib::query::FilterConfig;
///
/// let config = FilterConfig::new()
///     .single()
///     .keep_page()
///     .clear_key("search");
/// assert!(!config.is_multiple());
/// assert!(!config.resets_page());
/// assert!(config.resets_filters_or(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Append values (true) or replace the key (false).
    ///
    /// Default: true
    pub is_multiple: Option<bool>,
    /// Drop every existing parameter first.
    ///
    /// Default: depends on the operation
    pub reset_filters: Option<bool>,
    /// Force `page=1` (true) or keep the current page (false).
    ///
    /// Default: true
    pub reset_page: Option<bool>,
    /// Keys to drop while merging.
    pub clear_keys: Vec<String>,
}

impl FilterConfig {
    /// Creates a config with every field unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append values to the key.
    pub fn multiple(mut self) -> Self {
        self.is_multiple = Some(true);
        self
    }

    /// Replace the key with a single value.
    pub fn single(mut self) -> Self {
        self.is_multiple = Some(false);
        self
    }

    /// Sets whether existing parameters are dropped.
    pub fn reset_filters(mut self, reset: bool) -> Self {
        self.reset_filters = Some(reset);
        self
    }

    /// Sets whether the page resets to 1.
    pub fn reset_page(mut self, reset: bool) -> Self {
        self.reset_page = Some(reset);
        self
    }

    /// Keep the current page.
    pub fn keep_page(self) -> Self {
        self.reset_page(false)
    }

    /// Drop `key` while merging.
    pub fn clear_key(mut self, key: impl Into<String>) -> Self {
        self.clear_keys.push(key.into());
        self
    }

    /// Drop every key in `keys` while merging.
    pub fn clear_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Resolved multiple-mode flag.
    pub fn is_multiple(&self) -> bool {
        self.is_multiple.unwrap_or(true)
    }

    /// Resolved page-reset flag.
    pub fn resets_page(&self) -> bool {
        self.reset_page.unwrap_or(true)
    }

    /// Resolved filter-reset flag for an operation whose default is `default`.
    pub fn resets_filters_or(&self, default: bool) -> bool {
        self.reset_filters.unwrap_or(default)
    }

    /// Returns `true` if `key` is dropped while merging.
    pub fn clears(&self, key: &str) -> bool {
        self.clear_keys.iter().any(|k| k == key)
    }
}

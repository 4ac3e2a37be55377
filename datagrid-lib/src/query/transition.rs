//! Pure query transitions.
//!
//! Each function takes the current query and returns the next one, or `None`
//! when the input is rejected and nothing should change. Navigation is left
//! to the caller.

use log::trace;

use super::{FilterConfig, FilterValue, QueryParams, PAGE_KEY};

/// Writes one filter key.
///
/// Rejects an empty key, a missing value, or values that are all blank.
/// With `reset_filters` (default false) only the new key survives. Otherwise
/// existing parameters are copied, skipping `clear_keys`, and then:
/// - multiple mode (default): entries under `key` matching a new value are
///   dropped and every new value not already in the result is appended;
/// - single mode: every entry under `key` is replaced by the first new value.
///
/// The page resets to 1 unless `reset_page` is false, in which case the
/// existing page is carried over.
pub fn set_filter(
    current: &QueryParams,
    key: &str,
    value: &FilterValue,
    config: &FilterConfig,
) -> Option<QueryParams> {
    if key.is_empty() || value.is_missing() {
        trace!("[query] set_filter rejected: empty key or missing value");
        return None;
    }
    let values = value.normalize();
    if values.is_empty() {
        trace!("[query] set_filter rejected: no usable values for {}", key);
        return None;
    }

    let multiple = config.is_multiple();
    let mut next = QueryParams::new();

    if !config.resets_filters_or(false) {
        for (k, v) in current.iter() {
            if config.clears(k) {
                continue;
            }
            let replaced = k == key && (!multiple || values.iter().any(|nv| nv == v));
            if !replaced {
                next.append(k, v);
            }
        }
    }
    write_values(&mut next, key, &values, multiple);
    carry_page(current, &mut next, config.resets_page());
    Some(next)
}

/// Writes several filter keys at once.
///
/// Same normalization as [`set_filter`] per entry; rejected entries are
/// skipped. Unlike [`set_filter`], `reset_filters` defaults to true.
pub fn set_filters<I, K, V>(current: &QueryParams, filters: I, config: &FilterConfig) -> QueryParams
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<FilterValue>,
{
    let multiple = config.is_multiple();
    let mut next = QueryParams::new();

    if !config.resets_filters_or(true) {
        for (k, v) in current.iter() {
            if !config.clears(k) {
                next.append(k, v);
            }
        }
    }

    for (key, value) in filters {
        let key = key.as_ref();
        let values = value.into().normalize();
        if key.is_empty() || values.is_empty() {
            trace!("[query] set_filters skipped entry {:?}", key);
            continue;
        }
        write_values(&mut next, key, &values, multiple);
    }

    carry_page(current, &mut next, config.resets_page());
    next
}

/// Checkbox-style toggle: removes `key=value` if present, appends it
/// otherwise. The page resets to 1.
pub fn toggle_filter(current: &QueryParams, key: &str, value: &str) -> Option<QueryParams> {
    if key.is_empty() || value.trim().is_empty() {
        trace!("[query] toggle_filter rejected");
        return None;
    }
    let mut next = current.clone();
    if next.has_pair(key, value) {
        next.delete_pair(key, value);
    } else {
        next.append(key, value);
    }
    next.set(PAGE_KEY, "1");
    Some(next)
}

/// Removes every entry for `key`, leaving the page alone.
pub fn remove_filter(current: &QueryParams, key: &str) -> Option<QueryParams> {
    if key.is_empty() {
        return None;
    }
    let mut next = current.clone();
    next.delete(key);
    Some(next)
}

/// Sets `page`, keeping everything else. Rejects pages below 1.
pub fn goto_page(current: &QueryParams, page: i64) -> Option<QueryParams> {
    if page < 1 {
        trace!("[query] goto_page rejected: {}", page);
        return None;
    }
    let mut next = current.clone();
    next.set(PAGE_KEY, page.to_string());
    Some(next)
}

/// Parses a raw page control value, then behaves like [`goto_page`].
///
/// Non-numeric (`"NaN"`, `""`) and fractional values are rejected.
pub fn goto_page_str(current: &QueryParams, raw: &str) -> Option<QueryParams> {
    match parse_page(raw) {
        Some(page) => goto_page(current, page),
        None => {
            trace!("[query] goto_page rejected: {:?}", raw);
            None
        }
    }
}

fn parse_page(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(page) = raw.parse::<i64>() {
        return Some(page);
    }
    let page = raw.parse::<f64>().ok()?;
    (page.is_finite() && page.fract() == 0.0).then_some(page as i64)
}

/// Keeps only the keys in `exclude_keys`; the page resets to 1 unless
/// `page` is itself excluded.
pub fn clear_filters<S: AsRef<str>>(current: &QueryParams, exclude_keys: &[S]) -> QueryParams {
    let excluded = |key: &str| exclude_keys.iter().any(|k| k.as_ref() == key);

    let mut next: QueryParams = current.iter().filter(|&(k, _)| excluded(k)).collect();
    if !excluded(PAGE_KEY) {
        next.set(PAGE_KEY, "1");
    }
    next
}

fn write_values(next: &mut QueryParams, key: &str, values: &[String], multiple: bool) {
    if multiple {
        for value in values {
            if !next.has_pair(key, value) {
                next.append(key, value.as_str());
            }
        }
    } else if let Some(first) = values.first() {
        next.set(key, first.as_str());
    }
}

fn carry_page(current: &QueryParams, next: &mut QueryParams, reset_page: bool) {
    if reset_page {
        next.set(PAGE_KEY, "1");
    } else if let Some(page) = current.get(PAGE_KEY) {
        next.set(PAGE_KEY, page);
    }
}

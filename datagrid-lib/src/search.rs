//! Debounced search box bound to a query key.

use std::sync::Arc;
use std::time::Duration;

use log::debug;

use crate::debounce::Debouncer;
use crate::navigate::Navigator;
use crate::query::{FilterConfig, QueryStateManager};

/// Search box settings.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use datagrid_lib::search::SearchConfig;
///
/// let config = SearchConfig::new()
///     .with_key_name("q")
///     .with_delay(Duration::from_millis(250));
/// assert_eq!(config.key_name, "q");
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Query key written by the box.
    ///
    /// Default: `search`
    pub key_name: String,

    /// Quiet period before typed input is applied.
    ///
    /// Default: 500 ms
    pub delay: Duration,

    /// Policy used when the search text is written.
    ///
    /// Default: drop every other filter and reset the page
    pub filter_config: FilterConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            key_name: "search".to_string(),
            delay: Duration::from_millis(500),
            filter_config: FilterConfig::new().reset_filters(true),
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key_name(mut self, key: impl Into<String>) -> Self {
        self.key_name = key.into();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_filter_config(mut self, config: FilterConfig) -> Self {
        self.filter_config = config;
        self
    }
}

/// A search input that writes its text into the URL query.
///
/// Typing goes through a [`Debouncer`]; submitting and clearing act at once
/// and drop any pending keystrokes.
#[derive(Debug)]
pub struct SearchInput<N: Navigator> {
    manager: Arc<QueryStateManager<N>>,
    config: SearchConfig,
    debouncer: Debouncer<String>,
}

impl<N> SearchInput<N>
where
    N: Navigator + Send + Sync + 'static,
{
    /// Must be called within a tokio runtime.
    pub fn new(manager: Arc<QueryStateManager<N>>, config: SearchConfig) -> Self {
        let target = manager.clone();
        let key = config.key_name.clone();
        let filter_config = config.filter_config.clone();
        let debouncer = Debouncer::new(config.delay, move |text: String| {
            apply(&target, &key, &filter_config, &text);
        });
        Self {
            manager,
            config,
            debouncer,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Typed text; applied after the quiet period.
    pub fn input(&self, raw: &str) {
        self.debouncer.call(raw.to_string());
    }

    /// Applies `raw` now, unless it matches the current value.
    pub fn submit(&self, raw: &str) {
        self.debouncer.cancel();
        let text = raw.trim();
        if self.current_value().as_deref().unwrap_or_default() == text {
            debug!("[search] submit unchanged: {:?}", text);
            return;
        }
        apply(&self.manager, &self.config.key_name, &self.config.filter_config, text);
    }

    /// Drops pending input and removes the key.
    pub fn clear(&self) {
        self.debouncer.cancel();
        self.manager.remove_filter(&self.config.key_name);
    }

    /// The value currently in the query.
    pub fn current_value(&self) -> Option<String> {
        self.manager
            .params()
            .get(&self.config.key_name)
            .map(str::to_string)
    }

    /// Returns `true` while typed input is waiting to be applied.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

fn apply<N: Navigator>(manager: &QueryStateManager<N>, key: &str, config: &FilterConfig, raw: &str) {
    let text = raw.trim();
    if text.is_empty() {
        manager.remove_filter(key);
    } else {
        manager.set_filter(key, text, config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigate::MemoryHistory;

    fn search(href: &str) -> (Arc<QueryStateManager<MemoryHistory>>, SearchInput<MemoryHistory>) {
        let manager = Arc::new(QueryStateManager::new(MemoryHistory::from_href(href).unwrap()));
        let input = SearchInput::new(manager.clone(), SearchConfig::default());
        (manager, input)
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_is_debounced() {
        let (manager, input) = search("/list?brand=x&page=3");
        input.input("sh");
        input.input("shoes ");
        assert_eq!(input.current_value(), None);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(manager.location().href(), "/list?search=shoes&page=1");
        assert_eq!(manager.navigator().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_skips_unchanged() {
        let (manager, input) = search("/list?search=shoes");
        input.submit(" shoes");
        assert_eq!(manager.navigator().len(), 1);
        input.submit("boots");
        assert_eq!(input.current_value().as_deref(), Some("boots"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending() {
        let (manager, input) = search("/list?search=shoes&page=2");
        input.input("boots");
        input.clear();
        assert!(!input.is_pending());
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(manager.location().href(), "/list?page=2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_input_removes_key() {
        let (manager, input) = search("/list?search=shoes&page=2");
        input.input("   ");
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(input.current_value(), None);
        assert_eq!(manager.navigator().len(), 1);
    }
}

//! Integration tests for the debounced search box.
//!
//! Runs on a paused tokio clock so the quiet period is deterministic.

use std::sync::Arc;
use std::time::Duration;

use datagrid_lib::search::{SearchConfig, SearchInput};
use datagrid_lib::{FilterConfig, MemoryHistory, Navigator, QueryStateManager};

fn setup(href: &str, config: SearchConfig) -> (Arc<MemoryHistory>, SearchInput<Arc<MemoryHistory>>) {
    let history = Arc::new(MemoryHistory::from_href(href).unwrap());
    let manager = Arc::new(QueryStateManager::new(history.clone()));
    (history, SearchInput::new(manager, config))
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_navigates_once() {
    let (history, search) = setup("/products?brand=acme&page=5", SearchConfig::default());

    for prefix in ["r", "ru", "run", "runn", "runner"] {
        search.input(prefix);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(history.len(), 1);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(history.len(), 2);
    assert_eq!(history.location().href(), "/products?search=runner&page=1");
}

#[tokio::test(start_paused = true)]
async fn test_custom_key_and_merge_policy() {
    let config = SearchConfig::new()
        .with_key_name("q")
        .with_delay(Duration::from_millis(200))
        .with_filter_config(FilterConfig::new().single());
    let (history, search) = setup("/products?brand=acme&page=5", config);

    search.input("shoe");
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(history.location().href(), "/products?brand=acme&page=1&q=shoe");

    search.input("boot");
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(search.current_value().as_deref(), Some("boot"));
}

#[tokio::test(start_paused = true)]
async fn test_submit_overrides_pending_input() {
    let (history, search) = setup("/products", SearchConfig::default());

    search.input("draft");
    search.submit("final");
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(history.len(), 2);
    assert_eq!(search.current_value().as_deref(), Some("final"));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_the_input_cancels() {
    let (history, search) = setup("/products", SearchConfig::default());

    search.input("gone");
    drop(search);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(history.len(), 1);
}

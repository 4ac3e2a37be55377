//! Request lifecycle state for the data-fetch collaborator.
//!
//! Transport is left to the caller; this module tracks the `data / error /
//! loading` triple and turns failed response bodies into a message.

use log::{debug, warn};

/// Fallback shown when an error body carries no usable message.
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// Loading, data and error for one request slot.
///
/// Only one request is in flight at a time: [`begin`](FetchState::begin)
/// refuses to start a second one until the first has finished.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    data: Option<T>,
    error: Option<String>,
    loading: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> FetchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request. Returns `false` if one is already in flight.
    ///
    /// The previous error is cleared; the previous data is kept only when
    /// `keep_previous_data` is set.
    pub fn begin(&mut self, keep_previous_data: bool) -> bool {
        if self.loading {
            debug!("[fetch] request already in flight");
            return false;
        }
        self.loading = true;
        self.error = None;
        if !keep_previous_data {
            self.data = None;
        }
        true
    }

    /// Finishes the request with data.
    pub fn succeed(&mut self, data: T) {
        self.loading = false;
        self.error = None;
        self.data = Some(data);
    }

    /// Finishes the request with an error message.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("[fetch] {}", message);
        self.loading = false;
        self.error = Some(message);
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn take_data(&mut self) -> Option<T> {
        self.data.take()
    }
}

/// Extracts a display message from a failed response body.
///
/// JSON bodies yield their `message` field (or the body itself when it is a
/// JSON string); other bodies are used as plain text. Anything empty falls
/// back to [`FALLBACK_ERROR`].
pub fn error_message(content_type: Option<&str>, body: &str) -> String {
    let is_json = content_type.is_some_and(|ct| ct.contains("application/json"));
    let message = if is_json {
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(serde_json::Value::String(s)) => Some(s),
            Ok(value) => value
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            Err(_) => Some(body.to_string()),
        }
    } else {
        Some(body.to_string())
    };

    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_flight() {
        let mut state: FetchState<Vec<u32>> = FetchState::new();
        assert!(state.begin(false));
        assert!(!state.begin(false));
        state.succeed(vec![1]);
        assert!(!state.is_loading());
        assert_eq!(state.data(), Some(&vec![1]));
    }

    #[test]
    fn test_keep_previous_data() {
        let mut state = FetchState::new();
        state.succeed("old");
        assert!(state.begin(true));
        assert_eq!(state.data(), Some(&"old"));
        state.fail("boom");
        assert_eq!(state.error(), Some("boom"));
        assert!(state.begin(false));
        assert_eq!(state.data(), None);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_error_message() {
        let json = Some("application/json; charset=utf-8");
        assert_eq!(error_message(json, r#"{"message":"Bad email"}"#), "Bad email");
        assert_eq!(error_message(json, r#"{"code":400}"#), FALLBACK_ERROR);
        assert_eq!(error_message(json, r#""plain json string""#), "plain json string");
        assert_eq!(error_message(Some("text/plain"), "Forbidden"), "Forbidden");
        assert_eq!(error_message(None, ""), FALLBACK_ERROR);
    }
}

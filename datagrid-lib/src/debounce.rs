//! Trailing-edge debouncer on the tokio timer.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::trace;
use tokio_util::sync::CancellationToken;

type Callback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Delays a callback until calls stop arriving for `delay`.
///
/// Each [`call`](Debouncer::call) cancels the pending invocation, if any, and
/// schedules a new one, so at most one invocation is ever pending. Dropping
/// the debouncer cancels whatever is still pending.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<T> {
    delay: Duration,
    callback: Callback<T>,
    pending: Mutex<Option<CancellationToken>>,
    root: CancellationToken,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F>(delay: Duration, callback: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            delay,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
            root: CancellationToken::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value`, replacing any pending invocation.
    pub fn call(&self, value: T) {
        let token = self.root.child_token();
        if let Ok(mut guard) = self.pending.lock()
            && let Some(previous) = guard.replace(token.clone())
        {
            previous.cancel();
        }

        let delay = self.delay;
        let callback = self.callback.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!("[debounce] superseded");
                }
                _ = tokio::time::sleep(delay) => {
                    // Mark as consumed before running so is_pending turns false.
                    token.cancel();
                    callback(value);
                }
            }
        });
    }

    /// Drops the pending invocation. Returns `true` if one was pending.
    pub fn cancel(&self) -> bool {
        let Ok(mut guard) = self.pending.lock() else {
            return false;
        };
        match guard.take() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Returns `true` while an invocation is scheduled and has not fired.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|g| g.as_ref().is_some_and(|t| !t.is_cancelled()))
            .unwrap_or(false)
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

impl<T> fmt::Debug for Debouncer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v| sink.lock().unwrap().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_call_fires() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(500), callback);

        debouncer.call(1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.call(2);
        tokio::time::sleep(Duration::from_millis(200)).await;
        debouncer.call(3);
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(*seen.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(100), callback);

        debouncer.call(1);
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (seen, callback) = recorder();
        let debouncer = Debouncer::new(Duration::from_millis(100), callback);

        debouncer.call(7);
        drop(debouncer);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(seen.lock().unwrap().is_empty());
    }
}

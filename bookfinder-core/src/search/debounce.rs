//! Cancellable debounce timer

use std::time::Duration;
use tokio::task::JoinHandle;

/// Holds back a value until a quiet period has passed
///
/// Arming always cancels the pending timer first, so only the last value
/// armed within the window is delivered. Dropping the debouncer cancels it.
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<JoinHandle<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Drop the pending value, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a value is waiting to be delivered
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T: Send + 'static> Debouncer<T> {
    /// Schedule `value`, restarting the quiet period
    pub fn arm(&mut self, value: T) {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            value
        }));
    }

    /// Wait for the pending value
    ///
    /// Returns `None` immediately when nothing is armed. Cancel safe: if the
    /// returned future is dropped the value stays pending.
    pub async fn fired(&mut self) -> Option<T> {
        let handle = self.pending.as_mut()?;
        let outcome = handle.await;
        self.pending = None;
        outcome.ok()
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}

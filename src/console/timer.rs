use std::time::Duration;

use tokio::task::JoinHandle;

use crate::shared::constants::{MAX_SEARCH_DEBOUNCE_MS, MIN_SEARCH_DEBOUNCE_MS};

/// Trailing-edge debounce timer.
///
/// Each [`schedule`](Self::schedule) cancels the pending callback and starts a
/// new quiet period, so only the last call within the window fires. Dropping
/// the timer cancels whatever is pending.
#[derive(Debug)]
pub struct DebounceTimer {
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    /// Quiet period is clamped to the supported 300-500 ms window
    pub fn new(quiet_ms: u64) -> Self {
        Self {
            quiet: Duration::from_millis(quiet_ms.clamp(MIN_SEARCH_DEBOUNCE_MS, MAX_SEARCH_DEBOUNCE_MS)),
            pending: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Run `callback` once the quiet period has elapsed without another call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let quiet = self.quiet;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet).await;
            callback();
        }));
    }

    /// Cancel the pending callback. Returns whether one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                tracing::debug!("Debounce timer cancelled");
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

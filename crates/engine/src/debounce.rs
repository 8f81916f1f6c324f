//! Debounced trigger scheduling.
//!
//! A [`DebounceScheduler`] owns at most one pending timer. Scheduling a new
//! trigger always aborts the previous one first, so two triggers can never
//! fire for the same widget. The timer lives on the Tokio clock, which lets
//! tests pause and advance time deterministically.

use std::time::Duration;

use tokio::{task::JoinHandle, time};
use tracing::trace;

#[derive(Debug)]
pub struct DebounceScheduler {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl DebounceScheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    /// Run `fire` once the input has been quiet for the configured delay.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            fire();
        }));
    }

    /// Abort the pending trigger, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                trace!("cancelled pending debounce trigger");
                true
            }
            _ => false,
        }
    }

    /// Whether a trigger is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for DebounceScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

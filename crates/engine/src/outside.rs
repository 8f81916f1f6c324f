//! Outside-interaction detection.
//!
//! The host application publishes every document-level pointer interaction
//! on an [`InteractionBus`]. Each mounted widget holds exactly one
//! subscription to that bus for as long as it is mounted, and checks every
//! event against the region the render layer last reported for it. Events
//! outside the region dismiss the widget's results surface.
//!
//! A subscription is a scoped resource: [`InteractionSubscription`] aborts its
//! listener task when dropped and [`InteractionSubscription::release`] waits
//! until the receiver is gone, so repeated mount/unmount cycles never leak
//! listeners on the bus.

use quicksearch_types::PointerEvent;
use tokio::{
    sync::broadcast::{self, error::RecvError},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default number of undelivered pointer events a slow subscriber may lag by.
pub const DEFAULT_BUS_CAPACITY: usize = 64;

/// Document-scope pointer interaction signal shared by every widget instance
/// of a host application.
#[derive(Clone, Debug)]
pub struct InteractionBus {
    sender: broadcast::Sender<PointerEvent>,
}

impl InteractionBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a pointer interaction. Returns the number of widgets notified.
    pub fn emit(&self, event: PointerEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Number of widgets currently subscribed.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn subscribe(&self) -> broadcast::Receiver<PointerEvent> {
        self.sender.subscribe()
    }
}

impl Default for InteractionBus {
    fn default() -> Self {
        Self::new(DEFAULT_BUS_CAPACITY)
    }
}

/// A live subscription to an [`InteractionBus`], owned by one widget.
#[derive(Debug)]
pub struct InteractionSubscription {
    task: Option<JoinHandle<()>>,
    cancel: CancellationToken,
}

impl InteractionSubscription {
    /// Subscribe to `bus` and invoke `on_event` for every delivered event
    /// until `cancel` fires or the subscription is released.
    ///
    /// The receiver is registered before this function returns.
    pub fn spawn<F>(bus: &InteractionBus, cancel: CancellationToken, on_event: F) -> Self
    where
        F: Fn(PointerEvent) + Send + 'static,
    {
        let mut receiver = bus.subscribe();
        let listener_cancel = cancel.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = listener_cancel.cancelled() => break,
                    received = receiver.recv() => match received {
                        Ok(event) => on_event(event),
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "pointer listener lagged behind the interaction bus");
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
            debug!("pointer listener stopped");
        });
        Self { task: Some(task), cancel }
    }

    /// Stop listening and wait until the bus receiver has been dropped.
    pub async fn release(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for InteractionSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

//! A mounted search widget instance.
//!
//! [`SearchBar`] ties the pieces together for one widget:
//!
//! - keystrokes go through [`SearchBar::on_query_changed`], which updates the
//!   state machine eagerly and (re)arms the debounce timer
//! - a fired timer dispatches one request tagged with a fresh generation
//! - request outcomes are applied only if their generation is still current
//! - pointer events from the [`InteractionBus`] outside the reported region
//!   close the results surface
//! - `select`, `clear` and `focus` are the user-initiated side transitions
//!
//! Every transition publishes a [`SearchSnapshot`] on a watch channel. The
//! instance owns its timer, its bus subscription and a cancellation token;
//! all of them are released at [`SearchBar::unmount`] (or on drop), after
//! which no outstanding request can touch the state again.

use std::{
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures_util::FutureExt;
use quicksearch_types::{Generation, PointerEvent, QueryError, WidgetRegion};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    config::SearchBarConfig,
    debounce::DebounceScheduler,
    fetch::{QueryFetcher, settle},
    lifecycle::RequestLifecycle,
    outside::{InteractionBus, InteractionSubscription},
    state::{SearchSnapshot, SearchState},
    view::{DropdownView, InputFieldView},
};

struct Inner<T> {
    state: SearchState<T>,
    lifecycle: RequestLifecycle,
    region: WidgetRegion,
    released: bool,
}

/// State shared between the widget handle and its background tasks.
struct Shared<T> {
    inner: Mutex<Inner<T>>,
    snapshots: watch::Sender<SearchSnapshot<T>>,
}

impl<T> Shared<T> {
    fn new() -> Self {
        let (snapshots, _) = watch::channel(SearchSnapshot::default());
        Self {
            inner: Mutex::new(Inner {
                state: SearchState::new(),
                lifecycle: RequestLifecycle::new(),
                region: WidgetRegion::default(),
                released: false,
            }),
            snapshots,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a transition and publish the resulting snapshot when `f` reports
    /// a change. Transitions on a released widget are ignored.
    fn transition<R: Default>(&self, f: impl FnOnce(&mut Inner<T>) -> (R, bool)) -> R {
        let mut inner = self.lock();
        if inner.released {
            return R::default();
        }
        let (result, changed) = f(&mut inner);
        if changed {
            let snapshot = inner.state.snapshot(inner.lifecycle.current());
            self.snapshots.send_replace(snapshot);
        }
        result
    }

    fn snapshot(&self) -> SearchSnapshot<T> {
        let inner = self.lock();
        inner.state.snapshot(inner.lifecycle.current())
    }

    /// Start a request for the keystroke that produced `token`.
    ///
    /// Returns `None` if the widget is gone or a later keystroke or clear has
    /// superseded `token` since the trigger was armed.
    fn begin_request(&self, token: Generation) -> Option<Generation> {
        let mut inner = self.lock();
        if inner.released || !inner.lifecycle.is_current(token) {
            return None;
        }
        Some(inner.lifecycle.begin())
    }

    fn complete_request(&self, generation: Generation, query: &str, outcome: Result<Vec<T>, QueryError>) {
        self.transition(|inner| {
            if !inner.lifecycle.finish(generation) {
                debug!(generation = %generation, query = %query, "discarding stale query outcome");
                return ((), false);
            }
            match &outcome {
                Ok(items) => info!(generation = %generation, query = %query, item_count = items.len(), "applied query results"),
                Err(error) => warn!(generation = %generation, query = %query, error = %error, "query failed"),
            }
            inner.state.apply_outcome(outcome);
            ((), true)
        });
    }

    fn handle_pointer(&self, event: PointerEvent) {
        self.transition(|inner| {
            if inner.region.contains(event.position) {
                return ((), false);
            }
            let closed = inner.state.reduce_force_closed();
            if closed {
                debug!(x = event.position.x, y = event.position.y, "pointer outside widget closed the dropdown");
            }
            ((), closed)
        });
    }

    fn release(&self) {
        let mut inner = self.lock();
        inner.released = true;
    }
}

/// Request Lifecycle Manager entry point, invoked by a fired debounce timer.
fn dispatch<T>(
    shared: Arc<Shared<T>>,
    fetcher: Arc<dyn QueryFetcher<T>>,
    query: String,
    token: Generation,
    cancel: CancellationToken,
) where
    T: Send + Sync + 'static,
{
    let Some(generation) = shared.begin_request(token) else {
        debug!(token = %token, query = %query, "trigger superseded before dispatch");
        return;
    };
    info!(generation = %generation, query = %query, "dispatching query");
    tokio::spawn(async move {
        let fetch = AssertUnwindSafe(fetcher.fetch(&query)).catch_unwind();
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(generation = %generation, "dropping in-flight query on unmount");
                return;
            }
            result = fetch => result.unwrap_or_else(|_| Err(anyhow::anyhow!("fetch function panicked"))),
        };
        shared.complete_request(generation, &query, settle(result));
    });
}

/// One mounted search-input widget.
pub struct SearchBar<T: Send + Sync + 'static> {
    config: SearchBarConfig<T>,
    shared: Arc<Shared<T>>,
    debounce: DebounceScheduler,
    subscription: Option<InteractionSubscription>,
    cancel: CancellationToken,
}

impl<T: Send + Sync + 'static> SearchBar<T> {
    /// Mount a widget: allocate its state and subscribe to `bus`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn mount(config: SearchBarConfig<T>, bus: &InteractionBus) -> Self {
        let shared = Arc::new(Shared::new());
        let cancel = CancellationToken::new();
        let listener_state = Arc::clone(&shared);
        let subscription = InteractionSubscription::spawn(bus, cancel.child_token(), move |event| {
            listener_state.handle_pointer(event);
        });
        debug!(debounce = ?config.debounce_delay, "search bar mounted");
        Self {
            debounce: DebounceScheduler::new(config.debounce_delay),
            config,
            shared,
            subscription: Some(subscription),
            cancel,
        }
    }

    /// Accept new input text.
    ///
    /// Cancels the pending trigger and supersedes any request in flight. A
    /// non-blank query switches to `Loading` right away and fetches once the
    /// input stays unchanged for the debounce delay; a blank query hides the
    /// results immediately without fetching.
    pub fn on_query_changed(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.debounce.cancel();
        let token = self.shared.transition(|inner| {
            let token = inner.lifecycle.supersede();
            (inner.state.reduce_query_changed(query.clone()).then_some(token), true)
        });
        let Some(token) = token else {
            debug!("blank query, results hidden");
            return;
        };

        let shared = Arc::clone(&self.shared);
        let fetcher = Arc::clone(&self.config.fetcher);
        let cancel = self.cancel.child_token();
        self.debounce.schedule(move || dispatch(shared, fetcher, query, token, cancel));
    }

    /// Hand the item at `index` of the current result set to the selection
    /// handler. State is left untouched; follow-up such as [`clear`] is up to
    /// the caller.
    ///
    /// Returns `false` when no item exists at `index`.
    ///
    /// [`clear`]: SearchBar::clear
    pub fn select(&self, index: usize) -> bool {
        let results = Arc::clone(self.shared.lock().state.results());
        let Some(item) = results.get(index) else {
            return false;
        };
        if let Some(handler) = &self.config.on_select {
            handler(item);
        }
        true
    }

    /// Reset query, results and error, cancel the pending trigger and hide.
    pub fn clear(&mut self) {
        self.debounce.cancel();
        self.shared.transition(|inner| {
            inner.lifecycle.supersede();
            inner.state.reduce_clear();
            ((), true)
        });
        debug!("search bar cleared");
    }

    /// Reopen the results surface if the last result set is non-empty.
    pub fn focus(&self) {
        self.shared.transition(|inner| ((), inner.state.reduce_focus()));
    }

    /// Report the area the widget currently occupies. Pointer events inside
    /// it never dismiss the results surface.
    pub fn set_region(&self, region: WidgetRegion) {
        self.shared.lock().region = region;
    }

    pub fn snapshot(&self) -> SearchSnapshot<T> {
        self.shared.snapshot()
    }

    /// Subscribe to state snapshots published after every transition.
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot<T>> {
        self.shared.snapshots.subscribe()
    }

    /// Whether a debounced trigger is armed and has not fired yet.
    pub fn has_pending_trigger(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Requests dispatched and not yet settled, including stale ones.
    pub fn outstanding_requests(&self) -> usize {
        self.shared.lock().lifecycle.outstanding()
    }

    pub fn config(&self) -> &SearchBarConfig<T> {
        &self.config
    }

    pub fn input_view(&self) -> InputFieldView {
        InputFieldView::project(&self.snapshot(), &self.config.options)
    }

    pub fn dropdown_view(&self) -> Option<DropdownView> {
        DropdownView::project(&self.snapshot(), &self.config)
    }

    /// Tear the widget down and wait until its bus subscription is gone.
    pub async fn unmount(mut self) {
        let subscription = self.subscription.take();
        self.teardown();
        if let Some(subscription) = subscription {
            subscription.release().await;
        }
        debug!("search bar unmounted");
    }

    fn teardown(&mut self) {
        self.debounce.cancel();
        self.cancel.cancel();
        self.shared.release();
        self.subscription.take();
    }
}

impl<T: Send + Sync + 'static> Drop for SearchBar<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetcher_fn;
    use quicksearch_types::{Rect, VisibilityState};
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };
    use tokio::time;

    fn counting_bar(calls: Arc<AtomicUsize>) -> (SearchBar<String>, InteractionBus) {
        let bus = InteractionBus::default();
        let fetcher = fetcher_fn(move |query: String| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok::<_, anyhow::Error>(Some(vec![format!("{query}-1"), format!("{query}-2")])) }
        });
        let config = SearchBarConfig::builder(fetcher, |item: &String| item.clone()).build();
        (SearchBar::mount(config, &bus), bus)
    }

    #[tokio::test(start_paused = true)]
    async fn keystroke_loads_eagerly_and_fetches_after_delay() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (mut bar, _bus) = counting_bar(Arc::clone(&calls));

        bar.on_query_changed("rust");
        assert_eq!(bar.snapshot().visibility, VisibilityState::Loading);
        assert!(bar.has_pending_trigger());

        time::sleep(Duration::from_millis(499)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let snapshot = bar.snapshot();
        assert_eq!(snapshot.visibility, VisibilityState::Results);
        assert_eq!(snapshot.results.as_ref(), ["rust-1".to_string(), "rust-2".to_string()]);
        assert_eq!(bar.outstanding_requests(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn pointer_inside_region_keeps_dropdown_open() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (mut bar, bus) = counting_bar(calls);
        bar.set_region(WidgetRegion::from_parts(Rect::new(0.0, 0.0, 100.0, 40.0), Some(Rect::new(0.0, 40.0, 100.0, 200.0))));
        bar.on_query_changed("rust");
        time::sleep(Duration::from_millis(600)).await;
        assert!(bar.snapshot().dropdown_visible);

        bus.emit(PointerEvent::at(50.0, 120.0));
        time::sleep(Duration::from_millis(1)).await;
        assert!(bar.snapshot().dropdown_visible);

        bus.emit(PointerEvent::at(500.0, 120.0));
        time::sleep(Duration::from_millis(1)).await;
        assert!(!bar.snapshot().dropdown_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_widget_cancels_the_pending_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let (mut bar, bus) = counting_bar(Arc::clone(&calls));
        bar.on_query_changed("rust");
        drop(bar);

        time::sleep(Duration::from_secs(2)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn trigger_armed_before_a_newer_keystroke_never_starts_a_request() {
        let shared = Shared::<String>::new();
        let stale = shared.lock().lifecycle.supersede();
        let fresh = shared.lock().lifecycle.supersede();

        assert_eq!(shared.begin_request(stale), None);
        assert_eq!(shared.lock().lifecycle.outstanding(), 0);

        let generation = shared.begin_request(fresh).expect("current token starts a request");
        assert!(shared.lock().lifecycle.is_current(generation));
        assert_eq!(shared.begin_request(fresh), None, "a token starts at most one request");
    }

    #[test]
    fn released_widget_starts_no_request() {
        let shared = Shared::<String>::new();
        let token = shared.lock().lifecycle.supersede();
        shared.release();
        assert_eq!(shared.begin_request(token), None);
    }

    #[tokio::test(start_paused = true)]
    async fn panicking_fetcher_is_recorded_as_error() {
        let bus = InteractionBus::default();
        let fetcher = fetcher_fn(|query: String| async move {
            if query == "boom" {
                panic!("fetcher bug");
            }
            Ok::<_, anyhow::Error>(Some(vec![query]))
        });
        let config = SearchBarConfig::builder(fetcher, |item: &String| item.clone()).build();
        let mut bar = SearchBar::mount(config, &bus);

        bar.on_query_changed("boom");
        time::sleep(Duration::from_millis(600)).await;
        let snapshot = bar.snapshot();
        assert_eq!(snapshot.visibility, VisibilityState::Error);
        assert_eq!(snapshot.error, Some(QueryError::fetch_failure("fetch function panicked")));
    }
}

//! # Quicksearch Engine
//!
//! Query coordination for search-input widgets: turns raw keystrokes into a
//! debounced, cancellation-safe stream of asynchronous queries and drives the
//! small state machine behind a results dropdown.
//!
//! ## Usage
//!
//! ```ignore
//! use quicksearch_engine::{InteractionBus, SearchBar, SearchBarConfig, fetcher_fn};
//!
//! let bus = InteractionBus::default();
//! let config = SearchBarConfig::builder(
//!     fetcher_fn(|query: String| async move { Ok::<_, anyhow::Error>(Some(vec![query])) }),
//!     |item: &String| item.clone(),
//! )
//! .build();
//!
//! let mut bar = SearchBar::mount(config, &bus);
//! let mut snapshots = bar.subscribe();
//! bar.on_query_changed("rust");
//! snapshots.changed().await?;
//! ```
//!
//! ## Architecture
//!
//! - **`debounce`**: one cancellable timer per widget
//! - **`lifecycle`**: request generations and stale-outcome rejection
//! - **`state`**: the `Hidden / Loading / Error / Empty / Results` machine
//! - **`outside`**: pointer interaction bus and per-widget subscriptions
//! - **`search_bar`**: the mounted widget and its user actions
//! - **`view`**: input field and dropdown projections for render layers

pub mod config;
pub mod debounce;
pub mod fetch;
pub mod lifecycle;
pub mod outside;
pub mod search_bar;
pub mod state;
pub mod view;

pub use config::{DEFAULT_DEBOUNCE_DELAY, ItemRenderer, SearchBarConfig, SearchBarConfigBuilder, SelectHandler};
pub use fetch::{FnFetcher, QueryFetcher, fetcher_fn};
pub use outside::{InteractionBus, InteractionSubscription};
pub use quicksearch_types::{
    DropdownStyle, Generation, InputStyle, Point, PointerEvent, QueryError, Rect, SearchBarOptions, VisibilityState, WidgetRegion,
};
pub use search_bar::SearchBar;
pub use state::SearchSnapshot;
pub use view::{DropdownContent, DropdownRow, DropdownView, InputFieldView};

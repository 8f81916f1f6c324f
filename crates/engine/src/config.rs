//! Immutable per-widget configuration.
//!
//! A [`SearchBarConfig`] is consumed when a widget mounts and never changes
//! afterwards. Only the fetcher and the debounce delay affect coordination;
//! the item renderer, the selection handler and [`SearchBarOptions`] are
//! passed through to the presentation side.

use std::{fmt, sync::Arc, time::Duration};

use quicksearch_types::SearchBarOptions;

use crate::fetch::QueryFetcher;

/// Delay applied when the caller does not configure one.
pub const DEFAULT_DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Projects an item into the label shown in the results list.
pub type ItemRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Invoked with the item the user picked.
pub type SelectHandler<T> = Arc<dyn Fn(&T) + Send + Sync>;

pub struct SearchBarConfig<T> {
    pub(crate) fetcher: Arc<dyn QueryFetcher<T>>,
    pub(crate) render_item: ItemRenderer<T>,
    pub(crate) on_select: Option<SelectHandler<T>>,
    pub(crate) debounce_delay: Duration,
    pub(crate) options: SearchBarOptions,
}

impl<T> SearchBarConfig<T> {
    /// Start building a configuration from the two required collaborators.
    pub fn builder<F, R>(fetcher: F, render_item: R) -> SearchBarConfigBuilder<T>
    where
        F: QueryFetcher<T> + 'static,
        R: Fn(&T) -> String + Send + Sync + 'static,
    {
        SearchBarConfigBuilder {
            fetcher: Arc::new(fetcher),
            render_item: Arc::new(render_item),
            on_select: None,
            debounce_delay: DEFAULT_DEBOUNCE_DELAY,
            options: SearchBarOptions::default(),
        }
    }

    pub fn debounce_delay(&self) -> Duration {
        self.debounce_delay
    }

    pub fn options(&self) -> &SearchBarOptions {
        &self.options
    }

    pub fn render_item(&self, item: &T) -> String {
        (self.render_item)(item)
    }

    pub fn has_select_handler(&self) -> bool {
        self.on_select.is_some()
    }
}

impl<T> fmt::Debug for SearchBarConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBarConfig")
            .field("debounce_delay", &self.debounce_delay)
            .field("has_select_handler", &self.on_select.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Builder for [`SearchBarConfig`].
pub struct SearchBarConfigBuilder<T> {
    fetcher: Arc<dyn QueryFetcher<T>>,
    render_item: ItemRenderer<T>,
    on_select: Option<SelectHandler<T>>,
    debounce_delay: Duration,
    options: SearchBarOptions,
}

impl<T> SearchBarConfigBuilder<T> {
    pub fn debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn on_select<S>(mut self, handler: S) -> Self
    where
        S: Fn(&T) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(handler));
        self
    }

    pub fn options(mut self, options: SearchBarOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> SearchBarConfig<T> {
        SearchBarConfig {
            fetcher: self.fetcher,
            render_item: self.render_item,
            on_select: self.on_select,
            debounce_delay: self.debounce_delay,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::fetcher_fn;

    #[test]
    fn builder_applies_defaults() {
        let config = SearchBarConfig::builder(
            fetcher_fn(|_query: String| async { Ok::<_, anyhow::Error>(Some(Vec::<u32>::new())) }),
            |item: &u32| item.to_string(),
        )
        .build();
        assert_eq!(config.debounce_delay(), DEFAULT_DEBOUNCE_DELAY);
        assert!(!config.has_select_handler());
        assert_eq!(config.options(), &SearchBarOptions::default());
        assert_eq!(config.render_item(&42), "42");
    }

    #[test]
    fn builder_overrides() {
        let options = SearchBarOptions {
            placeholder: "Find a post".to_string(),
            ..SearchBarOptions::default()
        };
        let config = SearchBarConfig::builder(
            fetcher_fn(|_query: String| async { Ok::<_, anyhow::Error>(Some(Vec::<u32>::new())) }),
            |item: &u32| item.to_string(),
        )
        .debounce_delay(Duration::from_millis(150))
        .on_select(|_item: &u32| {})
        .options(options.clone())
        .build();
        assert_eq!(config.debounce_delay(), Duration::from_millis(150));
        assert!(config.has_select_handler());
        assert_eq!(config.options(), &options);
    }
}

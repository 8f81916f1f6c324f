//! Visibility state machine for the results surface.
//!
//! [`SearchState`] holds the data behind the widget (query text, the applied
//! result set, the in-flight flag, the last error) plus an orthogonal
//! "dropdown open" flag. The [`VisibilityState`] is never stored; it is derived
//! from those fields every time it is read:
//!
//! | condition                         | visibility |
//! |-----------------------------------|------------|
//! | query is blank after trimming     | `Hidden`   |
//! | a request is pending              | `Loading`  |
//! | the latest outcome was a failure  | `Error`    |
//! | the latest outcome had no items   | `Empty`    |
//! | otherwise                         | `Results`  |
//!
//! A failed outcome clears the result set, so `Error` and `Results` can never
//! be shown together and `focus` never reopens results from before a failure.
//! Outside interactions only lower the dropdown flag; the data is untouched.

use std::sync::Arc;

use quicksearch_types::{Generation, QueryError, VisibilityState};

#[derive(Debug)]
pub struct SearchState<T> {
    query: String,
    results: Arc<[T]>,
    loading: bool,
    error: Option<QueryError>,
    dropdown_open: bool,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Arc::from(Vec::new()),
            loading: false,
            error: None,
            dropdown_open: false,
        }
    }
}

impl<T> SearchState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &Arc<[T]> {
        &self.results
    }

    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_query_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    pub fn visibility(&self) -> VisibilityState {
        if self.is_query_blank() {
            VisibilityState::Hidden
        } else if self.loading {
            VisibilityState::Loading
        } else if self.error.is_some() {
            VisibilityState::Error
        } else if self.results.is_empty() {
            VisibilityState::Empty
        } else {
            VisibilityState::Results
        }
    }

    /// Whether the results surface should currently be drawn.
    pub fn is_dropdown_visible(&self) -> bool {
        self.dropdown_open && self.visibility() != VisibilityState::Hidden
    }

    /// Accept new query text.
    ///
    /// Returns `true` when the query is non-blank and a fetch should be
    /// scheduled. A blank query hides everything immediately.
    pub fn reduce_query_changed(&mut self, query: String) -> bool {
        self.query = query;
        if self.is_query_blank() {
            self.reset_data();
            self.dropdown_open = false;
            return false;
        }
        self.loading = true;
        self.dropdown_open = true;
        true
    }

    /// Apply the outcome of the current request.
    ///
    /// Callers are responsible for the generation check; this method assumes
    /// the outcome belongs to the latest request.
    pub fn apply_outcome(&mut self, outcome: Result<Vec<T>, QueryError>) {
        self.loading = false;
        match outcome {
            Ok(items) => {
                self.results = Arc::from(items);
                self.error = None;
            }
            Err(error) => {
                self.results = Arc::from(Vec::new());
                self.error = Some(error);
            }
        }
    }

    /// Hide the results surface after an interaction outside the widget.
    /// Returns whether anything changed.
    pub fn reduce_force_closed(&mut self) -> bool {
        std::mem::replace(&mut self.dropdown_open, false)
    }

    /// Reopen the results surface when there is something to show.
    /// Returns whether anything changed.
    pub fn reduce_focus(&mut self) -> bool {
        if self.results.is_empty() || self.dropdown_open {
            return false;
        }
        self.dropdown_open = true;
        true
    }

    /// Reset query, results and error, and hide the surface.
    pub fn reduce_clear(&mut self) {
        self.query.clear();
        self.reset_data();
        self.dropdown_open = false;
    }

    fn reset_data(&mut self) {
        self.results = Arc::from(Vec::new());
        self.error = None;
        self.loading = false;
    }

    pub fn snapshot(&self, generation: Generation) -> SearchSnapshot<T> {
        SearchSnapshot {
            query: self.query.clone(),
            visibility: self.visibility(),
            dropdown_visible: self.is_dropdown_visible(),
            results: Arc::clone(&self.results),
            error: self.error.clone(),
            generation,
        }
    }
}

/// Immutable view of the widget state handed to render layers.
#[derive(Debug)]
pub struct SearchSnapshot<T> {
    pub query: String,
    pub visibility: VisibilityState,
    pub dropdown_visible: bool,
    pub results: Arc<[T]>,
    pub error: Option<QueryError>,
    pub generation: Generation,
}

impl<T> Clone for SearchSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            query: self.query.clone(),
            visibility: self.visibility,
            dropdown_visible: self.dropdown_visible,
            results: Arc::clone(&self.results),
            error: self.error.clone(),
            generation: self.generation,
        }
    }
}

impl<T> Default for SearchSnapshot<T> {
    fn default() -> Self {
        SearchState::new().snapshot(Generation::INITIAL)
    }
}

//! Shared value types for the quicksearch widget.
//!
//! Everything here is plain data: the engine owns the behavior, and render
//! layers only ever see these types through read-only snapshots.

pub mod error;
pub mod geometry;
pub mod options;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::QueryError;
pub use geometry::{Point, PointerEvent, Rect, WidgetRegion};
pub use options::{DropdownStyle, InputStyle, SearchBarOptions};

/// Presentational mode of the results surface.
///
/// Exactly one mode is active at a time. The value is always derived from the
/// query text, the in-flight flag and the last applied outcome; callers never
/// set it directly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    /// Nothing to show: the query is blank or the widget was cleared.
    #[default]
    Hidden,
    /// A query was accepted and its outcome has not arrived yet.
    Loading,
    /// The latest query failed or resolved to nothing.
    Error,
    /// The latest query resolved to zero items.
    Empty,
    /// The latest query resolved to at least one item.
    Results,
}

impl VisibilityState {
    /// Short lowercase name used in logs and the demo output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Empty => "empty",
            Self::Results => "results",
        }
    }
}

impl fmt::Display for VisibilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monotonic marker identifying a logical query request.
///
/// Only the outcome of the request carrying the latest generation may touch
/// visible state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    /// The generation before any request was issued.
    pub const INITIAL: Generation = Generation(0);

    /// Returns the following generation.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

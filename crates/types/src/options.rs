//! Presentation passthrough options.
//!
//! None of these values influence the coordination engine. They are carried
//! unchanged from configuration to the input field and dropdown projections so
//! a render layer can style itself. All style values are opaque strings in the
//! render layer's own units.

use serde::{Deserialize, Serialize};

/// Default placeholder shown in an empty input field.
pub const DEFAULT_PLACEHOLDER: &str = "Search...";
/// Default label shown while a query is pending.
pub const DEFAULT_LOADING_LABEL: &str = "Loading...";
/// Default label shown when the latest query matched nothing.
pub const DEFAULT_EMPTY_LABEL: &str = "No results found";
/// Default label shown when the latest query failed.
pub const DEFAULT_ERROR_LABEL: &str = "Something went wrong";

/// Visual options for one widget instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBarOptions {
    pub placeholder: String,
    pub hide_search_icon: bool,
    pub loading_label: String,
    pub empty_label: String,
    pub error_label: String,
    pub input: InputStyle,
    pub dropdown: DropdownStyle,
}

impl Default for SearchBarOptions {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            hide_search_icon: false,
            loading_label: DEFAULT_LOADING_LABEL.to_string(),
            empty_label: DEFAULT_EMPTY_LABEL.to_string(),
            error_label: DEFAULT_ERROR_LABEL.to_string(),
            input: InputStyle::default(),
            dropdown: DropdownStyle::default(),
        }
    }
}

/// Styling knobs for the input field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputStyle {
    pub font_color: String,
    pub border_radius: String,
    pub border_color: String,
    pub font_size: String,
    pub height: String,
    pub background_color: String,
    pub search_icon_color: String,
    pub close_icon_color: String,
}

impl Default for InputStyle {
    fn default() -> Self {
        Self {
            font_color: "#000".to_string(),
            border_radius: "8px".to_string(),
            border_color: "#ccc".to_string(),
            font_size: "16px".to_string(),
            height: "45px".to_string(),
            background_color: "#fff".to_string(),
            search_icon_color: "#888".to_string(),
            close_icon_color: "#888".to_string(),
        }
    }
}

/// Styling knobs for the results dropdown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownStyle {
    pub background_color: String,
    pub border_color: String,
    pub max_height: String,
    pub border_radius: String,
    pub scroll_bar_color: String,
}

impl Default for DropdownStyle {
    fn default() -> Self {
        Self {
            background_color: "#fff".to_string(),
            border_color: "#ccc".to_string(),
            max_height: "60vh".to_string(),
            border_radius: "8px".to_string(),
            scroll_bar_color: "#ccc".to_string(),
        }
    }
}

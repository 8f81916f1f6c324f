//! Read-only projections for the two presentation sub-views.
//!
//! A render layer draws an input field and, below it, a results list. Both
//! are derived from a [`SearchSnapshot`] plus the passthrough options; neither
//! holds state of its own.

use quicksearch_types::{DropdownStyle, InputStyle, SearchBarOptions, VisibilityState};

use crate::{config::SearchBarConfig, state::SearchSnapshot};

/// What the input field should display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputFieldView {
    pub query: String,
    pub placeholder: String,
    pub show_search_icon: bool,
    /// The clear icon is only offered while there is text to clear.
    pub show_clear_icon: bool,
    pub style: InputStyle,
}

impl InputFieldView {
    pub fn project<T>(snapshot: &SearchSnapshot<T>, options: &SearchBarOptions) -> Self {
        Self {
            query: snapshot.query.clone(),
            placeholder: options.placeholder.clone(),
            show_search_icon: !options.hide_search_icon,
            show_clear_icon: !snapshot.query.is_empty(),
            style: options.input.clone(),
        }
    }
}

/// One selectable row in the results list. `index` is the position to pass
/// back to `SearchBar::select`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownRow {
    pub index: usize,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropdownContent {
    Loading(String),
    Error(String),
    Empty(String),
    Rows(Vec<DropdownRow>),
}

/// What the results surface should display while it is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownView {
    pub content: DropdownContent,
    pub style: DropdownStyle,
}

impl DropdownView {
    /// Project the open results surface, or `None` while it is closed.
    pub fn project<T>(snapshot: &SearchSnapshot<T>, config: &SearchBarConfig<T>) -> Option<Self> {
        if !snapshot.dropdown_visible {
            return None;
        }
        let options = config.options();
        let content = match snapshot.visibility {
            VisibilityState::Hidden => return None,
            VisibilityState::Loading => DropdownContent::Loading(options.loading_label.clone()),
            VisibilityState::Error => DropdownContent::Error(options.error_label.clone()),
            VisibilityState::Empty => DropdownContent::Empty(options.empty_label.clone()),
            VisibilityState::Results => DropdownContent::Rows(
                snapshot
                    .results
                    .iter()
                    .enumerate()
                    .map(|(index, item)| DropdownRow {
                        index,
                        label: config.render_item(item),
                    })
                    .collect(),
            ),
        };
        Some(Self {
            content,
            style: options.dropdown.clone(),
        })
    }
}

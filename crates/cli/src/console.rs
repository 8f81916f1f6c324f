//! Line-based input events and plain-text snapshot rendering.

use quicksearch_engine::{DropdownContent, DropdownView, PointerEvent, Rect, SearchSnapshot, WidgetRegion};
use thiserror::Error;

/// Width of the simulated widget on the pointer plane.
const WIDGET_WIDTH: f64 = 640.0;
const INPUT_HEIGHT: f64 = 45.0;
const DROPDOWN_HEIGHT: f64 = 400.0;

/// One line of console input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replace the query text, as one keystroke would.
    Query(String),
    Clear,
    Focus,
    Select(usize),
    /// Pointer press outside the widget.
    Outside,
    /// Pointer press on the input field.
    Inside,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command ':{name}' (try :clear, :focus, :select <n>, :outside, :inside, :quit)")]
    UnknownCommand { name: String },
    #[error("':select' expects a row index, got '{value}'")]
    InvalidIndex { value: String },
}

impl Command {
    /// Lines starting with `:` are commands; anything else is query text.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Query(line.to_string()));
        };
        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        match name {
            "clear" => Ok(Self::Clear),
            "focus" => Ok(Self::Focus),
            "outside" => Ok(Self::Outside),
            "inside" => Ok(Self::Inside),
            "quit" | "q" => Ok(Self::Quit),
            "select" => {
                let value = parts.next().unwrap_or_default();
                value
                    .parse()
                    .map(Self::Select)
                    .map_err(|_| CommandError::InvalidIndex { value: value.to_string() })
            }
            other => Err(CommandError::UnknownCommand { name: other.to_string() }),
        }
    }
}

/// The area the simulated widget occupies: the input field with the
/// dropdown directly below it.
pub fn widget_region() -> WidgetRegion {
    WidgetRegion::from_parts(
        Rect::new(0.0, 0.0, WIDGET_WIDTH, INPUT_HEIGHT),
        Some(Rect::new(0.0, INPUT_HEIGHT, WIDGET_WIDTH, DROPDOWN_HEIGHT)),
    )
}

pub fn outside_press() -> PointerEvent {
    PointerEvent::at(WIDGET_WIDTH + 100.0, INPUT_HEIGHT / 2.0)
}

pub fn inside_press() -> PointerEvent {
    PointerEvent::at(WIDGET_WIDTH / 2.0, INPUT_HEIGHT / 2.0)
}

/// Render a snapshot header followed by the open dropdown, if any.
pub fn render_snapshot<T>(snapshot: &SearchSnapshot<T>, dropdown: Option<&DropdownView>) -> String {
    let mut out = format!(
        "[{}] query={:?} generation={}",
        snapshot.visibility, snapshot.query, snapshot.generation
    );
    if let Some(error) = &snapshot.error {
        out.push_str(&format!(" error=\"{error}\""));
    }
    match dropdown.map(|view| &view.content) {
        None => out.push_str("\n  (dropdown closed)"),
        Some(DropdownContent::Loading(label) | DropdownContent::Empty(label) | DropdownContent::Error(label)) => {
            out.push_str(&format!("\n  {label}"));
        }
        Some(DropdownContent::Rows(rows)) => {
            for row in rows {
                out.push_str(&format!("\n  {:>3}  {}", row.index, row.label));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksearch_engine::{DropdownRow, DropdownStyle, Generation, QueryError, VisibilityState};
    use std::sync::Arc;

    #[test]
    fn plain_text_is_a_query() {
        assert_eq!(Command::parse("rust async"), Ok(Command::Query("rust async".into())));
        assert_eq!(Command::parse(""), Ok(Command::Query(String::new())));
    }

    #[test]
    fn colon_lines_are_commands() {
        assert_eq!(Command::parse(":clear"), Ok(Command::Clear));
        assert_eq!(Command::parse(":focus"), Ok(Command::Focus));
        assert_eq!(Command::parse(":select 3"), Ok(Command::Select(3)));
        assert_eq!(Command::parse(":outside"), Ok(Command::Outside));
        assert_eq!(Command::parse(":inside"), Ok(Command::Inside));
        assert_eq!(Command::parse(":quit"), Ok(Command::Quit));
    }

    #[test]
    fn malformed_commands_are_rejected() {
        assert_eq!(
            Command::parse(":select two"),
            Err(CommandError::InvalidIndex { value: "two".into() })
        );
        assert_eq!(
            Command::parse(":select"),
            Err(CommandError::InvalidIndex { value: String::new() })
        );
        assert_eq!(
            Command::parse(":open"),
            Err(CommandError::UnknownCommand { name: "open".into() })
        );
    }

    #[test]
    fn simulated_presses_land_where_expected() {
        let region = widget_region();
        assert!(region.contains(inside_press().position));
        assert!(!region.contains(outside_press().position));
    }

    #[test]
    fn renders_rows_under_the_header() {
        let snapshot = SearchSnapshot {
            query: "qui".to_string(),
            visibility: VisibilityState::Results,
            dropdown_visible: true,
            results: Arc::from(vec![1u32, 2]),
            error: None,
            generation: Generation::INITIAL.next(),
        };
        let view = DropdownView {
            content: DropdownContent::Rows(vec![
                DropdownRow { index: 0, label: "#1 first".into() },
                DropdownRow { index: 1, label: "#2 second".into() },
            ]),
            style: DropdownStyle::default(),
        };
        let rendered = render_snapshot(&snapshot, Some(&view));
        assert_eq!(rendered, "[results] query=\"qui\" generation=1\n    0  #1 first\n    1  #2 second");
    }

    #[test]
    fn renders_errors_and_closed_dropdown() {
        let snapshot = SearchSnapshot::<u32> {
            query: "x".to_string(),
            visibility: VisibilityState::Error,
            dropdown_visible: false,
            results: Arc::from(Vec::new()),
            error: Some(QueryError::EmptyResult),
            generation: Generation::INITIAL,
        };
        let rendered = render_snapshot(&snapshot, None);
        assert_eq!(rendered, "[error] query=\"x\" generation=0 error=\"no results found\"\n  (dropdown closed)");
    }
}

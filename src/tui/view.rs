//! Rendering: map MenuState to ratatui lines.
//!
//! Layout, top to bottom:
//!
//! ```text
//! Title
//!
//! --- OPTIONS ---
//! → [x] first item
//! - [ ] second item
//!
//! --- FUNCTIONS ---
//! - Archive
//! - Finish
//! [Tab] switch  [Up/Down] move  [Enter] toggle  [^C] quit
//! ```
//!
//! Rows that do not fit are dropped rather than scrolled. Labels are
//! clipped to the terminal width and reduced to printable ASCII.

use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::types::MenuItem;

use super::state::{Group, MenuState};
use super::theme;

pub const OPTIONS_HEADER: &str = "--- OPTIONS ---";
pub const FUNCTIONS_HEADER: &str = "--- FUNCTIONS ---";

const CHECKED: &str = "[x]";
const UNCHECKED: &str = "[ ]";

/// Columns kept free to the right of every item label.
const LABEL_MARGIN: usize = 10;

/// Item rows stop this many rows above the bottom of the menu area,
/// leaving room for the FUNCTIONS section.
const ITEM_FOOTROOM: usize = 6;

/// Substitute for characters the menu does not draw.
const REPLACEMENT: char = '?';

/// Render the menu to the terminal frame.
pub fn render<T: MenuItem>(state: &MenuState<T>, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Min(0),    // menu
        Constraint::Length(1), // help
    ])
    .split(frame.area());

    let menu = chunks[0];
    let lines = menu_lines(state, menu.width, menu.height);
    frame.render_widget(Paragraph::new(lines), menu);
    frame.render_widget(render_help(state.options.toggle), chunks[1]);
}

/// Build the visible menu rows for an area of `width` × `height` cells.
pub fn menu_lines<T: MenuItem>(state: &MenuState<T>, width: u16, height: u16) -> Vec<Line<'static>> {
    let height = height as usize;
    let label_width = (width as usize).saturating_sub(LABEL_MARGIN);
    let highlight = theme::highlight(state.options.color);
    let selector = &state.options.selector;
    let display = state.options.display.as_deref();

    let mut lines = vec![
        Line::styled(state.title.clone(), theme::STYLE_TITLE),
        Line::raw(""),
        Line::styled(OPTIONS_HEADER, theme::STYLE_NORMAL),
    ];

    let item_limit = height.saturating_sub(ITEM_FOOTROOM);
    for (i, entry) in state.items.iter().enumerate() {
        if lines.len() >= item_limit {
            break;
        }
        let is_cursor = state.cursor.group == Group::Items && state.cursor.position == i;
        let mark = if state.is_selected(entry.id) { CHECKED } else { UNCHECKED };
        let label = fit_label(&entry.value.label(display), label_width);
        let text = format!("{} {} {}", selector.prefix(is_cursor), mark, label);
        lines.push(row(text, row_style(is_cursor, highlight)));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(FUNCTIONS_HEADER, theme::STYLE_NORMAL));

    for (i, name) in state.actions.iter().enumerate() {
        if lines.len() >= height {
            break;
        }
        let is_cursor = state.cursor.group == Group::Actions && state.cursor.position == i;
        let text = format!("{} {}", selector.prefix(is_cursor), name);
        lines.push(row(text, row_style(is_cursor, highlight)));
    }

    lines
}

/// Clip a label to `width` characters, replacing anything that is not
/// printable ASCII.
pub fn fit_label(label: &str, width: usize) -> String {
    label
        .chars()
        .take(width)
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() {
                c
            } else {
                REPLACEMENT
            }
        })
        .collect()
}

fn row_style(is_cursor: bool, highlight: Style) -> Style {
    if is_cursor { highlight } else { theme::STYLE_NORMAL }
}

fn row(text: String, style: Style) -> Line<'static> {
    Line::from(Span::styled(text, style))
}

/// Help line showing the keybindings.
fn render_help(toggle: bool) -> Paragraph<'static> {
    let help_text = if toggle {
        "[Tab] switch  [Up/Down] move  [Enter] toggle / run  [^C] quit"
    } else {
        "[Tab] switch  [Up/Down] move  [Enter] select / run  [^C] quit"
    };
    Paragraph::new(Span::styled(help_text, theme::STYLE_HELP))
}

// ============================================================================
// TESTS
// ============================================================================

//! Menu styles.
//!
//! Rows are drawn in the normal style; the cursor row takes the
//! highlight color chosen in [`MenuOptions::color`](crate::types::MenuOptions).

use ratatui::style::{Color, Modifier, Style};

use crate::types::HighlightColor;

/// Regular rows and section headers.
pub const STYLE_NORMAL: Style = Style::new().fg(Color::White);

/// Menu title.
pub const STYLE_TITLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Footer / help line.
pub const STYLE_HELP: Style = Style::new().fg(Color::DarkGray);

/// Terminal color for a named highlight.
pub const fn color(highlight: HighlightColor) -> Color {
    match highlight {
        HighlightColor::Red => Color::Red,
        HighlightColor::Green => Color::Green,
        HighlightColor::Yellow => Color::Yellow,
        HighlightColor::Blue => Color::Blue,
        HighlightColor::Magenta => Color::Magenta,
        HighlightColor::Cyan => Color::Cyan,
        HighlightColor::White => Color::White,
    }
}

/// Style of the row under the cursor.
pub const fn highlight(highlight: HighlightColor) -> Style {
    Style::new().fg(color(highlight)).add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_highlight_maps_to_its_color() {
        assert_eq!(color(HighlightColor::Red), Color::Red);
        assert_eq!(color(HighlightColor::Magenta), Color::Magenta);
        assert_eq!(color(HighlightColor::default()), Color::Blue);
    }

    #[test]
    fn highlight_is_bold_and_colored() {
        let style = highlight(HighlightColor::Cyan);
        assert_eq!(style.fg, Some(Color::Cyan));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn help_is_dimmed() {
        assert_eq!(STYLE_HELP.fg, Some(Color::DarkGray));
    }
}

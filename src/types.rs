//! Domain types for picklist.
//!
//! Items are caller-owned values. The menu never inspects them beyond
//! asking for a label and comparing them for `remove` matching. Selection
//! membership is tracked through [`ItemId`] handles, never through values
//! or positions.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Stable handle for one item in a menu session.
///
/// Assigned once when the item enters the list and never reused within
/// the session. Two equal values get distinct handles, so duplicates are
/// independently selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// ITEMS
// ============================================================================

/// A value that can be listed in the Items group.
///
/// `display` is the field selector from [`MenuOptions::display`]. Plain
/// values ignore it; structured records use it to pick their label.
pub trait MenuItem: Clone + PartialEq {
    fn label(&self, display: Option<&str>) -> Cow<'_, str>;
}

impl MenuItem for String {
    fn label(&self, _display: Option<&str>) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl MenuItem for &str {
    fn label(&self, _display: Option<&str>) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl MenuItem for serde_json::Value {
    /// Objects are labelled by their `display` field. Strings are shown
    /// bare; every other value (and an object missing the field) is shown
    /// as JSON text.
    fn label(&self, display: Option<&str>) -> Cow<'_, str> {
        use serde_json::Value;

        let field = match (display, self) {
            (Some(key), Value::Object(map)) => map.get(key),
            _ => None,
        };

        match field.unwrap_or(self) {
            Value::String(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Named highlight color for the cursor row.
///
/// Parsed case-insensitively; unrecognized names fall back to blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum HighlightColor {
    Red,
    Green,
    Yellow,
    #[default]
    Blue,
    Magenta,
    Cyan,
    White,
}

impl HighlightColor {
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "red" => HighlightColor::Red,
            "green" => HighlightColor::Green,
            "yellow" => HighlightColor::Yellow,
            "blue" => HighlightColor::Blue,
            "magenta" => HighlightColor::Magenta,
            "cyan" => HighlightColor::Cyan,
            "white" => HighlightColor::White,
            _ => HighlightColor::default(),
        }
    }
}

impl From<String> for HighlightColor {
    fn from(name: String) -> Self {
        HighlightColor::from_name(&name)
    }
}

impl From<&str> for HighlightColor {
    fn from(name: &str) -> Self {
        HighlightColor::from_name(name)
    }
}

/// Cursor prefix glyphs: `inactive` on every row, `active` on the cursor row.
///
/// Deserializes from a two-element array, e.g. `["-", "→"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "(String, String)")]
pub struct Selector {
    pub inactive: String,
    pub active: String,
}

impl Selector {
    pub fn new(inactive: impl Into<String>, active: impl Into<String>) -> Self {
        Selector {
            inactive: inactive.into(),
            active: active.into(),
        }
    }

    /// Prefix for a row, depending on whether the cursor rests on it.
    pub fn prefix(&self, is_cursor: bool) -> &str {
        if is_cursor { &self.active } else { &self.inactive }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::new("-", "→")
    }
}

impl From<(String, String)> for Selector {
    fn from((inactive, active): (String, String)) -> Self {
        Selector { inactive, active }
    }
}

/// Session configuration.
///
/// The Action Registry is passed separately because it owns callbacks;
/// everything here is plain data and can be loaded from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Highlight color of the cursor row.
    pub color: HighlightColor,
    /// Cursor prefix glyphs.
    pub selector: Selector,
    /// Multi-select mode. When false, committing on an item returns it.
    pub toggle: bool,
    /// Field used to label structured items.
    pub display: Option<String>,
    /// Start with every item selected. Only honored in toggle mode.
    #[serde(alias = "default")]
    pub preselect_all: bool,
}

// ============================================================================
// TESTS
// ============================================================================

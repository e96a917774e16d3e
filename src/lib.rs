//! picklist: an interactive terminal menu.
//!
//! Lists items and named actions in two navigable groups, tracks the
//! cursor and (in toggle mode) a multi-selection, and runs actions on the
//! selection. Actions may add or remove items or end the session.

pub mod action;
pub mod config;
pub mod error;
pub mod menu;
pub mod tui;
pub mod types;

pub use action::{ActionRegistry, ActionResult};
pub use error::{ConfigError, MenuError};
pub use menu::{run, Menu, MenuOutcome};
pub use types::{HighlightColor, ItemId, MenuItem, MenuOptions, Selector};

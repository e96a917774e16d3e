//! Interactive menu engine.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: pure data types (MenuState, Input, Transition)
//! - `update`: pure transitions
//! - `view`: pure rendering
//! - `theme`: styles
//! - `run`: effects (terminal, key reading, action hand-off)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;

#[cfg(test)]
pub(crate) mod script;

//! Error types for menu sessions and configuration loading.
//!
//! Only terminal failures and an explicit interrupt can end a session
//! with an error. Everything that can go wrong while drawing or while
//! applying an action result is recovered locally.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure that ends a menu session without a selection.
#[derive(Debug, Error)]
pub enum MenuError {
    /// The terminal could not be acquired, drawn to, read from, or restored.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    /// The user pressed Ctrl+C.
    #[error("menu interrupted")]
    Interrupted,
}

/// Failure while loading menu defaults from a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

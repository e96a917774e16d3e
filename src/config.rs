//! Default menu options from a JSON config file.
//!
//! The file holds a [`MenuOptions`] object; every key is optional:
//!
//! ```json
//! { "color": "cyan", "selector": [" ", ">"], "toggle": true, "default": false }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::MenuOptions;

/// Directory under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "picklist";

/// File name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.json";

/// `<config dir>/picklist/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load options from `path`. A missing file yields the defaults.
pub fn load_options(path: &Path) -> Result<MenuOptions, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(MenuOptions::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load options from the default config path, or the defaults when
/// there is no config dir or no file.
pub fn load_default_options() -> Result<MenuOptions, ConfigError> {
    match default_config_path() {
        Some(path) => load_options(&path),
        None => Ok(MenuOptions::default()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

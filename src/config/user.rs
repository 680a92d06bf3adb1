//! User configuration loading for levels.
//!
//! User config location: $XDG_CONFIG_HOME/levels/levels.toml
//! Fallback: the platform config directory reported by `dirs`
//! (e.g. ~/.config/levels/levels.toml on Linux).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::LevelsConfig;

/// File name shared by the user and project configuration layers.
pub const CONFIG_FILE_NAME: &str = "levels.toml";

const CONFIG_DIR_NAME: &str = "levels";

/// Errors raised while reading a configuration file that exists.
#[derive(Debug, Error)]
pub enum UserConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type UserConfigResult<T> = Result<T, UserConfigError>;

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/levels/levels.toml
/// 2. Otherwise: `dirs::config_dir()`/levels/levels.toml
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return Some(
            PathBuf::from(xdg_config)
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME),
        );
    }

    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Read and parse one TOML layer. A missing file is `Ok(None)`.
pub fn load_config_file(path: &Path) -> UserConfigResult<Option<LevelsConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| UserConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<LevelsConfig>(&contents)
        .map(Some)
        .map_err(|source| UserConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

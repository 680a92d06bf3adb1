//! Default configuration values for levels.
//!
//! This module provides the lowest settings layer and is used by
//! `levels config init` to generate a configuration template.

use super::settings::{DEFAULT_JAVASCRIPT_MODE, LevelsConfig};

/// Returns the default LevelsConfig layer.
pub fn default_settings() -> LevelsConfig {
    LevelsConfig {
        live: Some(false),
        javascript_mode: Some(DEFAULT_JAVASCRIPT_MODE.to_string()),
        color_scheme: None,
    }
}

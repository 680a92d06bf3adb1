use serde::{Deserialize, Serialize};

/// Mode handed to the JavaScript engine when none is configured.
pub const DEFAULT_JAVASCRIPT_MODE: &str = "mini";

/// One configuration layer as read from `levels.toml` or host options.
///
/// Every field is optional so layers can be merged with
/// [`merge_all`](crate::config::merge_all).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LevelsConfig {
    /// Re-run the engine on every edit, not only on save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub javascript_mode: Option<String>,
    /// Style profile template applied while a session is active.
    /// May contain `{{levels_path}}` / `{{levels_plugin_name}}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
}

/// Fully resolved settings the controller reads on every event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelsSettings {
    pub live: bool,
    pub javascript_mode: String,
    pub color_scheme: Option<String>,
}

impl Default for LevelsSettings {
    fn default() -> Self {
        Self {
            live: false,
            javascript_mode: DEFAULT_JAVASCRIPT_MODE.to_string(),
            color_scheme: None,
        }
    }
}

pub mod defaults;
pub mod loader;
pub mod settings;
pub mod user;
pub mod variables;

pub use loader::{
    SettingsEvent, SettingsEventKind, SettingsLoadOutcome, SettingsOverride, load_settings,
    load_settings_from,
};
pub use settings::{DEFAULT_JAVASCRIPT_MODE, LevelsConfig, LevelsSettings};
pub use user::{UserConfigError, UserConfigResult, load_config_file, user_config_path};
pub use variables::PluginVars;

/// Merge multiple LevelsConfig layers in order.
/// Later configs in the slice have higher precedence (override earlier ones).
/// Use this for layered config: `merge_all(&[defaults, user, project, override])`
pub fn merge_all(configs: &[Option<LevelsConfig>]) -> Option<LevelsConfig> {
    configs.iter().cloned().reduce(merge_settings).flatten()
}

/// Merge two LevelsConfig layers, preferring values from `primary` over `fallback`
pub fn merge_settings(
    fallback: Option<LevelsConfig>,
    primary: Option<LevelsConfig>,
) -> Option<LevelsConfig> {
    match (fallback, primary) {
        (None, None) => None,
        (Some(settings), None) => Some(settings),
        (None, Some(settings)) => Some(settings),
        (Some(fallback), Some(primary)) => Some(LevelsConfig {
            live: primary.live.or(fallback.live),
            javascript_mode: primary.javascript_mode.or(fallback.javascript_mode),
            color_scheme: primary.color_scheme.or(fallback.color_scheme),
        }),
    }
}

impl From<&LevelsConfig> for LevelsSettings {
    fn from(config: &LevelsConfig) -> Self {
        LevelsSettings {
            live: config.live.unwrap_or(false),
            javascript_mode: config
                .javascript_mode
                .clone()
                .unwrap_or_else(|| DEFAULT_JAVASCRIPT_MODE.to_string()),
            color_scheme: config.color_scheme.clone(),
        }
    }
}

impl From<LevelsConfig> for LevelsSettings {
    fn from(config: LevelsConfig) -> Self {
        LevelsSettings::from(&config)
    }
}

impl From<&LevelsSettings> for LevelsConfig {
    fn from(settings: &LevelsSettings) -> Self {
        LevelsConfig {
            live: Some(settings.live),
            javascript_mode: Some(settings.javascript_mode.clone()),
            color_scheme: settings.color_scheme.clone(),
        }
    }
}

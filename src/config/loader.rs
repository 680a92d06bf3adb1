use super::defaults::default_settings;
use super::settings::{LevelsConfig, LevelsSettings};
use super::user::{CONFIG_FILE_NAME, load_config_file, user_config_path};
use super::merge_all;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsEventKind {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsEvent {
    pub kind: SettingsEventKind,
    pub message: String,
}

impl SettingsEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: SettingsEventKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: SettingsEventKind::Warning,
            message: message.into(),
        }
    }

    /// Forward the event to the `log` facade.
    pub fn log(&self) {
        match self.kind {
            SettingsEventKind::Info => log::info!(target: "levels::config", "{}", self.message),
            SettingsEventKind::Warning => log::warn!(target: "levels::config", "{}", self.message),
        }
    }
}

/// Highest-precedence layer supplied by the caller.
#[derive(Clone, Debug)]
pub enum SettingsOverride {
    /// A TOML file named explicitly (e.g. `levels --config`).
    File(PathBuf),
    /// Settings pushed by the host as JSON.
    Json(Value),
}

#[derive(Default, Debug)]
pub struct SettingsLoadOutcome {
    pub settings: Option<LevelsSettings>,
    pub events: Vec<SettingsEvent>,
}

impl SettingsLoadOutcome {
    /// Log every event and fall back to defaults when nothing loaded.
    pub fn into_settings(self) -> LevelsSettings {
        for event in &self.events {
            event.log();
        }
        self.settings.unwrap_or_default()
    }
}

pub fn load_settings(
    root_path: Option<&Path>,
    override_settings: Option<SettingsOverride>,
) -> SettingsLoadOutcome {
    load_settings_from(user_config_path().as_deref(), root_path, override_settings)
}

/// Layered loading with an explicit user config location.
///
/// Precedence: defaults < user < project (`<root>/levels.toml`) < override.
pub fn load_settings_from(
    user_path: Option<&Path>,
    root_path: Option<&Path>,
    override_settings: Option<SettingsOverride>,
) -> SettingsLoadOutcome {
    let mut events = Vec::new();

    let defaults = Some(default_settings());

    let user_config = user_path.and_then(|path| load_layer(path, "user config", &mut events));

    let project_config = root_path
        .and_then(|root| load_layer(&root.join(CONFIG_FILE_NAME), "project config", &mut events));

    let override_config =
        override_settings.and_then(|layer| load_override(layer, &mut events));

    let merged = merge_all(&[defaults, user_config, project_config, override_config]);
    let settings = merged.map(LevelsSettings::from);

    SettingsLoadOutcome { settings, events }
}

fn load_layer(path: &Path, label: &str, events: &mut Vec<SettingsEvent>) -> Option<LevelsConfig> {
    match load_config_file(path) {
        Ok(Some(config)) => {
            events.push(SettingsEvent::info(format!(
                "Loaded {} from {}",
                label,
                path.display()
            )));
            Some(config)
        }
        Ok(None) => None,
        Err(err) => {
            events.push(SettingsEvent::warning(format!(
                "Failed to load {}: {}",
                label, err
            )));
            None
        }
    }
}

fn load_override(layer: SettingsOverride, events: &mut Vec<SettingsEvent>) -> Option<LevelsConfig> {
    match layer {
        SettingsOverride::File(path) => {
            if !path.exists() {
                events.push(SettingsEvent::warning(format!(
                    "Config file not found: {}",
                    path.display()
                )));
                return None;
            }
            load_layer(&path, "override config", events)
        }
        SettingsOverride::Json(Value::Null) => None,
        SettingsOverride::Json(value) => match serde_json::from_value::<LevelsConfig>(value) {
            Ok(config) => {
                events.push(SettingsEvent::info("Applied host settings"));
                Some(config)
            }
            Err(err) => {
                events.push(SettingsEvent::warning(format!(
                    "Failed to parse host settings: {}",
                    err
                )));
                None
            }
        },
    }
}

//! Settings management for the levels controller.
//!
//! `SettingsManager` holds the active settings and the plugin variables used
//! for placeholder substitution. Settings live in an `ArcSwap` so a host can
//! swap them while events for other documents are being handled; each event
//! reads one consistent snapshot.

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::config::{LevelsSettings, PluginVars};

pub struct SettingsManager {
    settings: ArcSwap<LevelsSettings>,
    vars: PluginVars,
}

impl std::fmt::Debug for SettingsManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsManager")
            .field("settings", &"ArcSwap<LevelsSettings>")
            .field("vars", &self.vars)
            .finish()
    }
}

impl SettingsManager {
    pub fn new(settings: LevelsSettings, vars: PluginVars) -> Self {
        Self {
            settings: ArcSwap::new(Arc::new(settings)),
            vars,
        }
    }

    /// Load the current settings snapshot.
    pub fn load_settings(&self) -> Arc<LevelsSettings> {
        self.settings.load_full()
    }

    /// Replace the active settings.
    pub fn apply_settings(&self, settings: LevelsSettings) {
        self.settings.store(Arc::new(settings));
    }

    pub fn is_live(&self) -> bool {
        self.settings.load().live
    }

    pub fn vars(&self) -> &PluginVars {
        &self.vars
    }

    /// Style profile to apply while a session is active.
    ///
    /// Uses the configured template with plugin variables substituted, or
    /// keeps `current` when no template is configured.
    pub fn session_style_profile(&self, current: Option<&str>) -> Option<String> {
        let settings = self.settings.load();
        match settings.color_scheme.as_deref() {
            Some(template) => Some(self.vars.substitute(template)),
            None => current.map(|profile| self.vars.substitute(profile)),
        }
    }
}

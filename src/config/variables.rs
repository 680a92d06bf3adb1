//! Plugin identity variables substituted into configured strings.
//!
//! Configured values such as the session style profile may reference the
//! installation through `{{levels_path}}` and `{{levels_plugin_name}}`.

use std::path::Path;

/// Placeholder name for the installation directory.
pub const LEVELS_PATH: &str = "levels_path";
/// Placeholder name for the package name.
pub const LEVELS_PLUGIN_NAME: &str = "levels_plugin_name";

const PACKAGE_ARCHIVE_SUFFIX: &str = ".sublime-package";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginVars {
    vars: Vec<(&'static str, String)>,
}

impl PluginVars {
    /// Build the variables for an installation rooted at `base_path`.
    ///
    /// The plugin name is the last path component, with an archive suffix
    /// stripped when the package is installed zipped.
    pub fn from_install_path(base_path: &Path) -> Self {
        let plugin_name = base_path
            .file_name()
            .map(|name| name.to_string_lossy().replace(PACKAGE_ARCHIVE_SUFFIX, ""))
            .unwrap_or_default();

        Self::new(base_path.to_string_lossy().into_owned(), plugin_name)
    }

    pub fn new(levels_path: impl Into<String>, plugin_name: impl Into<String>) -> Self {
        Self {
            vars: vec![
                (LEVELS_PATH, levels_path.into()),
                (LEVELS_PLUGIN_NAME, plugin_name.into()),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace every `{{name}}` occurrence of a known variable.
    ///
    /// Unknown placeholders are left untouched.
    pub fn substitute(&self, source: &str) -> String {
        self.vars
            .iter()
            .fold(source.to_string(), |result, (name, value)| {
                result.replace(&format!("{{{{{name}}}}}"), value)
            })
    }
}

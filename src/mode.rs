//! Mode resolution: which engine, with which options, handles a syntax.

use crate::config::LevelsSettings;
use crate::engine::EngineOptions;
use crate::engine::registry::JS_ENGINE;
use serde_json::json;

const JAVASCRIPT_MARKER: &str = "javascript";

/// Syntax name reported for JavaScript files by [`syntax_for_path`].
pub const JAVASCRIPT_SYNTAX: &str = "JavaScript";

/// Engine selection for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub engine: String,
    pub options: EngineOptions,
}

/// Map a declared syntax name to its engine and options.
///
/// Matching is a case-insensitive substring test, so both `JavaScript` and
/// `Packages/JavaScript/JavaScript.sublime-syntax` resolve. Returns `None`
/// for syntaxes no engine handles.
pub fn resolve(syntax: &str, settings: &LevelsSettings) -> Option<Mode> {
    if syntax.to_lowercase().contains(JAVASCRIPT_MARKER) {
        return Some(Mode {
            engine: JS_ENGINE.to_string(),
            options: json!({ "mode": settings.javascript_mode }),
        });
    }
    None
}

/// Extract the extension from a path, without the leading dot.
pub fn detect_extension(path: &str) -> Option<&str> {
    let filename = path.rsplit(['/', '\\']).next().unwrap_or(path);

    // A leading dot marks a hidden file, not an extension
    match filename.rfind('.') {
        Some(dot_pos) if dot_pos > 0 && dot_pos + 1 < filename.len() => {
            Some(&filename[dot_pos + 1..])
        }
        _ => None,
    }
}

/// Best-effort syntax name for a file, used when the host declares none.
pub fn syntax_for_path(path: &str) -> Option<&'static str> {
    match detect_extension(path)?.to_lowercase().as_str() {
        "js" | "mjs" | "cjs" | "jsx" => Some(JAVASCRIPT_SYNTAX),
        _ => None,
    }
}

use super::{DocumentView, HighlightOptions};
use crate::colorize::HighlightRange;
use crate::session::DocumentId;
use serde::Serialize;
use std::collections::BTreeMap;

/// One stored highlight group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightGroup {
    pub ranges: Vec<HighlightRange>,
    pub options: HighlightOptions,
}

/// In-memory document used by the CLI and by tests.
#[derive(Debug, Clone)]
pub struct MemoryView {
    id: DocumentId,
    text: String,
    syntax: Option<String>,
    style_profile: Option<String>,
    highlights: BTreeMap<String, HighlightGroup>,
    supports_no_outline: bool,
}

impl MemoryView {
    pub fn new(id: DocumentId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            syntax: None,
            style_profile: None,
            highlights: BTreeMap::new(),
            supports_no_outline: true,
        }
    }

    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    pub fn with_style_profile(mut self, profile: impl Into<String>) -> Self {
        self.style_profile = Some(profile.into());
        self
    }

    /// Emulate a host without the no-outline drawing option.
    pub fn without_no_outline_support(mut self) -> Self {
        self.supports_no_outline = false;
        self
    }

    /// Replace the whole text, as an edit would.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn highlight(&self, name: &str) -> Option<&HighlightGroup> {
        self.highlights.get(name)
    }

    pub fn highlights(&self) -> &BTreeMap<String, HighlightGroup> {
        &self.highlights
    }

    /// Names of all current highlight groups, sorted.
    pub fn highlight_names(&self) -> Vec<&str> {
        self.highlights.keys().map(String::as_str).collect()
    }
}

impl DocumentView for MemoryView {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn syntax(&self) -> Option<String> {
        self.syntax.clone()
    }

    fn style_profile(&self) -> Option<String> {
        self.style_profile.clone()
    }

    fn set_style_profile(&mut self, profile: Option<String>) {
        self.style_profile = profile;
    }

    fn add_highlights(&mut self, name: &str, ranges: &[HighlightRange], options: HighlightOptions) {
        self.highlights.insert(
            name.to_string(),
            HighlightGroup {
                ranges: ranges.to_vec(),
                options,
            },
        );
    }

    fn erase_highlights(&mut self, name: &str) {
        self.highlights.remove(name);
    }

    fn supports_no_outline(&self) -> bool {
        self.supports_no_outline
    }
}

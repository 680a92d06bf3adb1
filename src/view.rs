//! Host document API.
//!
//! [`DocumentView`] is everything the controller needs from the host editor
//! for one open document. [`MemoryView`] keeps the same state in memory.

pub mod memory;

pub use memory::MemoryView;

use crate::colorize::HighlightRange;
use crate::session::DocumentId;
use serde::Serialize;

/// Rendering flags attached to every level highlight group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightOptions {
    /// Keep the highlights across saves.
    pub persistent: bool,
    /// Draw an outline border around highlighted ranges.
    pub draw_outline: bool,
}

impl HighlightOptions {
    /// Options for level groups: persistent, and without an outline where
    /// the host supports turning it off.
    pub fn for_levels(supports_no_outline: bool) -> Self {
        Self {
            persistent: true,
            draw_outline: !supports_no_outline,
        }
    }
}

pub trait DocumentView {
    fn id(&self) -> DocumentId;

    /// Full document text.
    fn text(&self) -> String;

    /// Declared syntax name (e.g. `Packages/JavaScript/JavaScript.sublime-syntax`).
    fn syntax(&self) -> Option<String>;

    /// Document-scoped style profile setting; `None` when unset.
    fn style_profile(&self) -> Option<String>;

    fn set_style_profile(&mut self, profile: Option<String>);

    /// Add or replace the highlight group `name`.
    fn add_highlights(&mut self, name: &str, ranges: &[HighlightRange], options: HighlightOptions);

    /// Remove the highlight group `name`; unknown names are ignored.
    fn erase_highlights(&mut self, name: &str);

    /// Whether highlights can be drawn without an outline.
    fn supports_no_outline(&self) -> bool {
        true
    }
}

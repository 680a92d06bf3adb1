//! Conversion of engine spans into named highlight groups.
//!
//! Engines report [`LevelSpan`]s with inclusive end offsets. [`colorize`]
//! groups them per level, converts every span to a half-open
//! [`HighlightRange`] and names each group `level{N}`.

use serde::Serialize;
use std::collections::BTreeMap;

/// A contiguous source range tagged with a nesting level.
///
/// `start` and `end` are character offsets; `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LevelSpan {
    pub level: usize,
    pub start: usize,
    pub end: usize,
}

impl LevelSpan {
    pub fn new(level: usize, start: usize, end: usize) -> Self {
        Self { level, start, end }
    }

    /// Half-open range covering the span (`end` converted to exclusive).
    pub fn to_range(self) -> HighlightRange {
        HighlightRange::new(self.start, self.end.saturating_add(1))
    }
}

impl From<(usize, usize, usize)> for LevelSpan {
    fn from((level, start, end): (usize, usize, usize)) -> Self {
        Self::new(level, start, end)
    }
}

/// A half-open character-offset range (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HighlightRange {
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// All ranges sharing one level, ready to be handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelGroup {
    pub level: usize,
    pub name: String,
    pub ranges: Vec<HighlightRange>,
}

/// Output of [`colorize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Colorized {
    /// One group per level present in the input, ordered by level.
    pub groups: Vec<LevelGroup>,
    /// Highest observed level + 1, or 0 when no spans were given.
    pub level_count: usize,
}

/// Name of the highlight group holding ranges of `level`.
///
/// Signed so the `-1` sentinel cleared on disable gets a name too.
pub fn group_name(level: i64) -> String {
    format!("level{level}")
}

/// Group spans by level and compute the level count.
///
/// Pure: identical input always yields identical groups. Span validity is
/// not checked.
pub fn colorize(spans: &[LevelSpan]) -> Colorized {
    let mut levels: BTreeMap<usize, Vec<HighlightRange>> = BTreeMap::new();
    for span in spans {
        levels.entry(span.level).or_default().push(span.to_range());
    }

    let level_count = levels.keys().next_back().map_or(0, |max| max + 1);

    let groups = levels
        .into_iter()
        .map(|(level, ranges)| LevelGroup {
            level,
            name: group_name(level as i64),
            ranges,
        })
        .collect();

    Colorized {
        groups,
        level_count,
    }
}

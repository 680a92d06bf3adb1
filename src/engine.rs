//! Analysis engines.
//!
//! An engine turns the full text of a document into nesting [`LevelSpan`]s.
//! Engines are looked up by name in an [`EngineRegistry`] owned by the
//! composition root.

pub mod nesting;
pub mod registry;

pub use nesting::NestingEngine;
pub use registry::EngineRegistry;

use crate::colorize::LevelSpan;
use serde_json::Value;

/// Opaque per-mode options handed verbatim to the engine.
pub type EngineOptions = Value;

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Spans in inclusive source coordinates.
    Levels(Vec<LevelSpan>),
    /// No levels could be computed (e.g. the source does not parse).
    NoResult,
}

impl Analysis {
    pub fn is_no_result(&self) -> bool {
        matches!(self, Analysis::NoResult)
    }
}

/// The contract every analysis engine satisfies.
///
/// Engines are shared across documents and may be called concurrently for
/// distinct documents; any internal state must be synchronized by the engine.
pub trait LevelEngine: Send + Sync {
    fn analyze(&self, source: &str, options: &EngineOptions) -> Analysis;
}

impl<F> LevelEngine for F
where
    F: Fn(&str, &EngineOptions) -> Analysis + Send + Sync,
{
    fn analyze(&self, source: &str, options: &EngineOptions) -> Analysis {
        self(source, options)
    }
}

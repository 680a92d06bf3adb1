pub mod colorize;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod mode;
pub mod session;
pub mod settings_manager;
pub mod view;

pub use colorize::{Colorized, HighlightRange, LevelGroup, LevelSpan, colorize, group_name};
pub use commands::{Command, DocumentEvent};
pub use config::{LevelsConfig, LevelsSettings, PluginVars};
pub use engine::{Analysis, EngineOptions, EngineRegistry, LevelEngine, NestingEngine};
pub use error::{LevelsError, LevelsResult};
pub use lifecycle::{EnableOutcome, LevelsController, UpdateOutcome};
pub use session::{DocumentId, DocumentSession, SessionStore};
pub use view::{DocumentView, HighlightOptions, MemoryView};

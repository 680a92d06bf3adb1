//! Per-document levels lifecycle.
//!
//! A document is either Inactive (no session) or Active (session present).
//!
//! - **Enable** resolves a mode, swaps in the session style profile, records a
//!   session and runs an update. Enabling an Active document only updates.
//! - **Update** runs the engine on the current text and applies the resulting
//!   highlight groups. When the engine has no result the frame is skipped and
//!   prior highlights stay.
//! - **Disable** erases groups `level-1 .. level{count-1}`, restores the prior
//!   style profile and destroys the session.
//!
//! Events for one document are expected serially; distinct documents may be
//! handled from different threads.

use crate::colorize::{colorize, group_name};
use crate::commands::{Command, DocumentEvent};
use crate::config::{LevelsSettings, PluginVars};
use crate::engine::{Analysis, EngineRegistry};
use crate::error::{LevelsError, LevelsResult};
use crate::mode;
use crate::session::{DocumentId, DocumentSession, SessionStore};
use crate::settings_manager::SettingsManager;
use crate::view::{DocumentView, HighlightOptions};
use std::sync::Arc;

/// Lowest group index cleared on disable.
///
/// No engine produces level -1; the group is erased for compatibility with
/// hosts that may hold one.
const SENTINEL_LEVEL: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Highlights were applied and the level count recorded.
    Applied { level_count: usize },
    /// The engine had no result; nothing changed.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableOutcome {
    /// A new session was created.
    Enabled(UpdateOutcome),
    /// The document was already Active and was refreshed.
    Refreshed(UpdateOutcome),
    /// No engine handles the document's syntax; nothing happened.
    Unsupported,
}

impl EnableOutcome {
    pub fn update(&self) -> Option<UpdateOutcome> {
        match self {
            EnableOutcome::Enabled(outcome) | EnableOutcome::Refreshed(outcome) => Some(*outcome),
            EnableOutcome::Unsupported => None,
        }
    }
}

pub struct LevelsController {
    sessions: SessionStore,
    engines: EngineRegistry,
    settings: SettingsManager,
}

impl LevelsController {
    pub fn new(engines: EngineRegistry, settings: LevelsSettings, vars: PluginVars) -> Self {
        Self {
            sessions: SessionStore::new(),
            engines,
            settings: SettingsManager::new(settings, vars),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    pub fn is_active(&self, id: DocumentId) -> bool {
        self.sessions.has(id)
    }

    /// Level count recorded by the last applied update, if Active.
    pub fn level_count(&self, id: DocumentId) -> Option<usize> {
        self.sessions.get(id).ok().map(|session| session.level_count())
    }

    /// Turn levels on, or refresh them when already Active.
    pub fn enable(&self, view: &mut dyn DocumentView) -> LevelsResult<EnableOutcome> {
        let id = view.id();
        if self.sessions.has(id) {
            log::debug!(target: "levels::lifecycle", "Refreshing {}", id);
            return self.refresh(view).map(EnableOutcome::Refreshed);
        }

        let settings = self.settings.load_settings();
        let syntax = view.syntax();
        let Some(mode) = syntax
            .as_deref()
            .and_then(|syntax| mode::resolve(syntax, &settings))
        else {
            log::debug!(
                target: "levels::lifecycle",
                "No engine for {} (syntax {:?})",
                id,
                syntax
            );
            return Ok(EnableOutcome::Unsupported);
        };

        let engine = self
            .engines
            .get(&mode.engine)
            .ok_or_else(|| LevelsError::engine_not_found(&mode.engine))?;

        let prior_style_profile = view.style_profile();
        let session_profile = self
            .settings
            .session_style_profile(prior_style_profile.as_deref());
        view.set_style_profile(session_profile);

        log::debug!(
            target: "levels::lifecycle",
            "Enabling {} with engine {}",
            id,
            mode.engine
        );
        self.sessions.put(
            id,
            DocumentSession::new(mode.engine, engine, mode.options, prior_style_profile),
        );

        self.refresh(view).map(EnableOutcome::Enabled)
    }

    /// Run the session's engine on the current text and apply the result.
    ///
    /// Fails with [`LevelsError::SessionNotFound`] when the document is
    /// Inactive.
    pub fn refresh(&self, view: &mut dyn DocumentView) -> LevelsResult<UpdateOutcome> {
        let id = view.id();
        // Clone out of the store so no shard lock is held while the engine runs
        let (engine, options) = {
            let session = self.sessions.get(id)?;
            log::trace!(
                target: "levels::lifecycle",
                "Running engine {} on {}",
                session.engine_name(),
                id
            );
            (Arc::clone(session.engine()), session.options().clone())
        };

        let spans = match engine.analyze(&view.text(), &options) {
            Analysis::Levels(spans) => spans,
            Analysis::NoResult => {
                log::debug!(target: "levels::lifecycle", "No levels for {}; skipping", id);
                return Ok(UpdateOutcome::Skipped);
            }
        };

        let colorized = colorize(&spans);
        let options = HighlightOptions::for_levels(view.supports_no_outline());
        for group in &colorized.groups {
            view.add_highlights(&group.name, &group.ranges, options);
        }
        self.sessions.set_level_count(id, colorized.level_count)?;

        log::debug!(
            target: "levels::lifecycle",
            "Applied {} level groups to {}",
            colorized.groups.len(),
            id
        );
        Ok(UpdateOutcome::Applied {
            level_count: colorized.level_count,
        })
    }

    /// Whether [`disable`](Self::disable) would act on this document.
    pub fn can_disable(&self, id: DocumentId) -> bool {
        self.sessions.has(id)
    }

    /// Turn levels off. Returns `false` (and changes nothing) when the
    /// document is Inactive.
    pub fn disable(&self, view: &mut dyn DocumentView) -> bool {
        let id = view.id();
        let Some(session) = self.sessions.remove(id) else {
            return false;
        };

        for level in SENTINEL_LEVEL..session.level_count() as i64 {
            view.erase_highlights(&group_name(level));
        }
        view.set_style_profile(session.prior_style_profile().map(String::from));

        log::debug!(target: "levels::lifecycle", "Disabled {}", id);
        true
    }

    /// React to an edit; only updates when `live` is configured.
    pub fn on_modified(&self, view: &mut dyn DocumentView) -> LevelsResult<Option<UpdateOutcome>> {
        if !self.sessions.has(view.id()) || !self.settings.is_live() {
            return Ok(None);
        }
        self.refresh(view).map(Some)
    }

    /// React to a save; always updates an Active document.
    pub fn on_post_save(&self, view: &mut dyn DocumentView) -> LevelsResult<Option<UpdateOutcome>> {
        if !self.sessions.has(view.id()) {
            return Ok(None);
        }
        self.refresh(view).map(Some)
    }

    pub fn handle_event(
        &self,
        event: DocumentEvent,
        view: &mut dyn DocumentView,
    ) -> LevelsResult<Option<UpdateOutcome>> {
        match event {
            DocumentEvent::Modified => self.on_modified(view),
            DocumentEvent::Saved => self.on_post_save(view),
        }
    }

    /// Enablement predicate the host consults before offering a command.
    pub fn is_command_enabled(&self, command: Command, id: DocumentId) -> bool {
        match command {
            Command::Update => true,
            Command::Off => self.can_disable(id),
        }
    }

    /// Run a host command. Returns whether the command acted.
    pub fn run_command(&self, command: Command, view: &mut dyn DocumentView) -> LevelsResult<bool> {
        match command {
            Command::Update => self
                .enable(view)
                .map(|outcome| outcome != EnableOutcome::Unsupported),
            Command::Off => Ok(self.disable(view)),
        }
    }
}

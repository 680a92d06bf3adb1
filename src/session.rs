use crate::engine::{EngineOptions, LevelEngine};
use crate::error::{LevelsError, LevelsResult};
use dashmap::DashMap;
use dashmap::mapref::one::Ref;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Stable identity of a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "document:{}", self.0)
    }
}

/// Record of an active levels visualization for one document.
#[derive(Clone)]
pub struct DocumentSession {
    engine: Arc<dyn LevelEngine>,
    engine_name: String,
    options: EngineOptions,
    prior_style_profile: Option<String>,
    level_count: usize,
}

impl fmt::Debug for DocumentSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentSession")
            .field("engine", &self.engine_name)
            .field("options", &self.options)
            .field("prior_style_profile", &self.prior_style_profile)
            .field("level_count", &self.level_count)
            .finish()
    }
}

impl DocumentSession {
    /// New session; the level count stays 0 until the first applied update.
    pub fn new(
        engine_name: impl Into<String>,
        engine: Arc<dyn LevelEngine>,
        options: EngineOptions,
        prior_style_profile: Option<String>,
    ) -> Self {
        Self {
            engine,
            engine_name: engine_name.into(),
            options,
            prior_style_profile,
            level_count: 0,
        }
    }

    pub fn engine(&self) -> &Arc<dyn LevelEngine> {
        &self.engine
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Style profile the document had before the session began.
    pub fn prior_style_profile(&self) -> Option<&str> {
        self.prior_style_profile.as_deref()
    }

    pub fn level_count(&self) -> usize {
        self.level_count
    }
}

/// Read guard on one session; holds the store shard lock while alive.
pub struct SessionHandle<'a> {
    inner: Ref<'a, DocumentId, DocumentSession>,
}

impl<'a> Deref for SessionHandle<'a> {
    type Target = DocumentSession;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Process-scoped mapping from document identity to its session.
///
/// The store is the single source of truth for whether a document is under
/// management. Records for distinct documents can be accessed concurrently.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<DocumentId, DocumentSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, id: DocumentId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Look up a session. A missing record means an operation ran out of
    /// sequence, so it is reported as [`LevelsError::SessionNotFound`].
    pub fn get(&self, id: DocumentId) -> LevelsResult<SessionHandle<'_>> {
        self.sessions
            .get(&id)
            .map(|inner| SessionHandle { inner })
            .ok_or_else(|| LevelsError::session_not_found(id))
    }

    /// Create or overwrite the session of `id`.
    pub fn put(&self, id: DocumentId, session: DocumentSession) {
        self.sessions.insert(id, session);
    }

    /// Destroy the session of `id`, returning it if there was one.
    pub fn remove(&self, id: DocumentId) -> Option<DocumentSession> {
        self.sessions.remove(&id).map(|(_, session)| session)
    }

    /// Record the level count produced by the latest applied update.
    pub fn set_level_count(&self, id: DocumentId, level_count: usize) -> LevelsResult<()> {
        let mut session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| LevelsError::session_not_found(id))?;
        session.level_count = level_count;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

use super::{LevelEngine, NestingEngine};
use crate::error::LockResultExt;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Name of the built-in JavaScript engine.
pub const JS_ENGINE: &str = "js";

/// Registry mapping engine names to shared engine instances
#[derive(Clone)]
pub struct EngineRegistry {
    engines: Arc<RwLock<HashMap<String, Arc<dyn LevelEngine>>>>,
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("engines", &self.engine_names())
            .finish()
    }
}

impl EngineRegistry {
    pub fn new() -> Self {
        Self {
            engines: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registry with every engine shipped in this crate.
    pub fn with_builtin_engines() -> Self {
        let registry = Self::new();
        registry.register(JS_ENGINE, Arc::new(NestingEngine::new()));
        registry
    }

    /// Register an engine under `name`, replacing any previous one.
    pub fn register(&self, name: impl Into<String>, engine: Arc<dyn LevelEngine>) {
        let name = name.into();
        log::debug!(target: "levels::engine", "Registering engine {}", name);
        // recover_poison never returns Err
        if let Ok(mut engines) = self.engines.write().recover_poison("registry::register") {
            engines.insert(name, engine);
        }
    }

    /// Get an engine by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn LevelEngine>> {
        self.engines
            .read()
            .recover_poison("registry::get")
            .ok()
            .and_then(|engines| engines.get(name).cloned())
    }

    /// Check if an engine is registered
    pub fn contains(&self, name: &str) -> bool {
        self.engines
            .read()
            .recover_poison("registry::contains")
            .map(|engines| engines.contains_key(name))
            .unwrap_or(false)
    }

    /// Get all registered engine names, sorted
    pub fn engine_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .engines
            .read()
            .recover_poison("registry::engine_names")
            .map(|engines| engines.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }
}

//! Error handling types for levels
//!
//! This module provides the error types shared by the session store, the
//! engine registry and the settings loaders.

use std::sync::PoisonError;
use thiserror::Error;

/// Comprehensive error type for levels operations
#[derive(Debug, Error)]
pub enum LevelsError {
    /// No session is recorded for the document
    #[error("No levels session for document: {document}")]
    SessionNotFound { document: String },

    /// The resolved engine name is not registered
    #[error("Engine not registered: {engine}")]
    EngineNotFound { engine: String },

    /// An explicitly requested settings file is missing or malformed
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for levels operations
pub type LevelsResult<T> = Result<T, LevelsError>;

/// Helper trait to convert PoisonError to LevelsError
pub trait LockResultExt<T> {
    /// Convert a PoisonError to LevelsError with recovery and logging.
    ///
    /// The context parameter identifies which operation triggered lock recovery.
    fn recover_poison(self, context: &str) -> Result<T, LevelsError>;
}

impl<T> LockResultExt<T> for Result<T, PoisonError<T>> {
    fn recover_poison(self, context: &str) -> Result<T, LevelsError> {
        match self {
            Ok(guard) => Ok(guard),
            Err(poisoned) => {
                log::warn!(
                    target: "levels::lock_recovery",
                    "Recovered from poisoned lock in {}",
                    context
                );
                Ok(poisoned.into_inner())
            }
        }
    }
}

/// Helper functions for common error patterns
impl LevelsError {
    /// Create a session not found error
    pub fn session_not_found(document: impl ToString) -> Self {
        LevelsError::SessionNotFound {
            document: document.to_string(),
        }
    }

    /// Create an engine not found error
    pub fn engine_not_found(engine: impl Into<String>) -> Self {
        LevelsError::EngineNotFound {
            engine: engine.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        LevelsError::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        LevelsError::Internal(message.into())
    }
}

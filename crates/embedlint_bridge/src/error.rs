//! Bridge error types.

use thiserror::Error;

/// Errors that can occur while talking to the external engine.
#[derive(Debug, Clone, Error)]
pub enum BridgeError {
    /// The engine factory failed; every subsequent request gets this error,
    /// since the engine is constructed at most once per worker lifetime.
    #[error("Engine initialization failed: {0}")]
    Init(String),

    /// The engine raised while linting one text.
    #[error("Engine error: {0}")]
    Engine(String),

    /// The worker's async runtime could not be built.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// The worker thread is gone (shut down or panicked).
    #[error("Linter worker is no longer running")]
    WorkerGone,
}

impl BridgeError {
    /// Creates an initialization error.
    pub fn init(message: impl Into<String>) -> Self {
        Self::Init(message.into())
    }

    /// Creates an engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}

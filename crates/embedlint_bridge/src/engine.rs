//! The external prose-linting engine boundary.

use std::future::Future;
use std::pin::Pin;

use crate::{BridgeError, LintReport};

/// Future returned by [`ProseEngine::lint`].
pub type EngineFuture<'a> = Pin<Box<dyn Future<Output = Result<LintReport, BridgeError>> + 'a>>;

/// An asynchronous prose-linting engine.
///
/// Implementations wrap the external text linter. The engine is owned by a
/// single worker thread and never shared, so `lint` takes `&mut self`; the
/// bridge serializes requests, one in flight at a time.
pub trait ProseEngine: Send {
    /// Lints `text` as if it were the contents of `filename` and returns the
    /// engine's messages. Positions in the report are relative to `text`.
    fn lint<'a>(&'a mut self, text: &'a str, filename: &'a str) -> EngineFuture<'a>;
}

/// Factory that builds the engine inside the worker thread.
///
/// Runs at most once, on the first request, so expensive configuration
/// loading is both deferred and amortized across the process lifetime.
pub type EngineFactory = Box<dyn FnOnce() -> Result<Box<dyn ProseEngine>, BridgeError> + Send>;

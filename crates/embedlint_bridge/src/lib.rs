//! # embedlint_bridge
//!
//! Synchronous bridge to an asynchronous prose-linting engine.
//!
//! The external engine (a textlint-style service) exposes an async
//! `lint(text, filename)` call and is expensive to construct because it loads
//! its rule configuration up front. The host engine's traversal callbacks are
//! strictly synchronous, so this crate provides [`SyncBridge`]: a background
//! worker thread that owns a single lazily-constructed engine instance on a
//! current-thread `tokio` runtime, fed by a blocking request/response channel.
//!
//! Calling [`SyncBridge::lint_blocking`] parks the calling thread until the
//! worker replies. This is a deliberate blocking point: do not call it from a
//! context that must remain responsive (an async executor, a UI thread).
//!
//! ## Example
//!
//! ```rust
//! use embedlint_bridge::{LintReport, ProseEngine, SyncBridge};
//!
//! struct Quiet;
//!
//! impl ProseEngine for Quiet {
//!     fn lint<'a>(
//!         &'a mut self,
//!         _text: &'a str,
//!         _filename: &'a str,
//!     ) -> embedlint_bridge::EngineFuture<'a> {
//!         Box::pin(async { Ok(LintReport::default()) })
//!     }
//! }
//!
//! let bridge = SyncBridge::spawn(|| Ok(Box::new(Quiet) as Box<dyn ProseEngine>));
//! let report = bridge.lint_blocking("some prose", "test.txt").unwrap();
//! assert!(report.messages.is_empty());
//! ```

mod bridge;
mod engine;
mod error;
mod message;

pub use bridge::SyncBridge;
pub use engine::{EngineFactory, EngineFuture, ProseEngine};
pub use error::BridgeError;
pub use message::{LintMessage, LintReport, MessageFix, MessageLocation, MessagePosition, Severity};

//! Rule error types.

use thiserror::Error;

/// Errors that can occur while running the rule over one file.
#[derive(Debug, Error)]
pub enum RuleError {
    /// The external engine failed; the whole file's lint pass is abandoned,
    /// with no partial diagnostics.
    #[error("Bridge error: {0}")]
    Bridge(#[from] embedlint_bridge::BridgeError),

    /// The rule options could not be parsed.
    #[error("Options error: {0}")]
    Options(String),
}

impl RuleError {
    /// Creates an options error.
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options(message.into())
    }
}

//! Wire types for the external engine's lint responses.
//!
//! These mirror the textlint message shape:
//! `{message, ruleId, severity, loc, fix?}` plus an optional fully-fixed
//! `output` on the response. Positions are expressed relative to the text
//! that was submitted, not to any source file.

use serde::{Deserialize, Serialize};

/// Severity of an engine message, in the engine's numeric wire form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    /// 0 — the finding is disabled/informational and must never be reported.
    Off,
    /// 1 — warning.
    Warning,
    /// 2 — error.
    #[default]
    Error,
}

impl Severity {
    /// Returns true for severity 0, which is suppressed before mapping.
    #[inline]
    pub const fn is_suppressed(&self) -> bool {
        matches!(self, Severity::Off)
    }
}

impl TryFrom<u8> for Severity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, String> {
        match value {
            0 => Ok(Severity::Off),
            1 => Ok(Severity::Warning),
            2 => Ok(Severity::Error),
            other => Err(format!("invalid severity: {other}")),
        }
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Off => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }
}

/// A position inside the submitted text, in the engine's own convention
/// (1-indexed lines; columns pass through the mapper untouched).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePosition {
    pub line: u32,
    pub column: u32,
}

impl MessagePosition {
    /// Creates a new message position.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start/end location of a message inside the submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLocation {
    pub start: MessagePosition,
    pub end: MessagePosition,
}

impl MessageLocation {
    /// Creates a new message location.
    #[inline]
    pub const fn new(start: MessagePosition, end: MessagePosition) -> Self {
        Self { start, end }
    }
}

/// An autofix suggested by the engine.
///
/// `range` is a byte range relative to the start of the submitted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFix {
    pub range: [u32; 2],
    pub text: String,
}

impl MessageFix {
    /// Creates a new fix replacing `range` with `text`.
    pub fn new(range: [u32; 2], text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// One issue reported by the engine for a submitted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintMessage {
    /// Human-readable description.
    pub message: String,

    /// Engine rule that produced this message, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,

    /// Severity; 0 means the message is suppressed.
    #[serde(default)]
    pub severity: Severity,

    /// Location inside the submitted text.
    pub loc: MessageLocation,

    /// Optional autofix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<MessageFix>,
}

impl LintMessage {
    /// Creates a new message with the default (error) severity.
    pub fn new(message: impl Into<String>, loc: MessageLocation) -> Self {
        Self {
            message: message.into(),
            rule_id: None,
            severity: Severity::Error,
            loc,
            fix: None,
        }
    }

    /// Sets the rule id.
    pub fn with_rule_id(mut self, rule_id: impl Into<String>) -> Self {
        self.rule_id = Some(rule_id.into());
        self
    }

    /// Sets the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets an autofix.
    pub fn with_fix(mut self, fix: MessageFix) -> Self {
        self.fix = Some(fix);
        self
    }
}

/// The engine's full response for one submitted text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LintReport {
    /// Messages for the submitted text, in engine order.
    #[serde(default)]
    pub messages: Vec<LintMessage>,

    /// The fully fixed text, when the engine was asked to fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl LintReport {
    /// Creates a report carrying the given messages.
    pub fn new(messages: Vec<LintMessage>) -> Self {
        Self {
            messages,
            output: None,
        }
    }
}

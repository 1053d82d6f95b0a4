//! Diagnostic mapping.
//!
//! The engine answers in coordinates local to the normalized text it was
//! given. This module translates those answers into absolute source-file
//! coordinates:
//!
//! - lines: the fragment always starts on the line recorded in its span, and
//!   the engine's lines are 1-based, so line deltas pass through unchanged
//! - columns and fix byte ranges: offset by the fragment's source position
//!   plus its position shift
//!
//! Messages with severity 0 are dropped here and never reach the host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::NormalizedFragment;
use embedlint_ast::{Location, Position, Span};
use embedlint_bridge::{LintMessage, MessagePosition, Severity};

/// An autofix expressed in absolute source-file byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fix {
    /// The byte span of the original file to replace.
    pub span: Span,

    /// The replacement text.
    pub text: String,
}

/// An engine message translated into absolute source coordinates, ready for
/// the host engine's report sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedDiagnostic {
    /// Human-readable description, passed through verbatim.
    pub message: String,

    /// Engine rule that produced the message, when known.
    pub rule_id: Option<String>,

    /// Severity (never [`Severity::Off`]; those are dropped before mapping).
    pub severity: Severity,

    /// Absolute location in the original file.
    pub loc: Location,

    /// Optional autofix in absolute byte offsets.
    pub fix: Option<Fix>,
}

/// Maps every non-suppressed engine message for one fragment into absolute
/// source coordinates.
pub fn map_diagnostics(
    fragment: &NormalizedFragment<'_>,
    messages: &[LintMessage],
) -> Vec<MappedDiagnostic> {
    messages
        .iter()
        .filter(|message| {
            if message.severity.is_suppressed() {
                debug!("Dropping suppressed message: {}", message.message);
                false
            } else {
                true
            }
        })
        .map(|message| map_message(fragment, message))
        .collect()
}

fn map_message(fragment: &NormalizedFragment<'_>, message: &LintMessage) -> MappedDiagnostic {
    let loc = Location::new(
        map_position(fragment, message.loc.start),
        map_position(fragment, message.loc.end),
    );

    let fix = message.fix.as_ref().map(|fix| Fix {
        span: Span::new(
            fragment.span.start + fix.range[0] + fragment.position_shift,
            fragment.span.start + fix.range[1] + fragment.position_shift,
        ),
        text: fix.text.clone(),
    });

    MappedDiagnostic {
        message: message.message.clone(),
        rule_id: message.rule_id.clone(),
        severity: message.severity,
        loc,
        fix,
    }
}

/// Translates one engine position (1-based line within the submitted text)
/// into an absolute source position.
fn map_position(fragment: &NormalizedFragment<'_>, position: MessagePosition) -> Position {
    Position::new(
        (fragment.start.line + position.line).saturating_sub(1),
        fragment.start.column + position.column + fragment.position_shift,
    )
}

//! Text normalization.
//!
//! Produces the exact substring the external engine receives, together with
//! the position shift needed to map the engine's answers back. The shift is a
//! constant column/byte offset determined entirely by the fragment kind and
//! the decoration actually stripped, never by diagnostic content:
//!
//! - string literals lose their quote pair, shift 1 (the leading quote)
//! - template segments carry cooked text whose source position sits one
//!   delimiter character (`` ` `` or `}`) past the segment span start, shift 1
//! - comment records carry their value without the two-character `//` / `/*`
//!   marker, shift 2
//!
//! A string literal that is unexpectedly not quote-delimited degrades to
//! shift 0 instead of failing the file.

use tracing::debug;

use crate::{FragmentKind, SourceFragment};
use embedlint_ast::{Position, Span};

/// Derived, read-only view of a [`SourceFragment`] ready for submission.
///
/// Column `c` of `text` corresponds to source column
/// `start.column + c + position_shift`; byte offset `o` of `text` corresponds
/// to source byte `span.start + o + position_shift`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedFragment<'a> {
    /// Kind of the originating fragment.
    pub kind: FragmentKind,

    /// The exact text to submit to the external engine.
    pub text: &'a str,

    /// Byte span of the originating fragment in the original file.
    pub span: Span,

    /// Start position of the originating fragment in the original file.
    pub start: Position,

    /// Column/byte offset between the fragment's source span and the first
    /// character of `text`.
    pub position_shift: u32,
}

/// Normalizes a fragment: strips decoration and records the position shift.
pub fn normalize<'a>(fragment: &SourceFragment<'a>) -> NormalizedFragment<'a> {
    let (text, position_shift) = match fragment.kind {
        FragmentKind::StringLiteral => match strip_quote_pair(fragment.raw) {
            Some(body) => (body, 1),
            None => {
                debug!(
                    "String fragment at {:?} is not quote-delimited; using zero shift",
                    fragment.span
                );
                (fragment.raw, 0)
            }
        },
        FragmentKind::TemplateSegment => (fragment.raw, 1),
        FragmentKind::LineComment | FragmentKind::BlockComment => (fragment.raw, 2),
    };

    NormalizedFragment {
        kind: fragment.kind,
        text,
        span: fragment.span,
        start: fragment.start,
        position_shift,
    }
}

/// Strips a surrounding pair of identical ASCII quotes (`'` or `"`).
///
/// Strips exactly one pair: re-running this on the stripped body never
/// matches again unless the body itself was quoted in the source.
fn strip_quote_pair(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            return raw.get(1..raw.len() - 1);
        }
    }
    None
}

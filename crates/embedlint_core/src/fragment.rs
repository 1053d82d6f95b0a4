//! Fragment classification.
//!
//! A fragment is a contiguous span of source text eligible for prose linting:
//! a string literal, one plain segment of a template literal, or a comment.
//! Classification is pure: it never mutates the tree and never fails — a node
//! that carries no lintable text simply yields `None`.

use embedlint_ast::{Comment, CommentKind, LiteralValue, Node, NodeKind, Position, Span};

/// The kind of a lintable fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    /// A `//` comment.
    LineComment,
    /// A `/* */` comment.
    BlockComment,
    /// A quote-delimited string literal.
    StringLiteral,
    /// One plain segment of a template literal.
    TemplateSegment,
}

/// A unit of lintable text, captured during a single traversal pass.
///
/// `raw` is the text exactly as the producing record carries it: the full
/// quoted source text for string literals, the cooked segment text for
/// template elements, and the marker-less value for comments. The span and
/// start position always describe the producing node/record in the original
/// file and are immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceFragment<'a> {
    /// What kind of fragment this is.
    pub kind: FragmentKind,

    /// The fragment's text as carried by the AST node or comment record.
    pub raw: &'a str,

    /// Byte span of the producing node/record in the original file.
    pub span: Span,

    /// Start position of the producing node/record in the original file.
    pub start: Position,
}

/// Classifies a syntax tree node as a lintable fragment.
///
/// Returns `None` for every node kind that carries no prose: non-string
/// literals (numbers, booleans, null), identifiers, and all composite nodes.
pub fn classify<'a>(node: &Node<'a>) -> Option<SourceFragment<'a>> {
    match node.kind {
        NodeKind::Literal {
            raw,
            value: LiteralValue::Str(_),
        } => Some(SourceFragment {
            kind: FragmentKind::StringLiteral,
            raw,
            span: node.span,
            start: node.loc.start,
        }),
        NodeKind::TemplateElement { cooked } => Some(SourceFragment {
            kind: FragmentKind::TemplateSegment,
            raw: cooked,
            span: node.span,
            start: node.loc.start,
        }),
        _ => None,
    }
}

/// Classifies a comment record as a lintable fragment.
///
/// Comments are always lintable; the kind follows the record's own tag.
pub fn classify_comment<'a>(comment: &Comment<'a>) -> SourceFragment<'a> {
    let kind = match comment.kind {
        CommentKind::Line => FragmentKind::LineComment,
        CommentKind::Block => FragmentKind::BlockComment,
    };
    SourceFragment {
        kind,
        raw: comment.value,
        span: comment.span,
        start: comment.loc.start,
    }
}

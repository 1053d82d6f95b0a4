//! Node and comment definitions.
//!
//! The syntax tree is a closed tagged-union covering the node kinds the
//! fragment walker cares about. Every other construct the host engine can
//! produce (export declarations, function bodies, object expressions, ...)
//! is represented as [`NodeKind::Other`], which only exposes its child list
//! and is descended into generically.
//!
//! There is deliberately no parent back-reference: the walker only ever moves
//! downward, so cycles cannot occur.

use crate::{Location, Span};

/// A node in the host engine's syntax tree, as seen by embedlint.
///
/// Nodes are allocated in an [`crate::AstArena`]; the `'a` lifetime ties all
/// child references to that arena.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    /// What kind of node this is, with kind-specific payload.
    pub kind: NodeKind<'a>,

    /// Byte span in the source file.
    pub span: Span,

    /// Line/column location in the source file.
    pub loc: Location,
}

/// The closed set of node kinds relevant to prose linting.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    /// A literal value. Only string literals produce fragments; the raw text
    /// includes the surrounding quote characters.
    Literal {
        /// Exact source text of the literal, decoration included.
        raw: &'a str,
        /// The literal's evaluated value.
        value: LiteralValue<'a>,
    },

    /// A template literal: interleaved quasis (template elements) and
    /// interpolated expressions.
    TemplateLiteral {
        quasis: &'a [Node<'a>],
        expressions: &'a [Node<'a>],
    },

    /// One plain-text segment of a template literal (a "quasi"). The cooked
    /// text never includes the backtick or `${`/`}` delimiters.
    TemplateElement { cooked: &'a str },

    /// An identifier reference.
    Identifier { name: &'a str },

    /// A call expression.
    Call {
        callee: &'a Node<'a>,
        arguments: &'a [Node<'a>],
    },

    /// A module import declaration; `source` is the module-specifier string
    /// literal.
    ImportDeclaration { source: &'a Node<'a> },

    /// A variable declaration. Holds the initializer expression of each
    /// declarator; declarators without an initializer are omitted by the
    /// host adapter.
    VariableDeclaration { declarations: &'a [Node<'a>] },

    /// A binary expression.
    BinaryExpression {
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    },

    /// Any other composite node. Children are listed in source order and are
    /// descended into generically.
    Other { children: &'a [Node<'a>] },
}

/// The evaluated value of a [`NodeKind::Literal`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Str(&'a str),
    Number(f64),
    Bool(bool),
    Null,
}

impl<'a> NodeKind<'a> {
    /// Returns true for a literal whose value is a string.
    #[inline]
    pub const fn is_string_literal(&self) -> bool {
        matches!(
            self,
            NodeKind::Literal {
                value: LiteralValue::Str(_),
                ..
            }
        )
    }
}

impl<'a> Node<'a> {
    /// Creates a string literal node. `raw` is the exact source text,
    /// quotes included.
    #[inline]
    pub fn string_literal(raw: &'a str, span: Span, loc: Location) -> Self {
        let value = strip_ascii_quotes(raw).unwrap_or(raw);
        Self {
            kind: NodeKind::Literal {
                raw,
                value: LiteralValue::Str(value),
            },
            span,
            loc,
        }
    }

    /// Creates a non-string literal node (number, boolean, null).
    #[inline]
    pub const fn literal(raw: &'a str, value: LiteralValue<'a>, span: Span, loc: Location) -> Self {
        Self {
            kind: NodeKind::Literal { raw, value },
            span,
            loc,
        }
    }

    /// Creates a template element node from its cooked text.
    #[inline]
    pub const fn template_element(cooked: &'a str, span: Span, loc: Location) -> Self {
        Self {
            kind: NodeKind::TemplateElement { cooked },
            span,
            loc,
        }
    }

    /// Creates an identifier node.
    #[inline]
    pub const fn identifier(name: &'a str, span: Span, loc: Location) -> Self {
        Self {
            kind: NodeKind::Identifier { name },
            span,
            loc,
        }
    }

    /// Creates an opaque composite node with the given children.
    #[inline]
    pub const fn other(children: &'a [Node<'a>], span: Span, loc: Location) -> Self {
        Self {
            kind: NodeKind::Other { children },
            span,
            loc,
        }
    }

    /// Returns true if this node's callee position names `require`.
    ///
    /// Only meaningful for [`NodeKind::Call`]; false for everything else.
    pub fn is_require_call(&self) -> bool {
        match self.kind {
            NodeKind::Call { callee, .. } => {
                matches!(callee.kind, NodeKind::Identifier { name: "require" })
            }
            _ => false,
        }
    }
}

/// Strips a matched pair of ASCII quote characters, if present.
fn strip_ascii_quotes(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[bytes.len() - 1] == first {
            // Quote characters are single-byte ASCII, so the slice bounds
            // always fall on char boundaries.
            return raw.get(1..raw.len() - 1);
        }
    }
    None
}

/// Kind tag of a source comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// A `//` comment.
    Line,
    /// A `/* */` comment.
    Block,
}

/// A comment record from the host engine's comment list.
#[derive(Debug, Clone, Copy)]
pub struct Comment<'a> {
    /// Line or block.
    pub kind: CommentKind,

    /// Comment text without the `//` or `/*`/`*/` markers, exactly as the
    /// host engine records it.
    pub value: &'a str,

    /// Byte span of the whole comment, markers included.
    pub span: Span,

    /// Location of the whole comment, markers included.
    pub loc: Location,
}

impl<'a> Comment<'a> {
    /// Creates a new comment record.
    #[inline]
    pub const fn new(kind: CommentKind, value: &'a str, span: Span, loc: Location) -> Self {
        Self {
            kind,
            value,
            span,
            loc,
        }
    }
}

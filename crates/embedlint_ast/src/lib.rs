//! # embedlint_ast
//!
//! Syntax tree boundary types for embedlint.
//!
//! This crate defines the view of the host analysis engine's syntax tree that
//! embedlint consumes: a closed tagged-union of node kinds relevant to prose
//! linting, plus the comment list that the host keeps alongside the tree.
//! Anything the host produces that has no dedicated variant is represented as
//! [`NodeKind::Other`], an opaque composite that only exposes its children.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for arena allocation: all nodes for one file live in a
//!   single [`AstArena`] and are freed together
//! - Nodes hold `&'a` references into the arena, never owned children
//! - Positions are 1-indexed lines / 0-indexed columns, spans are byte offsets
//!
//! ## Example
//!
//! ```rust
//! use embedlint_ast::{AstArena, Location, Node, NodeKind, Position, Span};
//!
//! let arena = AstArena::new();
//!
//! let loc = Location::new(Position::new(1, 10), Position::new(1, 16));
//! let literal = arena.alloc(Node::string_literal("'... '", Span::new(10, 16), loc));
//! assert!(literal.kind.is_string_literal());
//! ```

mod arena;
mod node;
mod span;

pub use arena::AstArena;
pub use node::{Comment, CommentKind, LiteralValue, Node, NodeKind};
pub use span::{Location, Position, Span};

//! Tree traversal producing lintable fragments.
//!
//! [`FragmentIter`] is a lazy, finite, single-use iterator: the code pass
//! walks the tree pre-order, left-to-right by span, then the comment pass
//! yields the comment list in its own order. Relative order *between* the
//! two passes is not guaranteed; order within each pass is source order.
//!
//! Node kinds with no dedicated descent rule are descended into generically
//! through their child list; a node with no children is simply skipped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{SourceFragment, classify, classify_comment};
use embedlint_ast::{Comment, Node, NodeKind};

/// Which fragments a traversal visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintScope {
    /// Both code fragments and comments.
    #[default]
    All,
    /// Comments only.
    Comment,
    /// String literals and template segments only.
    Code,
}

impl LintScope {
    /// Returns true if code fragments are in scope.
    #[inline]
    pub const fn includes_code(&self) -> bool {
        matches!(self, LintScope::All | LintScope::Code)
    }

    /// Returns true if comment fragments are in scope.
    #[inline]
    pub const fn includes_comments(&self) -> bool {
        matches!(self, LintScope::All | LintScope::Comment)
    }
}

/// Traversal configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Which fragments to visit.
    pub scope: LintScope,

    /// Suppress fragments inside module-import constructs: `import`
    /// declarations and `require(...)` calls are skipped entirely.
    pub ignore_import_declaration: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            scope: LintScope::All,
            ignore_import_declaration: true,
        }
    }
}

/// Lazy pre-order iterator over a file's lintable fragments.
pub struct FragmentIter<'a> {
    stack: Vec<&'a Node<'a>>,
    comments: std::slice::Iter<'a, Comment<'a>>,
    ignore_imports: bool,
}

impl<'a> FragmentIter<'a> {
    /// Creates a traversal over `root` and `comments`.
    pub fn new(root: &'a Node<'a>, comments: &'a [Comment<'a>], options: WalkOptions) -> Self {
        let stack = if options.scope.includes_code() {
            vec![root]
        } else {
            Vec::new()
        };
        let comments: &'a [Comment<'a>] = if options.scope.includes_comments() {
            comments
        } else {
            &[]
        };

        Self {
            stack,
            comments: comments.iter(),
            ignore_imports: options.ignore_import_declaration,
        }
    }

    fn descend(&mut self, node: &'a Node<'a>) {
        match node.kind {
            // Leaves: nothing below them.
            NodeKind::Literal { .. }
            | NodeKind::TemplateElement { .. }
            | NodeKind::Identifier { .. } => {}

            // Quasis and interpolated expressions interleave; visit them in
            // source order.
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            } => {
                let mut parts: Vec<&'a Node<'a>> =
                    quasis.iter().chain(expressions.iter()).collect();
                parts.sort_by_key(|part| part.span.start);
                for part in parts.into_iter().rev() {
                    self.stack.push(part);
                }
            }

            // Arguments only; the callee is never searched for fragments.
            NodeKind::Call { arguments, .. } => {
                if self.ignore_imports && node.is_require_call() {
                    debug!("Skipping require() call at {:?}", node.span);
                    return;
                }
                self.push_children(arguments);
            }

            NodeKind::ImportDeclaration { source } => {
                if self.ignore_imports {
                    debug!("Skipping import declaration at {:?}", node.span);
                    return;
                }
                self.stack.push(source);
            }

            NodeKind::VariableDeclaration { declarations } => self.push_children(declarations),

            NodeKind::BinaryExpression { left, right } => {
                self.stack.push(right);
                self.stack.push(left);
            }

            NodeKind::Other { children } => self.push_children(children),
        }
    }

    fn push_children(&mut self, children: &'a [Node<'a>]) {
        for child in children.iter().rev() {
            self.stack.push(child);
        }
    }
}

impl<'a> Iterator for FragmentIter<'a> {
    type Item = SourceFragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // Code pass: fragments are always leaves, so a classified node never
        // needs descending.
        while let Some(node) = self.stack.pop() {
            if let Some(fragment) = classify(node) {
                return Some(fragment);
            }
            self.descend(node);
        }

        // Comment pass.
        self.comments.next().map(classify_comment)
    }
}

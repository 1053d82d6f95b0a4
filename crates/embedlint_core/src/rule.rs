//! Rule registration glue.
//!
//! [`TextlintRule`] is the piece the host analysis engine registers: it
//! exposes the rule metadata/schema and, given the host's per-file context,
//! drives the walk → normalize → bridge → map pipeline and feeds every mapped
//! diagnostic to the host's report sink.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::{
    FragmentIter, LintScope, MappedDiagnostic, RuleError, WalkOptions, map_diagnostics, normalize,
};
use embedlint_ast::{Comment, Node};
use embedlint_bridge::SyncBridge;

/// Options the host engine passes to the rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleOptions {
    /// Which fragments to lint.
    pub lint_type: LintScope,

    /// Skip fragments inside `import` declarations and `require(...)` calls.
    pub ignore_import_declaration: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        Self {
            lint_type: LintScope::All,
            ignore_import_declaration: true,
        }
    }
}

/// Rule metadata for the host engine's registration contract.
#[derive(Debug, Clone, Serialize)]
pub struct RuleMeta {
    /// Rule name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether the rule can produce autofixes.
    pub fixable: bool,
    /// JSON schema of the accepted options.
    pub schema: serde_json::Value,
}

/// Per-file inputs supplied by the host engine.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Root of the file's syntax tree.
    pub program: &'a Node<'a>,

    /// The file's comment list.
    pub comments: &'a [Comment<'a>],

    /// Name of the file being linted; forwarded to the engine so its own
    /// filename-sensitive configuration applies.
    pub filename: &'a str,
}

/// The host engine's diagnostic sink.
pub trait Report {
    /// Receives one mapped diagnostic.
    fn report(&mut self, diagnostic: MappedDiagnostic);
}

impl Report for Vec<MappedDiagnostic> {
    fn report(&mut self, diagnostic: MappedDiagnostic) {
        self.push(diagnostic);
    }
}

/// The prose-linting rule.
pub struct TextlintRule {
    options: RuleOptions,
}

impl TextlintRule {
    /// Creates the rule with explicit options.
    pub fn new(options: RuleOptions) -> Self {
        Self { options }
    }

    /// Creates the rule from the host engine's raw JSON options.
    ///
    /// `null` (no options configured) means defaults.
    pub fn from_options(value: serde_json::Value) -> Result<Self, RuleError> {
        let options = if value.is_null() {
            RuleOptions::default()
        } else {
            serde_json::from_value(value).map_err(|e| RuleError::options(e.to_string()))?
        };
        Ok(Self::new(options))
    }

    /// Returns the options this rule was configured with.
    pub fn options(&self) -> RuleOptions {
        self.options
    }

    /// Rule metadata and options schema for registration.
    pub fn meta() -> RuleMeta {
        RuleMeta {
            name: "textlint",
            description: "Lint comments and string text with an external prose linter",
            fixable: true,
            schema: json!([
                {
                    "type": "object",
                    "properties": {
                        "lintType": { "enum": ["all", "comment", "code"] },
                        "ignoreImportDeclaration": { "type": "boolean" }
                    },
                    "additionalProperties": false
                }
            ]),
        }
    }

    /// Lints one file: walks the tree and comments, submits each normalized
    /// fragment over the bridge, and reports every mapped diagnostic.
    ///
    /// Fragments are processed strictly one at a time: a fragment's
    /// diagnostics are reported before the next fragment is submitted. A
    /// bridge failure aborts the file immediately; the caller should surface
    /// it as a single error for the file and discard anything reported so
    /// far.
    pub fn run(
        &self,
        context: &RuleContext<'_>,
        bridge: &SyncBridge,
        sink: &mut dyn Report,
    ) -> Result<(), RuleError> {
        let walk = WalkOptions {
            scope: self.options.lint_type,
            ignore_import_declaration: self.options.ignore_import_declaration,
        };

        for fragment in FragmentIter::new(context.program, context.comments, walk) {
            let normalized = normalize(&fragment);
            debug!(
                "Submitting {:?} fragment at {:?} ({} bytes)",
                normalized.kind,
                normalized.span,
                normalized.text.len()
            );

            let report = bridge.lint_blocking(normalized.text, context.filename)?;
            for diagnostic in map_diagnostics(&normalized, &report.messages) {
                sink.report(diagnostic);
            }
        }

        Ok(())
    }
}

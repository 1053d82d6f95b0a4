//! # embedlint_core
//!
//! Fragment extraction, normalization and diagnostic mapping for embedlint.
//!
//! This crate implements the pipeline that lets an external prose-linting
//! engine check human-readable text embedded in source code:
//!
//! 1. [`FragmentIter`] walks the syntax tree (and the comment list) and
//!    yields every lintable fragment in source order
//! 2. [`normalize`] strips syntactic decoration (quotes, delimiters) and
//!    records the position shift that stripping introduced
//! 3. the normalized text goes to the engine over a
//!    [`SyncBridge`](embedlint_bridge::SyncBridge)
//! 4. [`map_diagnostics`] translates the engine's fragment-local messages
//!    back into absolute source-file coordinates, dropping suppressed ones
//!
//! [`TextlintRule`] ties the pipeline together behind the host engine's
//! rule-registration contract.
//!
//! ## Example
//!
//! ```rust,ignore
//! use embedlint_core::{RuleContext, TextlintRule};
//!
//! let rule = TextlintRule::from_options(options_json)?;
//! let mut reports = Vec::new();
//! rule.run(&context, bridge, &mut reports)?;
//! ```

mod error;
mod fixer;
mod fragment;
mod mapper;
mod normalizer;
mod rule;
mod walker;

pub use error::RuleError;
pub use fixer::{FixerResult, apply_fixes_to_content};
pub use fragment::{FragmentKind, SourceFragment, classify, classify_comment};
pub use mapper::{Fix, MappedDiagnostic, map_diagnostics};
pub use normalizer::{NormalizedFragment, normalize};
pub use rule::{Report, RuleContext, RuleMeta, RuleOptions, TextlintRule};
pub use walker::{FragmentIter, LintScope, WalkOptions};

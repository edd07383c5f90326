//! Sibling-aware structural style-rule engine.
//!
//! The engine consumes a host-built syntax tree ([`SyntaxTree`]), the raw
//! source text with its comment list ([`SourceFile`]), and resolved rule
//! configuration ([`RuleConfig`]). It produces [`Diagnostic`] records, each
//! optionally carrying byte-anchored [`Edit`] instructions that
//! [`apply_fixes`] can replay onto the text in a separate, explicit phase.
//!
//! The crate never parses source itself; the parser and the rendering host
//! are external collaborators.

#![deny(clippy::all, missing_docs)]

mod adjacency;
mod config;
mod diagnostics;
mod fixes;
mod rules;
mod siblings;
mod source;
mod tree;

pub use config::{MethodReplacement, RuleConfig};
pub use diagnostics::{Diagnostic, Edit, Severity};
pub use fixes::FixError;
pub use rules::RULE_IDS;
pub use source::{Comment, SourceFile};
pub use tree::{
	ChildRole, ConditionalForm, Node, NodeId, NodeKind, Span, SyntaxTree, TreeBuilder,
};

/// Runs every enabled rule over one file's tree and returns its diagnostics
/// ordered by anchor line, then rule id.
///
/// The pass is a single read-only traversal: nothing in `tree` or `source` is
/// mutated, and any fix edits are only collected, never applied here.
pub fn check(tree: &SyntaxTree, source: &SourceFile, config: &RuleConfig) -> Vec<Diagnostic> {
	rules::collect(&rules::CheckContext { tree, source }, config)
}

/// Applies the fixes carried by `diagnostics` to `text` and returns how many
/// edits were applied.
///
/// Edits are sorted by position; an edit overlapping an earlier one is
/// dropped (its diagnostic stays reported without a fix). An edit whose range
/// falls outside `text` fails with [`FixError::InvalidRange`].
pub fn apply_fixes(text: &mut String, diagnostics: &[Diagnostic]) -> Result<usize, FixError> {
	let edits = diagnostics.iter().flat_map(|diagnostic| diagnostic.fix.iter().cloned()).collect();

	fixes::apply_edits(text, edits)
}

//! Rule passes sharing the tree, adjacency, and sibling infrastructure.

mod blank_lines;
mod chained_call;
mod comment_gaps;
mod conditional_assignment;
mod restricted_calls;
mod stale_comments;

use crate::{config::RuleConfig, diagnostics::Diagnostic, source::SourceFile, tree::SyntaxTree};

/// Ids of every implemented rule.
pub const RULE_IDS: [&str; 6] = [
	blank_lines::RULE,
	comment_gaps::RULE,
	chained_call::RULE,
	conditional_assignment::RULE,
	restricted_calls::RULE,
	stale_comments::RULE,
];

/// Immutable per-file inputs shared by every rule during one pass.
pub(crate) struct CheckContext<'a> {
	/// The host-built syntax tree.
	pub(crate) tree: &'a SyntaxTree,
	/// Raw text, line table, and comments.
	pub(crate) source: &'a SourceFile,
}

/// Runs every enabled rule and returns diagnostics in source order.
pub(crate) fn collect(ctx: &CheckContext<'_>, config: &RuleConfig) -> Vec<Diagnostic> {
	let mut diagnostics = Vec::new();

	if config.blank_lines {
		blank_lines::check(ctx, &mut diagnostics);
	}
	if config.comment_gaps {
		comment_gaps::check(ctx, &mut diagnostics);
	}
	if config.chained_call {
		chained_call::check(ctx, &mut diagnostics);
	}
	if config.conditional_assignment {
		conditional_assignment::check(ctx, &mut diagnostics);
	}
	if config.restricted_calls {
		restricted_calls::check(ctx, config, &mut diagnostics);
	}
	if config.stale_comments {
		stale_comments::check(ctx, config, &mut diagnostics);
	}

	diagnostics.sort_by(|a, b| {
		a.line.cmp(&b.line).then(a.span.start.cmp(&b.span.start)).then(a.rule.cmp(b.rule))
	});

	diagnostics
}

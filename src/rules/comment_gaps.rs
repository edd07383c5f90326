//! Blank line required before full-line comments.
//!
//! A comment opening a body (first thing after `def`, `else`, `when`,
//! `rescue`, a block opener) needs no blank line; one that interrupts a
//! statement sequence does. The distinction is tree-driven: the requirement
//! only applies when the previous line ends a sibling statement.

use std::collections::HashSet;

use super::CheckContext;
use crate::{
	diagnostics::{Diagnostic, Edit, Severity},
	siblings,
	source::Comment,
	tree::Span,
};

pub(crate) const RULE: &str = "STRUCT-SPACE-002";

pub(crate) fn check(ctx: &CheckContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
	let statement_end_lines = statement_end_lines(ctx);

	for comment in ctx.source.comments() {
		check_comment(ctx, &statement_end_lines, comment, diagnostics);
	}
}

/// Last lines of every node sitting in a body slot. Structural lines such as
/// `else` or a bare `rescue` never appear here, which is exactly what makes
/// them acceptable lead-ins for a comment.
fn statement_end_lines(ctx: &CheckContext<'_>) -> HashSet<usize> {
	let mut lines = HashSet::new();

	for node in ctx.tree.preorder() {
		if siblings::body_slot(node).is_none() {
			continue;
		}

		let Some(span) = node.span() else {
			continue;
		};

		lines.insert(span.last_line);
	}

	lines
}

fn check_comment(
	ctx: &CheckContext<'_>,
	statement_end_lines: &HashSet<usize>,
	comment: &Comment,
	diagnostics: &mut Vec<Diagnostic>,
) {
	if comment.line <= 1 || is_inline(ctx, comment) {
		return;
	}

	let previous_line = comment.line - 1;

	if ctx.source.line_is_blank(previous_line) {
		return;
	}
	if ctx.source.comment_on_line(previous_line) {
		return;
	}
	if !statement_end_lines.contains(&previous_line) {
		return;
	}

	let Some(line_start) = ctx.source.offset_of_line(comment.line) else {
		return;
	};
	let start = line_start + comment.column;
	let span = Span::new(comment.line, comment.line, start, start + comment.text.len());

	diagnostics.push(Diagnostic {
		rule: RULE,
		severity: Severity::Warning,
		line: comment.line,
		span,
		message: "Add empty line before comment.".to_owned(),
		fix: vec![Edit {
			start: line_start,
			end: line_start,
			replacement: "\n".to_owned(),
			rule: RULE,
		}],
	});
}

/// Whether code precedes the comment on its own line.
fn is_inline(ctx: &CheckContext<'_>, comment: &Comment) -> bool {
	let Some(line) = ctx.source.line(comment.line) else {
		return false;
	};
	let column = comment.column.min(line.len());

	!line[..column].trim().is_empty()
}

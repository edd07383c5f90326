//! Blank lines required around multiline compound blocks.
//!
//! For every multiline compound node (conditional, pattern match, loop,
//! exception block, call-with-block) that shares a body slot with other
//! statements, a blank line must separate it from its previous and next
//! sibling unless an exemption applies.

use super::CheckContext;
use crate::{
	adjacency,
	diagnostics::{Diagnostic, Edit, Severity},
	siblings,
	tree::{ChildRole, ConditionalForm, Node, NodeKind, Span},
};

pub(crate) const RULE: &str = "STRUCT-SPACE-001";

/// Declarator/definer call pairs that idiomatically sit together with no
/// blank line between them.
const PAIRED_DECLARATORS: &[(&str, &str)] = &[("desc", "task")];

/// Whole-node exemption chain, evaluated short-circuit in order.
///
/// Order is part of the contract: the chained-receiver check must precede the
/// embedded-in-literal check, since a chained block is also nested inside the
/// chaining call.
const NODE_EXEMPTIONS: &[(&str, fn(&CheckContext<'_>, Node<'_>) -> bool)] = &[
	("single-line", is_single_line),
	("expression-form", is_expression_form),
	("chained-receiver", is_chained_receiver),
	("lambda-literal", is_lambda_literal),
	("embedded-in-literal", is_embedded_in_literal),
];

pub(crate) fn check(ctx: &CheckContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
	for node in ctx.tree.preorder() {
		if is_candidate(node) {
			check_node(ctx, node, diagnostics);
		}
	}
}

fn is_candidate(node: Node<'_>) -> bool {
	matches!(
		node.kind(),
		NodeKind::Conditional(_)
			| NodeKind::PatternMatch
			| NodeKind::Loop
			| NodeKind::ExceptionBlock
			| NodeKind::BlockCall { .. }
	)
}

fn check_node(ctx: &CheckContext<'_>, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>) {
	for (_, exemption) in NODE_EXEMPTIONS {
		if exemption(ctx, node) {
			return;
		}
	}

	// A block that is the right-hand side of an assignment is not a statement
	// of its own; only the gap after the whole enclosing statement matters.
	if let Some(statement) = assignment_parent(node) {
		check_after(ctx, node, statement, diagnostics);

		return;
	}

	check_before(ctx, node, diagnostics);
	check_after(ctx, node, node, diagnostics);
}

fn is_single_line(_: &CheckContext<'_>, node: Node<'_>) -> bool {
	!node.span().is_some_and(adjacency::is_multiline)
}

fn is_expression_form(_: &CheckContext<'_>, node: Node<'_>) -> bool {
	matches!(
		node.kind(),
		NodeKind::Conditional(
			ConditionalForm::Ternary | ConditionalForm::Guard | ConditionalForm::Elif
		)
	)
}

fn is_chained_receiver(_: &CheckContext<'_>, node: Node<'_>) -> bool {
	node.role() == Some(ChildRole::Receiver)
		&& node.parent().is_some_and(|parent| matches!(parent.kind(), NodeKind::Call { .. }))
}

fn is_lambda_literal(_: &CheckContext<'_>, node: Node<'_>) -> bool {
	matches!(node.kind(), NodeKind::BlockCall { lambda: true, .. })
}

fn is_embedded_in_literal(_: &CheckContext<'_>, node: Node<'_>) -> bool {
	match node.role() {
		Some(ChildRole::Element | ChildRole::Key | ChildRole::Value) => true,
		// A setter-call argument is an assignment in disguise and is handled
		// by the assignment path instead.
		Some(ChildRole::Argument) => assignment_parent(node).is_none(),
		_ => false,
	}
}

/// The enclosing assignment statement when `node` is its right-hand side,
/// either directly or through a setter call.
fn assignment_parent(node: Node<'_>) -> Option<Node<'_>> {
	let parent = node.parent()?;

	match (parent.kind(), node.role()) {
		(NodeKind::Assignment, Some(ChildRole::Rhs)) => Some(parent),
		(NodeKind::Call { name, .. }, Some(ChildRole::Argument)) if name.ends_with('=') => {
			Some(parent)
		},
		_ => None,
	}
}

fn check_before(ctx: &CheckContext<'_>, node: Node<'_>, diagnostics: &mut Vec<Diagnostic>) {
	let Some(span) = node.span() else {
		return;
	};

	if adjacency::is_first_line_of_file(span) {
		return;
	}
	if siblings::is_sole_in_slot(node) || siblings::is_first_in_slot(node) {
		return;
	}

	let Some(previous) = siblings::previous_sibling(node) else {
		return;
	};
	let Some(previous_span) = previous.span() else {
		return;
	};

	if adjacency::gap_between(previous_span, span) {
		return;
	}
	if adjacency::comment_line_before(ctx.source, span) {
		return;
	}
	if is_paired_declarator(previous, node) {
		return;
	}

	let keyword = block_keyword(node.kind());
	let fix = ctx
		.source
		.offset_of_line(span.first_line)
		.map(|offset| {
			vec![Edit { start: offset, end: offset, replacement: "\n".to_owned(), rule: RULE }]
		})
		.unwrap_or_default();

	diagnostics.push(Diagnostic {
		rule: RULE,
		severity: Severity::Warning,
		line: span.first_line,
		span,
		message: format!("Add empty line before multiline `{keyword}` block."),
		fix,
	});
}

/// Checks the gap after `block`. `statement` is the node whose siblings
/// define the gap: the block itself, or its enclosing assignment. The
/// diagnostic stays anchored at the block's closing marker either way.
fn check_after(
	ctx: &CheckContext<'_>,
	block: Node<'_>,
	statement: Node<'_>,
	diagnostics: &mut Vec<Diagnostic>,
) {
	let Some(block_span) = block.span() else {
		return;
	};
	let Some(statement_span) = statement.span() else {
		return;
	};

	if siblings::is_sole_in_slot(statement) || siblings::is_last_in_slot(statement) {
		return;
	}
	if siblings::followed_by_handler(statement) {
		return;
	}

	let Some(next) = siblings::next_sibling(statement) else {
		return;
	};
	let Some(next_span) = next.span() else {
		return;
	};

	if adjacency::gap_between(statement_span, next_span) {
		return;
	}
	if adjacency::comment_line_after(ctx.source, block_span) {
		return;
	}

	let keyword = block_keyword(block.kind());
	let anchor =
		Span::new(block_span.last_line, block_span.last_line, block_span.end, block_span.end);

	diagnostics.push(Diagnostic {
		rule: RULE,
		severity: Severity::Warning,
		line: block_span.last_line,
		span: anchor,
		message: format!("Add empty line after multiline `{keyword}` block."),
		fix: vec![Edit {
			start: statement_span.end,
			end: statement_span.end,
			replacement: "\n".to_owned(),
			rule: RULE,
		}],
	});
}

fn is_paired_declarator(previous: Node<'_>, node: Node<'_>) -> bool {
	let NodeKind::BlockCall { name, .. } = node.kind() else {
		return false;
	};
	let NodeKind::Call { name: previous_name, .. } = previous.kind() else {
		return false;
	};

	PAIRED_DECLARATORS.iter().any(|(declarator, definer)| {
		previous_name.as_str() == *declarator && name.as_str() == *definer
	})
}

fn block_keyword(kind: &NodeKind) -> &'static str {
	match kind {
		NodeKind::Conditional(_) => "if",
		NodeKind::PatternMatch => "case",
		NodeKind::Loop => "while",
		NodeKind::ExceptionBlock => "begin",
		NodeKind::BlockCall { .. } => "do...end",
		_ => "block",
	}
}

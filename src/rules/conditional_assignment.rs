//! No assignment whose right-hand side is a multibranch conditional.
//!
//! `foo = if c ... else ... end` should become assignments inside the
//! branches. Ternaries stay allowed; a branchless `if` has nothing to move
//! into.

use super::CheckContext;
use crate::{
	diagnostics::{Diagnostic, Severity},
	tree::{ChildRole, ConditionalForm, Node, NodeKind},
};

pub(crate) const RULE: &str = "STRUCT-ASSIGN-001";

pub(crate) fn check(ctx: &CheckContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
	for node in ctx.tree.preorder() {
		if !matches!(node.kind(), NodeKind::Assignment) {
			continue;
		}

		let Some(rhs) = node.children_with_role(ChildRole::Rhs).next() else {
			continue;
		};
		let Some(keyword) = branching_keyword(rhs) else {
			continue;
		};
		let Some(span) = node.span() else {
			continue;
		};

		diagnostics.push(Diagnostic {
			rule: RULE,
			severity: Severity::Warning,
			line: span.first_line,
			span,
			message: format!("Move the assignment inside the `{keyword}` branch."),
			fix: Vec::new(),
		});
	}
}

fn branching_keyword(rhs: Node<'_>) -> Option<&'static str> {
	match rhs.kind() {
		NodeKind::Conditional(ConditionalForm::Full) if has_else_branch(rhs) => Some("if"),
		NodeKind::PatternMatch => Some("case"),
		_ => None,
	}
}

/// An `elsif` continuation occupies the else slot, so chains count as having
/// an else branch too.
fn has_else_branch(node: Node<'_>) -> bool {
	node.children_with_role(ChildRole::ElseBody).next().is_some()
}

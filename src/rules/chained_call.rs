//! No method call chained directly onto a closing `end` marker.
//!
//! The result should be assigned to a variable first; chaining off a closing
//! marker hides what the call receives.

use super::CheckContext;
use crate::{
	diagnostics::{Diagnostic, Severity},
	tree::{ChildRole, ConditionalForm, Node, NodeKind, Span},
};

pub(crate) const RULE: &str = "STRUCT-CHAIN-001";

pub(crate) fn check(ctx: &CheckContext<'_>, diagnostics: &mut Vec<Diagnostic>) {
	for node in ctx.tree.preorder() {
		if !matches!(node.kind(), NodeKind::Call { .. }) {
			continue;
		}

		let Some(receiver) = node.children_with_role(ChildRole::Receiver).next() else {
			continue;
		};

		if !ends_with_closing_marker(receiver) {
			continue;
		}

		let Some(receiver_span) = receiver.span() else {
			continue;
		};

		// Anchor on the closing line, where the chained selector sits.
		let anchor = Span::new(
			receiver_span.last_line,
			receiver_span.last_line,
			receiver_span.end,
			node.span().map_or(receiver_span.end, |span| span.end),
		);

		diagnostics.push(Diagnostic {
			rule: RULE,
			severity: Severity::Warning,
			line: receiver_span.last_line,
			span: anchor,
			message: "Do not call methods directly after `end`.".to_owned(),
			fix: Vec::new(),
		});
	}
}

fn ends_with_closing_marker(node: Node<'_>) -> bool {
	match node.kind() {
		NodeKind::Conditional(ConditionalForm::Full)
		| NodeKind::PatternMatch
		| NodeKind::Loop
		| NodeKind::ExceptionBlock
		| NodeKind::MethodDef
		| NodeKind::ClassDef
		| NodeKind::ModuleDef => true,
		NodeKind::BlockCall { braces, .. } => !braces,
		_ => false,
	}
}

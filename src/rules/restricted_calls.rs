//! Restricted and prohibited method names, driven by host configuration.

use super::CheckContext;
use crate::{
	config::RuleConfig,
	diagnostics::{Diagnostic, Edit, Severity},
	tree::NodeKind,
};

pub(crate) const RULE: &str = "STRUCT-CALL-001";

pub(crate) fn check(
	ctx: &CheckContext<'_>,
	config: &RuleConfig,
	diagnostics: &mut Vec<Diagnostic>,
) {
	if config.replace_methods.is_empty() && config.prohibited_methods.is_empty() {
		return;
	}

	for node in ctx.tree.preorder() {
		let name = match node.kind() {
			NodeKind::Call { name, .. } | NodeKind::BlockCall { name, .. } => name.as_str(),
			_ => continue,
		};
		let Some(span) = node.span() else {
			continue;
		};

		if let Some(replacement) = config.replace_methods.get(name) {
			// The replacement fix needs the selector's own span; without it
			// the violation is still reported, just not fixable.
			let fix = node
				.selector_span()
				.map(|selector| {
					vec![Edit {
						start: selector.start,
						end: selector.end,
						replacement: replacement.with.clone(),
						rule: RULE,
					}]
				})
				.unwrap_or_default();

			diagnostics.push(Diagnostic {
				rule: RULE,
				severity: Severity::Error,
				line: span.first_line,
				span,
				message: format!(
					"You should use `{}` instead of `{name}` because {}",
					replacement.with, replacement.reason
				),
				fix,
			});
		} else if let Some(reason) = config.prohibited_methods.get(name) {
			diagnostics.push(Diagnostic {
				rule: RULE,
				severity: Severity::Error,
				line: span.first_line,
				span,
				message: format!("You should not use `{name}` because {reason}"),
				fix: Vec::new(),
			});
		}
	}
}

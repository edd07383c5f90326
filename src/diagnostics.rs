//! Diagnostic and edit records handed to the host sink.

use crate::tree::Span;

/// How severe a violation is; the host decides how each level is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
	/// Style concern.
	Warning,
	/// Must-fix concern.
	Error,
}

/// One byte-anchored text replacement. `start == end` is a pure insertion.
///
/// Edits emitted by one engine pass are non-overlapping and ordered by
/// position; the applier in [`crate::apply_fixes`] re-sorts and drops any
/// overlap it still detects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
	/// Byte offset where the replaced range starts.
	pub start: usize,
	/// Byte offset one past the replaced range.
	pub end: usize,
	/// Replacement text.
	pub replacement: String,
	/// Rule id that produced the edit.
	pub rule: &'static str,
}

/// One reported violation, created once per violating node per pass and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Diagnostic {
	/// Rule id.
	pub rule: &'static str,
	/// Severity level.
	pub severity: Severity,
	/// Anchor line the marker is shown on (1-based).
	pub line: usize,
	/// Anchor span of the marker.
	pub span: Span,
	/// Human-readable message.
	pub message: String,
	/// Fix edits; empty when the violation has no safe automatic fix.
	pub fix: Vec<Edit>,
}

impl Diagnostic {
	/// Whether this diagnostic carries a fix.
	pub fn fixable(&self) -> bool {
		!self.fix.is_empty()
	}

	/// Renders the diagnostic in `line:1: [RULE] message` form.
	pub fn format(&self) -> String {
		format!(
			"{}:1: [{}] {}{}",
			self.line,
			self.rule,
			self.message,
			if self.fixable() { " (fixable)" } else { "" }
		)
	}
}

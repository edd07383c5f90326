//! Resolved per-rule configuration values.
//!
//! Loading and merging configuration is the host's concern; the engine only
//! consumes already-resolved values.

use std::collections::BTreeMap;

use time::Date;

/// Replacement directive for one restricted method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodReplacement {
	/// Method to call instead.
	pub with: String,
	/// Human-readable reason shown in the diagnostic.
	pub reason: String,
}

/// Enable flags and value maps for every rule, pre-resolved by the host.
#[derive(Debug, Clone)]
pub struct RuleConfig {
	/// Blank lines around multiline compound blocks.
	pub blank_lines: bool,
	/// Blank line before full-line comments.
	pub comment_gaps: bool,
	/// No method call chained directly onto a closing marker.
	pub chained_call: bool,
	/// No assignment whose right-hand side is a multibranch conditional.
	pub conditional_assignment: bool,
	/// Restricted/prohibited method names.
	pub restricted_calls: bool,
	/// Dated TODO/NOTE/FIXME comments past their date.
	pub stale_comments: bool,
	/// Restricted-name map: name to replacement directive. Defaults to empty.
	pub replace_methods: BTreeMap<String, MethodReplacement>,
	/// Prohibited-name map: name to reason. Defaults to empty.
	pub prohibited_methods: BTreeMap<String, String>,
	/// Reference date for the dated-comment rule; `None` means the current
	/// UTC date at check time.
	pub today: Option<Date>,
}

impl Default for RuleConfig {
	fn default() -> Self {
		Self {
			blank_lines: true,
			comment_gaps: true,
			chained_call: true,
			conditional_assignment: true,
			restricted_calls: true,
			stale_comments: true,
			replace_methods: BTreeMap::new(),
			prohibited_methods: BTreeMap::new(),
			today: None,
		}
	}
}

//! Applies collected edit instructions to source text.
//!
//! Edits arrive only after a full engine pass, never interleaved with
//! traversal, so positions stay valid. Overlapping edits are dropped rather
//! than applied; their diagnostics remain reported without a fix.

use thiserror::Error;

use crate::diagnostics::Edit;

/// Failure applying edits to a text buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixError {
	/// An edit's range does not fit the text it targets.
	#[error("invalid edit range {start}..{end} for text length {len}")]
	InvalidRange {
		/// Start offset of the offending edit.
		start: usize,
		/// End offset of the offending edit.
		end: usize,
		/// Length of the target text.
		len: usize,
	},
}

/// Applies `edits` to `text` and returns how many were applied.
///
/// Edits are sorted by position; any edit starting inside an earlier edit's
/// range is skipped. Surviving edits are applied back to front so earlier
/// offsets stay valid.
pub(crate) fn apply_edits(text: &mut String, mut edits: Vec<Edit>) -> Result<usize, FixError> {
	if edits.is_empty() {
		return Ok(0);
	}

	edits.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)).then(a.rule.cmp(b.rule)));

	let mut filtered = Vec::new();
	let mut last_end = 0_usize;

	for edit in edits {
		if edit.end > text.len() || edit.start > edit.end {
			return Err(FixError::InvalidRange { start: edit.start, end: edit.end, len: text.len() });
		}
		if edit.start < last_end {
			continue;
		}

		last_end = edit.end;
		filtered.push(edit);
	}

	let applied = filtered.len();

	for edit in filtered.iter().rev() {
		text.replace_range(edit.start..edit.end, &edit.replacement);
	}

	Ok(applied)
}

//! Line-adjacency decisions over source spans.

use crate::{source::SourceFile, tree::Span};

/// Whether the span covers more than one line.
pub(crate) fn is_multiline(span: Span) -> bool {
	span.first_line != span.last_line
}

/// Whether at least one blank line separates `a` from `b`.
///
/// This is the sole operational definition of "blank line between": a line
/// difference of exactly 1 means adjacent lines, 2 or more means at least one
/// blank line regardless of how many.
pub(crate) fn gap_between(a: Span, b: Span) -> bool {
	b.first_line.saturating_sub(a.last_line) > 1
}

/// Whether a comment occupies the line immediately before the span. A comment
/// there is acceptable separation context and waives the blank-line
/// requirement in that direction.
pub(crate) fn comment_line_before(source: &SourceFile, span: Span) -> bool {
	span.first_line > 1 && source.comment_on_line(span.first_line - 1)
}

/// Whether a comment occupies the line immediately after the span.
pub(crate) fn comment_line_after(source: &SourceFile, span: Span) -> bool {
	source.comment_on_line(span.last_line + 1)
}

/// Whether the span starts on the first line of the file, where nothing can
/// precede it.
pub(crate) fn is_first_line_of_file(span: Span) -> bool {
	span.first_line == 1
}

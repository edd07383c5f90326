//! Dated TODO/NOTE/FIXME comments past their review date.

use once_cell::sync::Lazy;
use regex::Regex;
use time::{macros::format_description, Date, OffsetDateTime};

use super::CheckContext;
use crate::{
	config::RuleConfig,
	diagnostics::{Diagnostic, Severity},
	tree::Span,
};

pub(crate) const RULE: &str = "STRUCT-COMMENT-001";

static DATED_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"(?i)^\s*(?:#+|//+)?\s*(?:NOTE|TODO|FIXME)\[(\d{4}-\d{2}-\d{2})\]:")
		.expect("Expected operation to succeed.")
});

pub(crate) fn check(
	ctx: &CheckContext<'_>,
	config: &RuleConfig,
	diagnostics: &mut Vec<Diagnostic>,
) {
	let today = config.today.unwrap_or_else(|| OffsetDateTime::now_utc().date());
	let format = format_description!("[year]-[month]-[day]");

	for comment in ctx.source.comments() {
		let Some(captures) = DATED_MARKER_RE.captures(&comment.text) else {
			continue;
		};
		let date_text = &captures[1];
		// A malformed date (e.g. month 13) skips this single match only.
		let Ok(date) = Date::parse(date_text, &format) else {
			continue;
		};

		if date >= today {
			continue;
		}

		let start = ctx.source.offset_of_line(comment.line).unwrap_or_default() + comment.column;
		let span = Span::new(comment.line, comment.line, start, start + comment.text.len());

		diagnostics.push(Diagnostic {
			rule: RULE,
			severity: Severity::Warning,
			line: comment.line,
			span,
			message: format!("Review or remove this outdated comment dated {date_text}"),
			fix: Vec::new(),
		});
	}
}

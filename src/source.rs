//! Raw source text plus the comment list, with line/offset conversion.

/// One source comment. Comments are not tree nodes; the host parser supplies
/// them as a separate ordered sequence and rules look them up by line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
	/// Line the comment starts on (1-based).
	pub line: usize,
	/// Byte column of the comment marker within its line (0-based).
	pub column: usize,
	/// Full comment text including the marker.
	pub text: String,
}

/// One file's text, split lines, line-start offsets, and comments.
#[derive(Debug)]
pub struct SourceFile {
	text: String,
	lines: Vec<String>,
	line_starts: Vec<usize>,
	comments: Vec<Comment>,
}

impl SourceFile {
	/// Builds the line table for `text`. `comments` must be ordered by line.
	pub fn new(text: impl Into<String>, comments: Vec<Comment>) -> Self {
		let text = text.into();
		let lines = text.lines().map(ToOwned::to_owned).collect::<Vec<_>>();
		let line_starts = build_line_starts(&text);

		Self { text, lines, line_starts, comments }
	}

	/// The raw text.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Content of `line` (1-based), without its terminator.
	pub fn line(&self, line: usize) -> Option<&str> {
		if line == 0 {
			return None;
		}

		self.lines.get(line - 1).map(String::as_str)
	}

	/// Number of lines.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// The comment list, ordered by line.
	pub fn comments(&self) -> &[Comment] {
		&self.comments
	}

	/// Whether any comment starts on `line`.
	pub fn comment_on_line(&self, line: usize) -> bool {
		self.comments.iter().any(|comment| comment.line == line)
	}

	/// Whether `line` is blank or absent.
	pub fn line_is_blank(&self, line: usize) -> bool {
		self.line(line).is_none_or(|content| content.trim().is_empty())
	}

	/// Byte offset of the start of `line` (1-based).
	pub fn offset_of_line(&self, line: usize) -> Option<usize> {
		if line == 0 {
			return None;
		}

		self.line_starts.get(line - 1).copied()
	}

	/// Line (1-based) containing byte `offset`.
	pub fn line_of_offset(&self, offset: usize) -> usize {
		match self.line_starts.binary_search(&offset) {
			Ok(pos) => pos + 1,
			Err(pos) => pos,
		}
	}
}

fn build_line_starts(text: &str) -> Vec<usize> {
	let mut starts = vec![0_usize];

	for (idx, ch) in text.char_indices() {
		if ch == '\n' {
			starts.push(idx + 1);
		}
	}

	starts
}

//! Miniature fixture parser for a Ruby-flavored script language.
//!
//! Integration tests feed scenario snippets through this parser to get the
//! tree + comment list a real host parser would supply. It covers only the
//! shapes the tests exercise and is deliberately line-based.

#![allow(dead_code)]

use blockstyle::{
	ChildRole, Comment, ConditionalForm, NodeId, NodeKind, SourceFile, Span, SyntaxTree,
	TreeBuilder,
};

/// A parsed fixture: the tree plus the source it came from.
pub struct Fixture {
	pub tree: SyntaxTree,
	pub source: SourceFile,
}

/// Parses `text` into a fixture. Panics on shapes the toy grammar does not
/// cover; fixtures are test-authored, so that is a test bug.
pub fn parse(text: &str) -> Fixture {
	let mut parser = Parser::new(text);
	let last_line = parser.lines.len().max(1);
	let root = parser.builder.node(NodeKind::Program, Span::new(1, last_line, 0, text.len()));

	parser.parse_statements(root, ChildRole::Body, &[]);

	let Parser { builder, comments, .. } = parser;

	Fixture { tree: builder.finish(root), source: SourceFile::new(text, comments) }
}

/// Chained selector following a closing `end` (`end.compact`).
struct Chain {
	name: String,
	safe: bool,
	end_offset: usize,
}

/// Where a compound construct closed: the `end` line, the byte offset just
/// past the keyword, and any chained selector after it.
struct EndInfo {
	line_idx: usize,
	end_offset: usize,
	chain: Option<Chain>,
}

struct Parser {
	/// Per-line code content: comment text is stripped, so full-line comment
	/// lines read as blank here. Offsets still index the original text.
	lines: Vec<String>,
	line_starts: Vec<usize>,
	pos: usize,
	builder: TreeBuilder,
	comments: Vec<Comment>,
}

impl Parser {
	fn new(text: &str) -> Self {
		let mut line_starts = vec![0_usize];

		for (idx, ch) in text.char_indices() {
			if ch == '\n' {
				line_starts.push(idx + 1);
			}
		}

		let mut lines = Vec::new();
		let mut comments = Vec::new();

		for (idx, line) in text.lines().enumerate() {
			let trimmed = line.trim_start();

			if trimmed.starts_with('#') {
				comments.push(Comment {
					line: idx + 1,
					column: line.len() - trimmed.len(),
					text: line.trim().to_owned(),
				});
				lines.push(String::new());
			} else if let Some(pos) = line.find(" #") {
				comments.push(Comment {
					line: idx + 1,
					column: pos + 1,
					text: line[pos + 1..].trim_end().to_owned(),
				});
				lines.push(line[..pos].to_owned());
			} else {
				lines.push(line.to_owned());
			}
		}

		Self { lines, line_starts, pos: 0, builder: TreeBuilder::new(), comments }
	}

	fn line_start(&self, idx: usize) -> usize {
		self.line_starts[idx]
	}

	fn content_start(&self, idx: usize) -> usize {
		let line = &self.lines[idx];

		self.line_start(idx) + (line.len() - line.trim_start().len())
	}

	fn content_end(&self, idx: usize) -> usize {
		self.line_start(idx) + self.lines[idx].trim_end().len()
	}

	/// Nearest line strictly before `self.pos` that carries code.
	fn previous_content_line(&self) -> usize {
		let mut idx = self.pos - 1;

		loop {
			if !self.lines[idx].trim().is_empty() {
				return idx;
			}

			idx -= 1;
		}
	}

	fn parse_statements(&mut self, parent: NodeId, role: ChildRole, terminators: &[&str]) {
		while self.pos < self.lines.len() {
			let trimmed = self.lines[self.pos].trim();

			if trimmed.is_empty() {
				self.pos += 1;

				continue;
			}
			if is_terminator(trimmed, terminators) {
				return;
			}

			let statement = self.parse_statement();

			self.builder.attach(parent, role, statement);
		}
	}

	fn parse_statement(&mut self) -> NodeId {
		let line_idx = self.pos;
		let start = self.content_start(line_idx);
		let line = self.lines[line_idx].clone();
		let trimmed = line.trim();

		if let Some(eq) = find_assignment(trimmed) {
			return self.parse_assignment(line_idx, start, trimmed, eq);
		}
		if let Some((node, end_info)) = self.try_parse_compound(line_idx, start, trimmed) {
			let (node, _, _) = self.wrap_chain(node, line_idx, start, end_info);

			return node;
		}

		self.pos += 1;

		self.leaf(line_idx, start, trimmed)
	}

	/// Dispatches the multi-line constructs. `intro` is the construct's first
	/// line content (for assignments, the right-hand side only). Returns
	/// `None` when `intro` opens no compound.
	fn try_parse_compound(
		&mut self,
		line_idx: usize,
		start: usize,
		intro: &str,
	) -> Option<(NodeId, EndInfo)> {
		if intro.starts_with("if ") || intro.starts_with("unless ") {
			return Some(self.parse_conditional(line_idx, start, false));
		}
		if intro == "case" || intro.starts_with("case ") {
			return Some(self.parse_case(line_idx, start));
		}
		if intro.starts_with("while ") || intro.starts_with("until ") {
			return Some(self.parse_body_construct(NodeKind::Loop, line_idx, start));
		}
		if intro.starts_with("def ") {
			return Some(self.parse_body_construct(NodeKind::MethodDef, line_idx, start));
		}
		if intro.starts_with("class ") {
			return Some(self.parse_body_construct(NodeKind::ClassDef, line_idx, start));
		}
		if intro.starts_with("module ") {
			return Some(self.parse_body_construct(NodeKind::ModuleDef, line_idx, start));
		}
		if intro == "begin" {
			return Some(self.parse_begin(line_idx, start));
		}
		if ends_with_do_intro(intro) {
			return Some(self.parse_block_call(line_idx, start, intro));
		}

		None
	}

	/// Wraps `node` in a call node when its closing `end` carried a chained
	/// selector. Returns the outermost node plus its last line index and end
	/// byte.
	fn wrap_chain(
		&mut self,
		node: NodeId,
		line_idx: usize,
		start: usize,
		end_info: EndInfo,
	) -> (NodeId, usize, usize) {
		let EndInfo { line_idx: end_idx, end_offset, chain } = end_info;
		let Some(chain) = chain else {
			return (node, end_idx, end_offset);
		};
		let call = self.builder.node(
			NodeKind::Call { name: chain.name.clone(), safe: chain.safe },
			Span::new(line_idx + 1, end_idx + 1, start, chain.end_offset),
		);

		self.builder.set_selector(
			call,
			Span::new(
				end_idx + 1,
				end_idx + 1,
				chain.end_offset - chain.name.len(),
				chain.end_offset,
			),
		);
		self.builder.attach(call, ChildRole::Receiver, node);

		(call, end_idx, chain.end_offset)
	}

	fn parse_conditional(
		&mut self,
		line_idx: usize,
		start: usize,
		elif: bool,
	) -> (NodeId, EndInfo) {
		let form = if elif { ConditionalForm::Elif } else { ConditionalForm::Full };
		let node = self
			.builder
			.node(NodeKind::Conditional(form), Span::new(line_idx + 1, line_idx + 1, start, start));

		self.pos += 1;
		self.parse_statements(node, ChildRole::ThenBody, &["elsif", "else", "end"]);

		let end_info = loop {
			assert!(
				self.pos < self.lines.len(),
				"unterminated conditional at line {}",
				line_idx + 1
			);

			let trimmed = self.lines[self.pos].trim();

			if trimmed.starts_with("elsif") {
				let inner_idx = self.pos;
				let inner_start = self.content_start(inner_idx);
				let (inner, end_info) = self.parse_conditional(inner_idx, inner_start, true);

				self.builder.attach(node, ChildRole::ElseBody, inner);

				break end_info;
			}
			if trimmed == "else" {
				self.pos += 1;
				self.parse_statements(node, ChildRole::ElseBody, &["end"]);

				continue;
			}

			break self.consume_end();
		};

		self.builder.set_span(
			node,
			Span::new(line_idx + 1, end_info.line_idx + 1, start, end_info.end_offset),
		);

		(node, end_info)
	}

	fn parse_case(&mut self, line_idx: usize, start: usize) -> (NodeId, EndInfo) {
		let node = self
			.builder
			.node(NodeKind::PatternMatch, Span::new(line_idx + 1, line_idx + 1, start, start));

		self.pos += 1;

		let end_info = loop {
			assert!(self.pos < self.lines.len(), "unterminated case at line {}", line_idx + 1);

			let trimmed = self.lines[self.pos].trim();

			if trimmed.is_empty() {
				self.pos += 1;

				continue;
			}
			if trimmed == "when" || trimmed.starts_with("when ") {
				let arm_idx = self.pos;
				let arm_start = self.content_start(arm_idx);
				let arm = self.builder.node(
					NodeKind::MatchArm,
					Span::new(arm_idx + 1, arm_idx + 1, arm_start, arm_start),
				);

				self.pos += 1;
				self.parse_statements(arm, ChildRole::Body, &["when", "else", "end"]);

				let last_idx = self.previous_content_line();

				self.builder.set_span(
					arm,
					Span::new(arm_idx + 1, last_idx + 1, arm_start, self.content_end(last_idx)),
				);
				self.builder.attach(node, ChildRole::Arm, arm);

				continue;
			}
			if trimmed == "else" {
				self.pos += 1;
				self.parse_statements(node, ChildRole::ElseBody, &["end"]);

				continue;
			}

			break self.consume_end();
		};

		self.builder.set_span(
			node,
			Span::new(line_idx + 1, end_info.line_idx + 1, start, end_info.end_offset),
		);

		(node, end_info)
	}

	fn parse_body_construct(
		&mut self,
		kind: NodeKind,
		line_idx: usize,
		start: usize,
	) -> (NodeId, EndInfo) {
		let node = self.builder.node(kind, Span::new(line_idx + 1, line_idx + 1, start, start));

		self.pos += 1;
		self.parse_statements(node, ChildRole::Body, &["end"]);

		let end_info = self.consume_end();

		self.builder.set_span(
			node,
			Span::new(line_idx + 1, end_info.line_idx + 1, start, end_info.end_offset),
		);

		(node, end_info)
	}

	fn parse_begin(&mut self, line_idx: usize, start: usize) -> (NodeId, EndInfo) {
		let node = self
			.builder
			.node(NodeKind::ExceptionBlock, Span::new(line_idx + 1, line_idx + 1, start, start));

		self.pos += 1;
		self.parse_statements(node, ChildRole::Body, &["rescue", "end"]);

		while self.pos < self.lines.len() {
			let trimmed = self.lines[self.pos].trim();

			if !(trimmed == "rescue" || trimmed.starts_with("rescue ")) {
				break;
			}

			let handler_idx = self.pos;
			let handler_start = self.content_start(handler_idx);
			let handler = self.builder.node(
				NodeKind::Handler,
				Span::new(handler_idx + 1, handler_idx + 1, handler_start, handler_start),
			);

			self.pos += 1;
			self.parse_statements(handler, ChildRole::Body, &["rescue", "end"]);

			let last_idx = self.previous_content_line();

			self.builder.set_span(
				handler,
				Span::new(handler_idx + 1, last_idx + 1, handler_start, self.content_end(last_idx)),
			);
			self.builder.attach(node, ChildRole::Handler, handler);
		}

		let end_info = self.consume_end();

		self.builder.set_span(
			node,
			Span::new(line_idx + 1, end_info.line_idx + 1, start, end_info.end_offset),
		);

		(node, end_info)
	}

	fn parse_block_call(
		&mut self,
		line_idx: usize,
		start: usize,
		intro: &str,
	) -> (NodeId, EndInfo) {
		let callee = intro.split_whitespace().next().unwrap_or_default();
		let lambda = callee == "->" || callee.starts_with("lambda");
		let name = callee.rsplit('.').next().unwrap_or(callee).to_owned();
		let node = self.builder.node(
			NodeKind::BlockCall { name, lambda, braces: false },
			Span::new(line_idx + 1, line_idx + 1, start, start),
		);

		self.pos += 1;
		self.parse_statements(node, ChildRole::Body, &["end"]);

		let end_info = self.consume_end();

		self.builder.set_span(
			node,
			Span::new(line_idx + 1, end_info.line_idx + 1, start, end_info.end_offset),
		);

		(node, end_info)
	}

	fn parse_assignment(
		&mut self,
		line_idx: usize,
		start: usize,
		trimmed: &str,
		eq: usize,
	) -> NodeId {
		let rhs_text = trimmed[eq + 1..].trim_start();
		let rhs_start = start + eq + 1 + (trimmed[eq + 1..].len() - rhs_text.len());
		let node = self
			.builder
			.node(NodeKind::Assignment, Span::new(line_idx + 1, line_idx + 1, start, start));

		if let Some((inner, end_info)) = self.try_parse_compound(line_idx, rhs_start, rhs_text) {
			let (rhs, end_idx, end_offset) = self.wrap_chain(inner, line_idx, rhs_start, end_info);

			self.builder.set_span(node, Span::new(line_idx + 1, end_idx + 1, start, end_offset));
			self.builder.attach(node, ChildRole::Rhs, rhs);

			return node;
		}

		self.pos += 1;
		self.builder.set_span(
			node,
			Span::new(line_idx + 1, line_idx + 1, start, self.content_end(line_idx)),
		);

		if is_ternary(rhs_text) {
			let rhs = self.builder.node(
				NodeKind::Conditional(ConditionalForm::Ternary),
				Span::new(line_idx + 1, line_idx + 1, rhs_start, self.content_end(line_idx)),
			);

			self.builder.attach(node, ChildRole::Rhs, rhs);
		}

		node
	}

	fn leaf(&mut self, line_idx: usize, start: usize, trimmed: &str) -> NodeId {
		let span = Span::new(line_idx + 1, line_idx + 1, start, start + trimmed.len());

		if is_guard(trimmed) {
			return self.builder.node(NodeKind::Conditional(ConditionalForm::Guard), span);
		}
		if is_ternary(trimmed) {
			return self.builder.node(NodeKind::Conditional(ConditionalForm::Ternary), span);
		}

		let token =
			trimmed.split(|ch: char| ch.is_whitespace() || ch == '(').next().unwrap_or_default();

		if token.chars().next().is_some_and(|ch| ch.is_ascii_lowercase() || ch == '_') {
			let safe = token.contains("&.");
			let selector = token.rsplit(|ch| ch == '.' || ch == '&').next().unwrap_or(token);
			let selector_start = start + token.len() - selector.len();
			let node = self.builder.node(NodeKind::Call { name: selector.to_owned(), safe }, span);

			self.builder.set_selector(
				node,
				Span::new(
					line_idx + 1,
					line_idx + 1,
					selector_start,
					selector_start + selector.len(),
				),
			);

			return node;
		}

		self.builder.node(NodeKind::Statement, span)
	}

	fn consume_end(&mut self) -> EndInfo {
		let line_idx = self.pos;
		let trimmed = self.lines[line_idx].trim();

		assert!(trimmed.starts_with("end"), "expected `end` at line {}", line_idx + 1);

		let keyword_end = self.content_start(line_idx) + 3;
		let chain = parse_chain_suffix(&trimmed[3..], keyword_end);

		self.pos += 1;

		EndInfo { line_idx, end_offset: keyword_end, chain }
	}
}

fn parse_chain_suffix(rest: &str, keyword_end: usize) -> Option<Chain> {
	let (safe, selector_text) = if let Some(stripped) = rest.strip_prefix("&.") {
		(true, stripped)
	} else if let Some(stripped) = rest.strip_prefix('.') {
		(false, stripped)
	} else {
		return None;
	};
	let name = selector_text
		.chars()
		.take_while(|ch| ch.is_ascii_alphanumeric() || *ch == '_')
		.collect::<String>();

	if name.is_empty() {
		return None;
	}

	let consumed = rest.len() - selector_text.len() + name.len();

	Some(Chain { name, safe, end_offset: keyword_end + consumed })
}

fn is_terminator(trimmed: &str, terminators: &[&str]) -> bool {
	terminators.iter().any(|terminator| match *terminator {
		"end" => trimmed == "end" || trimmed.starts_with("end.") || trimmed.starts_with("end&."),
		"elsif" => trimmed.starts_with("elsif"),
		"when" => trimmed == "when" || trimmed.starts_with("when "),
		"rescue" => trimmed == "rescue" || trimmed.starts_with("rescue "),
		other => trimmed == other,
	})
}

fn ends_with_do_intro(trimmed: &str) -> bool {
	trimmed == "do"
		|| trimmed.ends_with(" do")
		|| (trimmed.ends_with('|') && trimmed.contains(" do |"))
}

fn is_ternary(trimmed: &str) -> bool {
	trimmed.contains(" ? ") && trimmed.contains(" : ")
}

fn is_guard(trimmed: &str) -> bool {
	!trimmed.starts_with("if ")
		&& !trimmed.starts_with("unless ")
		&& (trimmed.contains(" if ") || trimmed.contains(" unless "))
}

/// Byte index of a plain `=` separating a simple left-hand side from its
/// right-hand side, ignoring comparison and compound operators.
fn find_assignment(trimmed: &str) -> Option<usize> {
	let bytes = trimmed.as_bytes();

	for idx in 1..bytes.len() {
		if bytes[idx] != b'=' {
			continue;
		}
		if matches!(
			bytes[idx - 1],
			b'=' | b'!' | b'<' | b'>' | b'+' | b'-' | b'*' | b'/' | b'%' | b'&' | b'|'
		) {
			continue;
		}
		if bytes.get(idx + 1) == Some(&b'=') {
			continue;
		}

		let lhs = trimmed[..idx].trim();

		if lhs.is_empty()
			|| !lhs
				.chars()
				.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '@' | '$'))
		{
			return None;
		}

		return Some(idx);
	}

	None
}

//! Arena-backed syntax tree consumed by the rule engine.
//!
//! The host parser materializes one tree per file through [`TreeBuilder`];
//! the engine reads it back through borrowed [`Node`] handles. Nodes store
//! their parent and role as plain arena ids, so back-references never form
//! ownership cycles.

use std::fmt;

/// Source extent of one node: 1-based line range plus byte offsets into the
/// original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
	/// First line the node occupies (1-based).
	pub first_line: usize,
	/// Last line the node occupies (1-based).
	pub last_line: usize,
	/// Byte offset of the node's first character.
	pub start: usize,
	/// Byte offset one past the node's last character.
	pub end: usize,
}

impl Span {
	/// Builds a span from a line range and byte range.
	pub fn new(first_line: usize, last_line: usize, start: usize, end: usize) -> Self {
		Self { first_line, last_line, start, end }
	}
}

/// Surface form of a conditional construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalForm {
	/// Full statement form with a keyword, branch bodies, and a closing marker.
	Full,
	/// Expression form (`cond ? a : b`); never a statement block.
	Ternary,
	/// Modifier/guard form (`stmt if cond`); never a statement block.
	Guard,
	/// An `elsif` continuation; part of its parent conditional, not a separate
	/// block.
	Elif,
}

/// Closed set of construct kinds the engine distinguishes.
///
/// The set is deliberately language-neutral: a host parser maps its own
/// grammar onto these shapes. Adding a kind means adding a row to the
/// body-slot table in `siblings`, not threading new branches through the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	/// Root of a file; its body slot is the top-level statement sequence.
	Program,
	/// `if`/`unless` in any of its forms.
	Conditional(ConditionalForm),
	/// `case`/`match` dispatch with arms and an optional else body.
	PatternMatch,
	/// One arm of a pattern match; owns its own body slot.
	MatchArm,
	/// `while`/`until`/`for` loop.
	Loop,
	/// `begin`/`rescue` protected region.
	ExceptionBlock,
	/// One exception handler clause; owns its own body slot.
	Handler,
	/// A call with an attached block body (`items.map do ... end`).
	BlockCall {
		/// Name of the block-taking method.
		name: String,
		/// Whether the callee is a lambda/closure literal.
		lambda: bool,
		/// Whether the block uses brace delimiters instead of `do`/`end`.
		braces: bool,
	},
	/// Assignment statement; the right-hand side is a `Rhs` child.
	Assignment,
	/// Method definition; its body is a slot.
	MethodDef,
	/// Class definition; its body is a slot.
	ClassDef,
	/// Module/namespace definition; its body is a slot.
	ModuleDef,
	/// Array or map literal container.
	Collection,
	/// One key/value entry of a map literal.
	Pair,
	/// Plain method call.
	Call {
		/// Selector name.
		name: String,
		/// Whether the call uses safe navigation (`&.`).
		safe: bool,
	},
	/// Any other statement or expression the host does not classify further.
	Statement,
}

/// Slot a child occupies within its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildRole {
	/// The single statement body of a construct.
	Body,
	/// The then-branch body of a conditional.
	ThenBody,
	/// The else-branch body of a conditional or pattern match.
	ElseBody,
	/// A pattern-match arm.
	Arm,
	/// An exception handler clause.
	Handler,
	/// A condition/scrutinee expression.
	Condition,
	/// The receiver of a call.
	Receiver,
	/// A call argument.
	Argument,
	/// The right-hand side of an assignment.
	Rhs,
	/// The key of a pair.
	Key,
	/// The value of a pair.
	Value,
	/// An element of a collection literal.
	Element,
}

/// Index of a node inside its [`SyntaxTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct NodeData {
	kind: NodeKind,
	span: Option<Span>,
	selector: Option<Span>,
	parent: Option<NodeId>,
	role: Option<ChildRole>,
	children: Vec<NodeId>,
}

/// Immutable syntax tree for one file.
#[derive(Debug)]
pub struct SyntaxTree {
	nodes: Vec<NodeData>,
	root: NodeId,
}

impl SyntaxTree {
	/// Returns the root node.
	pub fn root(&self) -> Node<'_> {
		self.node(self.root)
	}

	/// Returns a handle for `id`.
	///
	/// Ids are only meaningful for the tree that produced them.
	pub fn node(&self, id: NodeId) -> Node<'_> {
		Node { tree: self, id }
	}

	/// Iterates every node in preorder, which is source order for trees whose
	/// sibling order follows the source.
	pub fn preorder(&self) -> Preorder<'_> {
		Preorder { tree: self, stack: vec![self.root] }
	}

	fn data(&self, id: NodeId) -> &NodeData {
		&self.nodes[id.0]
	}
}

/// Borrowed view of one tree node.
#[derive(Clone, Copy)]
pub struct Node<'t> {
	tree: &'t SyntaxTree,
	id: NodeId,
}

impl<'t> Node<'t> {
	/// Arena id of this node.
	pub fn id(&self) -> NodeId {
		self.id
	}

	/// Construct kind.
	pub fn kind(&self) -> &'t NodeKind {
		&self.tree.data(self.id).kind
	}

	/// Source span, or `None` for synthetic nodes. A node without a span is
	/// never a valid adjacency subject and is skipped by every rule.
	pub fn span(&self) -> Option<Span> {
		self.tree.data(self.id).span
	}

	/// Span of the call selector name, when the host supplied one. Only the
	/// replacement fix of the restricted-call rule consumes this.
	pub fn selector_span(&self) -> Option<Span> {
		self.tree.data(self.id).selector
	}

	/// Parent node; `None` for the root.
	pub fn parent(&self) -> Option<Node<'t>> {
		self.tree.data(self.id).parent.map(|id| self.tree.node(id))
	}

	/// Slot this node occupies in its parent; `None` for the root.
	pub fn role(&self) -> Option<ChildRole> {
		self.tree.data(self.id).role
	}

	/// Children in source order.
	pub fn children(&self) -> impl Iterator<Item = Node<'t>> + '_ {
		self.tree.data(self.id).children.iter().map(|id| self.tree.node(*id))
	}

	/// Children occupying `role`, in source order.
	pub fn children_with_role(&self, role: ChildRole) -> impl Iterator<Item = Node<'t>> + '_ {
		self.children().filter(move |child| child.role() == Some(role))
	}
}

impl PartialEq for Node<'_> {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id && std::ptr::eq(self.tree, other.tree)
	}
}

impl fmt::Debug for Node<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Node")
			.field("id", &self.id)
			.field("kind", self.kind())
			.field("span", &self.span())
			.finish()
	}
}

/// Preorder traversal over a [`SyntaxTree`].
#[derive(Debug)]
pub struct Preorder<'t> {
	tree: &'t SyntaxTree,
	stack: Vec<NodeId>,
}

impl<'t> Iterator for Preorder<'t> {
	type Item = Node<'t>;

	fn next(&mut self) -> Option<Self::Item> {
		let id = self.stack.pop()?;

		self.stack.extend(self.tree.data(id).children.iter().rev());

		Some(self.tree.node(id))
	}
}

/// Host-facing tree construction API.
///
/// Nodes are created detached, wired together with [`TreeBuilder::attach`],
/// and frozen by [`TreeBuilder::finish`]. Attach order defines sibling order
/// and must follow source order.
#[derive(Debug, Default)]
pub struct TreeBuilder {
	nodes: Vec<NodeData>,
}

impl TreeBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a spanned node.
	pub fn node(&mut self, kind: NodeKind, span: Span) -> NodeId {
		self.push(kind, Some(span))
	}

	/// Creates a synthetic node with no source extent.
	pub fn synthetic(&mut self, kind: NodeKind) -> NodeId {
		self.push(kind, None)
	}

	/// Records the selector-name span of a call node.
	pub fn set_selector(&mut self, id: NodeId, span: Span) {
		self.nodes[id.0].selector = Some(span);
	}

	/// Replaces the span of `id`. Hosts use this for constructs whose end is
	/// only known after their children were parsed.
	pub fn set_span(&mut self, id: NodeId, span: Span) {
		self.nodes[id.0].span = Some(span);
	}

	/// Attaches `child` as the next child of `parent` under `role`.
	pub fn attach(&mut self, parent: NodeId, role: ChildRole, child: NodeId) {
		self.nodes[child.0].parent = Some(parent);
		self.nodes[child.0].role = Some(role);
		self.nodes[parent.0].children.push(child);
	}

	/// Freezes the arena with `root` as the tree root.
	pub fn finish(self, root: NodeId) -> SyntaxTree {
		SyntaxTree { nodes: self.nodes, root }
	}

	fn push(&mut self, kind: NodeKind, span: Option<Span>) -> NodeId {
		let id = NodeId(self.nodes.len());

		self.nodes.push(NodeData {
			kind,
			span,
			selector: None,
			parent: None,
			role: None,
			children: Vec::new(),
		});

		id
	}
}

//! Sibling classification over parent-defined body slots.
//!
//! A node's siblings are only the other statements in the same body slot of
//! the same parent. Which child roles count as body slots is a per-kind table
//! (`statement_roles`), so supporting a new compound construct is one table
//! row, not a new code path.

use tracing::debug;

use crate::tree::{ChildRole, Node, NodeKind};

/// Body-slot table: which child roles of `kind` hold ordered sibling
/// statements.
pub(crate) fn statement_roles(kind: &NodeKind) -> &'static [ChildRole] {
	match kind {
		NodeKind::Program
		| NodeKind::MatchArm
		| NodeKind::Loop
		| NodeKind::ExceptionBlock
		| NodeKind::Handler
		| NodeKind::BlockCall { .. }
		| NodeKind::MethodDef
		| NodeKind::ClassDef
		| NodeKind::ModuleDef => &[ChildRole::Body],
		NodeKind::Conditional(_) => &[ChildRole::ThenBody, ChildRole::ElseBody],
		NodeKind::PatternMatch => &[ChildRole::ElseBody],
		_ => &[],
	}
}

/// The body slot `node` occupies, when its role is a statement position of
/// its parent. `None` means no sibling-based rule applies to the node.
pub(crate) fn body_slot(node: Node<'_>) -> Option<ChildRole> {
	let parent = node.parent()?;
	let role = node.role()?;
	let roles = statement_roles(parent.kind());

	if roles.contains(&role) {
		return Some(role);
	}
	if roles.is_empty()
		&& matches!(role, ChildRole::Body | ChildRole::ThenBody | ChildRole::ElseBody)
	{
		// A body-position child under a kind missing from the table: new
		// syntax forms must not crash the engine, so no rule applies.
		debug!(kind = ?parent.kind(), "no body-slot table entry; skipping node");
	}

	None
}

/// Ordered, span-valid members of `node`'s body slot, including `node`
/// itself. Placeholder children without a span are not siblings.
pub(crate) fn slot_members(node: Node<'_>) -> Option<Vec<Node<'_>>> {
	let slot = body_slot(node)?;
	let parent = node.parent()?;

	Some(parent.children_with_role(slot).filter(|child| child.span().is_some()).collect())
}

/// Whether `node` is the entire content of its body slot. Separation is then
/// the enclosing construct's concern, not this node's.
pub(crate) fn is_sole_in_slot(node: Node<'_>) -> bool {
	slot_members(node).is_some_and(|members| members.len() == 1)
}

/// Whether `node` is the first statement of its slot.
pub(crate) fn is_first_in_slot(node: Node<'_>) -> bool {
	slot_members(node).is_some_and(|members| members.first() == Some(&node))
}

/// Whether `node` is the last statement of its slot.
pub(crate) fn is_last_in_slot(node: Node<'_>) -> bool {
	slot_members(node).is_some_and(|members| members.last() == Some(&node))
}

/// Nearest preceding statement in `node`'s slot.
pub(crate) fn previous_sibling(node: Node<'_>) -> Option<Node<'_>> {
	let members = slot_members(node)?;
	let index = members.iter().position(|member| *member == node)?;

	if index == 0 { None } else { Some(members[index - 1]) }
}

/// Nearest following statement in `node`'s slot.
pub(crate) fn next_sibling(node: Node<'_>) -> Option<Node<'_>> {
	let members = slot_members(node)?;
	let index = members.iter().position(|member| *member == node)?;

	members.get(index + 1).copied()
}

/// Whether the next positional child after `node` in its exception-block
/// parent is a handler clause. A handler is syntactically part of the same
/// compound construct, so no blank line is required before it.
pub(crate) fn followed_by_handler(node: Node<'_>) -> bool {
	let Some(parent) = node.parent() else {
		return false;
	};

	if !matches!(parent.kind(), NodeKind::ExceptionBlock) {
		return false;
	}

	let mut children = parent.children().skip_while(|child| *child != node);

	children.next();

	children.next().is_some_and(|next| matches!(next.kind(), NodeKind::Handler))
}

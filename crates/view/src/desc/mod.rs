//! The view tree: one view node per rendered document node.
//!
//! View nodes live in a [`Slab`] owned by the [`ViewTree`]. Children are held
//! as ids and parents are plain id back-references, so dropping a subtree is a
//! matter of removing its ids. Every native node a view creates carries a
//! [`ViewRef`] back to it, which is how native selection coordinates find
//! their way back into the tree.

use std::ops::Index;

use quire_dom::{DomId, RenderTarget, ViewRef};
use quire_model::Node;
use slab::Slab;
use tracing::trace;

use crate::render::{Rendered, render_node};

mod position;
mod reconcile;

#[cfg(test)]
mod tests;

pub use reconcile::ReconcileStats;

/// Handle to a view node inside a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

impl From<ViewId> for ViewRef {
	fn from(id: ViewId) -> Self {
		ViewRef(id.0)
	}
}

/// A document node paired with the native nodes rendering it.
#[derive(Debug, Clone)]
pub struct ViewNode {
	node: Node,
	dom: DomId,
	content_dom: Option<DomId>,
	parent: Option<ViewId>,
	children: Vec<ViewId>,
}

impl ViewNode {
	/// The document node currently represented.
	pub fn node(&self) -> &Node {
		&self.node
	}

	/// The outermost native node.
	pub fn dom(&self) -> DomId {
		self.dom
	}

	/// The native element receiving children, for containers.
	pub fn content_dom(&self) -> Option<DomId> {
		self.content_dom
	}

	/// The parent view, or `None` for the root.
	pub fn parent(&self) -> Option<ViewId> {
		self.parent
	}

	/// Child views, in document order.
	pub fn children(&self) -> &[ViewId] {
		&self.children
	}

	/// Boundary tokens on each side of the content: 1 for containers, else 0.
	pub fn border(&self) -> usize {
		usize::from(self.content_dom.is_some())
	}

	/// Size of the represented node.
	pub fn size(&self) -> usize {
		self.node.size()
	}

	/// Returns true for views rendering a text node.
	pub fn is_text(&self) -> bool {
		self.node.is_text()
	}
}

/// Arena of view nodes rooted at a mount element.
///
/// The root view represents the document itself and renders directly into
/// the mount element, which serves as both its element and its content slot.
/// The mount must be empty when the tree is created.
#[derive(Debug)]
pub struct ViewTree {
	nodes: Slab<ViewNode>,
	root: ViewId,
}

impl ViewTree {
	/// Renders `doc`'s children into `mount` and returns the tree.
	pub fn mount<T: RenderTarget + ?Sized>(target: &mut T, mount: DomId, doc: &Node) -> Self {
		let mut nodes = Slab::new();
		let root = ViewId(nodes.insert(ViewNode {
			node: doc.clone(),
			dom: mount,
			content_dom: Some(mount),
			parent: None,
			children: Vec::new(),
		}));
		target.set_view_ref(mount, Some(root.into()));

		let mut tree = Self { nodes, root };
		let mut stats = ReconcileStats::default();
		for child in doc.children() {
			let id = tree.build(target, child, root, &mut stats);
			target.append_child(mount, tree[id].dom);
			tree.nodes[root.0].children.push(id);
		}
		trace!(created = stats.created, "view.mount");
		tree
	}

	/// Removes every rendered child from the mount and clears its back-reference.
	pub fn unmount<T: RenderTarget + ?Sized>(mut self, target: &mut T) {
		let root = self.root;
		let mount = self[root].dom;
		let mut stats = ReconcileStats::default();
		for id in std::mem::take(&mut self.nodes[root.0].children) {
			target.remove_child(mount, self[id].dom);
			self.destroy(target, id, &mut stats);
		}
		target.set_view_ref(mount, None);
		trace!(destroyed = stats.destroyed, "view.unmount");
	}

	/// The root view.
	pub fn root(&self) -> ViewId {
		self.root
	}

	/// Returns the view for `id`, if it is live.
	pub fn get(&self, id: ViewId) -> Option<&ViewNode> {
		self.nodes.get(id.0)
	}

	/// Number of live views, the root included.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Returns true if the tree holds no views.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// The mount element.
	pub fn mount_dom(&self) -> DomId {
		self[self.root].dom
	}

	/// Returns the view owning `dom`, if it is one of this tree's native nodes.
	pub fn owner<T: RenderTarget + ?Sized>(&self, target: &T, dom: DomId) -> Option<ViewId> {
		let id = ViewId(target.view_ref(dom)?.0);
		let view = self.get(id)?;
		(view.dom == dom || view.content_dom == Some(dom)).then_some(id)
	}

	/// Renders `node` and its descendants as a new, detached subtree under `parent`.
	fn build<T: RenderTarget + ?Sized>(
		&mut self,
		target: &mut T,
		node: &Node,
		parent: ViewId,
		stats: &mut ReconcileStats,
	) -> ViewId {
		let Rendered { dom, content_dom } = render_node(target, node);
		let id = ViewId(self.nodes.insert(ViewNode {
			node: node.clone(),
			dom,
			content_dom,
			parent: Some(parent),
			children: Vec::new(),
		}));
		stats.created += 1;

		target.set_view_ref(dom, Some(id.into()));
		let Some(slot) = content_dom else {
			return id;
		};
		if slot != dom {
			target.set_view_ref(slot, Some(id.into()));
		}

		let mut children = Vec::with_capacity(node.child_count());
		for child in node.children() {
			let child_id = self.build(target, child, id, stats);
			target.append_child(slot, self[child_id].dom);
			children.push(child_id);
		}
		self.nodes[id.0].children = children;
		id
	}

	/// Drops the view subtree at `id` and releases its native nodes.
	///
	/// The caller detaches the view's element from its parent first.
	fn destroy<T: RenderTarget + ?Sized>(&mut self, target: &mut T, id: ViewId, stats: &mut ReconcileStats) {
		let view = self.nodes.remove(id.0);
		let mut stack = view.children;
		stats.destroyed += 1;
		while let Some(child) = stack.pop() {
			stack.extend(self.nodes.remove(child.0).children);
			stats.destroyed += 1;
		}
		target.release(view.dom);
	}
}

impl Index<ViewId> for ViewTree {
	type Output = ViewNode;

	fn index(&self, id: ViewId) -> &ViewNode {
		&self.nodes[id.0]
	}
}

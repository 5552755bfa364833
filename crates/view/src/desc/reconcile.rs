use quire_dom::RenderTarget;
use quire_model::Node;
use tracing::trace;

use super::{ViewId, ViewTree};

/// Counts of what one reconciliation pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
	/// Views kept in place.
	pub reused: usize,
	/// Views built, descendants included.
	pub created: usize,
	/// Views dropped, descendants included.
	pub destroyed: usize,
}

impl ViewTree {
	/// Brings the tree in line with `doc`, reusing views wherever possible.
	///
	/// The root always adopts the new document; only its descendants are
	/// subject to reuse checks.
	pub fn update<T: RenderTarget + ?Sized>(&mut self, target: &mut T, doc: &Node) -> ReconcileStats {
		let mut stats = ReconcileStats::default();
		let root = self.root;
		self.nodes[root.0].node = doc.clone();
		self.reconcile_children(target, root, &mut stats);
		trace!(
			reused = stats.reused,
			created = stats.created,
			destroyed = stats.destroyed,
			"view.update"
		);
		stats
	}

	/// Updates the view at `id` to represent `node`.
	///
	/// Returns false, without touching anything, when the view cannot be
	/// reused: text views only accept the identical node, other views a
	/// markup-equal one.
	fn update_view<T: RenderTarget + ?Sized>(
		&mut self,
		target: &mut T,
		id: ViewId,
		node: &Node,
		stats: &mut ReconcileStats,
	) -> bool {
		let current = &self[id].node;
		let reusable = if current.is_text() {
			current.ptr_eq(node)
		} else {
			current.same_markup(node)
		};
		if !reusable {
			return false;
		}

		self.nodes[id.0].node = node.clone();
		self.reconcile_children(target, id, stats);
		true
	}

	/// Matches the children of the view at `id` against its node's children,
	/// position by position.
	fn reconcile_children<T: RenderTarget + ?Sized>(&mut self, target: &mut T, id: ViewId, stats: &mut ReconcileStats) {
		let Some(slot) = self[id].content_dom else {
			return;
		};
		let node = self[id].node.clone();

		for (index, child) in node.children().iter().enumerate() {
			let existing = self[id].children.get(index).copied();
			if let Some(existing) = existing {
				if self.update_view(target, existing, child, stats) {
					stats.reused += 1;
					continue;
				}
			}

			let fresh = self.build(target, child, id, stats);
			let fresh_dom = self[fresh].dom;
			match existing {
				Some(old) => {
					target.replace_child(slot, fresh_dom, self[old].dom);
					self.destroy(target, old, stats);
					self.nodes[id.0].children[index] = fresh;
				}
				None => {
					target.append_child(slot, fresh_dom);
					self.nodes[id.0].children.push(fresh);
				}
			}
		}

		let keep = node.child_count().min(self[id].children.len());
		let surplus = self.nodes[id.0].children.split_off(keep);
		for old in surplus {
			target.remove_child(slot, self[old].dom);
			self.destroy(target, old, stats);
		}
	}
}

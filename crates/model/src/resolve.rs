use smallvec::SmallVec;

use crate::error::{ModelError, Result};
use crate::node::Node;

/// One level of a resolved position's path.
#[derive(Debug, Clone)]
struct Level {
	/// Node at this depth.
	node: Node,
	/// Index of the child the position points into (or before).
	index: usize,
	/// Absolute position where this node's content starts.
	start: usize,
}

/// A position together with the chain of nodes that contain it.
///
/// Depth 0 is the document. The deepest level is the position's parent: the
/// innermost node whose content the position points into. Text nodes are
/// never parents; a position inside a text run resolves to its textblock.
#[derive(Debug, Clone)]
pub struct ResolvedPos {
	pos: usize,
	path: SmallVec<[Level; 4]>,
	parent_offset: usize,
}

impl ResolvedPos {
	/// Resolves `pos` within `doc`.
	pub fn resolve(doc: &Node, pos: usize) -> Result<Self> {
		let size = doc.content_size();
		if pos > size {
			return Err(ModelError::PositionOutOfRange { pos, size });
		}

		let mut path = SmallVec::new();
		let mut node = doc.clone();
		let mut start = 0;
		let mut parent_offset = pos;

		loop {
			let (index, offset) = find_index(&node, parent_offset);
			let rem = parent_offset - offset;
			path.push(Level {
				node: node.clone(),
				index,
				start,
			});
			if rem == 0 {
				break;
			}

			let child = node.child(index).clone();
			if child.is_leaf() {
				break;
			}
			start += offset + 1;
			parent_offset = rem - 1;
			node = child;
		}

		Ok(Self { pos, path, parent_offset })
	}

	/// The resolved position.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Depth of the parent node (0 for positions directly in the document).
	pub fn depth(&self) -> usize {
		self.path.len() - 1
	}

	/// Offset of the position within its parent's content.
	pub fn parent_offset(&self) -> usize {
		self.parent_offset
	}

	/// The innermost node containing the position.
	pub fn parent(&self) -> &Node {
		self.node(self.depth())
	}

	/// The ancestor at `depth`.
	pub fn node(&self, depth: usize) -> &Node {
		&self.path[depth].node
	}

	/// Index of the child the position points at within the ancestor at `depth`.
	pub fn index(&self, depth: usize) -> usize {
		self.path[depth].index
	}

	/// Start of the content of the ancestor at `depth`.
	pub fn start(&self, depth: usize) -> usize {
		self.path[depth].start
	}

	/// End of the content of the ancestor at `depth`.
	pub fn end(&self, depth: usize) -> usize {
		self.start(depth) + self.node(depth).content_size()
	}

	/// Position directly before the ancestor at `depth` (`depth >= 1`).
	pub fn before(&self, depth: usize) -> usize {
		debug_assert!(depth > 0, "the document has no position before it");
		self.start(depth) - 1
	}

	/// Position directly after the ancestor at `depth` (`depth >= 1`).
	pub fn after(&self, depth: usize) -> usize {
		self.end(depth) + 1
	}

	/// Returns true if the position sits inside a textblock.
	pub fn in_textblock(&self) -> bool {
		self.parent().is_textblock()
	}
}

/// Finds the child containing `offset` and the offset where that child starts.
///
/// Returns `(child_count, content_size)` for an offset at the very end.
fn find_index(node: &Node, offset: usize) -> (usize, usize) {
	let mut cur = 0;
	for (i, child) in node.children().iter().enumerate() {
		let end = cur + child.size();
		if end > offset {
			return (i, cur);
		}
		cur = end;
	}
	(node.child_count(), cur)
}

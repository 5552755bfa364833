use quire_dom::{DomId, NativePoint, RenderTarget};

use super::{ViewId, ViewTree};
use crate::error::{Result, ViewError};

impl ViewTree {
	/// Maps a document position to a native coordinate.
	///
	/// At a boundary between two children the earlier child wins when
	/// `prefer_before` is set, the later one otherwise. The last child always
	/// takes a position at the very end of its parent, and a position at the
	/// inner end of a container always resolves inside it.
	pub fn locate(&self, pos: usize, prefer_before: bool) -> Result<NativePoint> {
		self.locate_in(self.root, pos, prefer_before)
	}

	fn locate_in(&self, id: ViewId, pos: usize, prefer_before: bool) -> Result<NativePoint> {
		let view = &self[id];
		let Some(slot) = view.content_dom else {
			return Ok(NativePoint::new(view.dom, pos));
		};
		if view.children.is_empty() {
			return self.check_range(pos, view.node.content_size()).map(|()| NativePoint::new(slot, pos));
		}

		let count = view.children.len();
		let mut offset = 0;
		for (index, &child_id) in view.children.iter().enumerate() {
			let child = &self[child_id];
			let start = offset + child.border();
			let end = offset + child.size() - child.border();
			let last = index + 1 == count;
			if pos < end || (pos == end && (prefer_before || last || child.border() > 0)) {
				if !child.is_text() && child.content_dom.is_none() {
					return Ok(NativePoint::new(slot, index + usize::from(pos > offset)));
				}
				if pos < start {
					return Ok(NativePoint::new(slot, index));
				}
				return self.locate_in(child_id, pos - start, prefer_before);
			}
			offset += child.size();
		}

		self.check_range(pos, offset).map(|()| NativePoint::new(slot, count))
	}

	fn check_range(&self, pos: usize, size: usize) -> Result<()> {
		if pos <= size {
			Ok(())
		} else {
			Err(ViewError::PositionOutOfRange {
				pos,
				size: self[self.root].node.content_size(),
			})
		}
	}

	/// Maps a native coordinate back to a document position.
	///
	/// Offsets into text count characters. Offsets into a content slot that
	/// has children count child nodes and map to the start of that child.
	/// A native node with no owning view inside this tree resolves through its
	/// nearest owned ancestor, at the start of that view's content.
	pub fn to_document_position<T: RenderTarget + ?Sized>(&self, target: &T, point: NativePoint) -> Result<usize> {
		if let Some(id) = self.owner(target, point.node) {
			return Ok(self.position_in(id, point.node, point.offset));
		}

		let mut current = point.node;
		while let Some(parent) = target.parent(current) {
			if let Some(id) = self.owner(target, parent) {
				return Ok(self.content_start(id));
			}
			current = parent;
		}
		Err(ViewError::UnownedNode(point.node))
	}

	fn position_in(&self, id: ViewId, dom: DomId, offset: usize) -> usize {
		let view = &self[id];
		let start = self.content_start(id);
		if view.is_text() {
			return start + offset.min(view.size());
		}
		match view.content_dom {
			Some(slot) if slot == dom => {
				if view.children.is_empty() {
					start + offset.min(view.node.content_size())
				} else {
					start + view.children.iter().take(offset).map(|&child| self[child].size()).sum::<usize>()
				}
			}
			// The outer element of a container with a nested slot.
			Some(_) => {
				if offset == 0 {
					start
				} else {
					start + view.node.content_size()
				}
			}
			None => start + usize::from(offset > 0),
		}
	}

	/// Document position where the content of the view at `id` starts.
	///
	/// For leaf views this is the position just before the leaf.
	pub fn content_start(&self, id: ViewId) -> usize {
		let view = &self[id];
		let Some(parent) = view.parent else {
			return 0;
		};
		let preceding: usize = self[parent]
			.children
			.iter()
			.take_while(|&&sibling| sibling != id)
			.map(|&sibling| self[sibling].size())
			.sum();
		self.content_start(parent) + preceding + view.border()
	}
}

use crate::node::Node;


/// Selection direction (anchor to head).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Head is at or after anchor.
	Forward,
	/// Head is before anchor.
	Backward,
}

/// A document selection defined by anchor and head positions.
///
/// The anchor is where the selection started and the head is the active end.
/// Equality is structural: two selections are equal when both endpoints are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
	/// The fixed end of the selection.
	pub anchor: usize,
	/// The moving end of the selection.
	pub head: usize,
}

impl Selection {
	/// Creates a selection from anchor to head.
	pub fn new(anchor: usize, head: usize) -> Self {
		Self { anchor, head }
	}

	/// Creates a collapsed selection at `pos`.
	pub fn cursor(pos: usize) -> Self {
		Self::new(pos, pos)
	}

	/// Returns a cursor at the first position inside a textblock, or 0.
	pub fn at_start(doc: &Node) -> Self {
		Self::cursor(first_text_position(doc, 0).unwrap_or(0))
	}

	/// Returns the smaller endpoint.
	#[inline]
	pub fn from(&self) -> usize {
		self.anchor.min(self.head)
	}

	/// Returns the larger endpoint.
	#[inline]
	pub fn to(&self) -> usize {
		self.anchor.max(self.head)
	}

	/// Returns true if anchor equals head.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.anchor == self.head
	}

	/// Returns the direction of this selection.
	#[inline]
	pub fn direction(&self) -> Direction {
		if self.head < self.anchor {
			Direction::Backward
		} else {
			Direction::Forward
		}
	}

	/// Returns a new selection with anchor and head swapped.
	pub fn flip(&self) -> Self {
		Self::new(self.head, self.anchor)
	}

	/// Applies a function to both endpoints.
	pub fn map(self, mut f: impl FnMut(usize) -> usize) -> Self {
		Self::new(f(self.anchor), f(self.head))
	}

	/// Returns true if both endpoints fit in a document with `content_size`.
	pub fn is_in_bounds(&self, content_size: usize) -> bool {
		self.anchor <= content_size && self.head <= content_size
	}
}

/// Finds the content start of the first textblock at or below `node`.
fn first_text_position(node: &Node, content_start: usize) -> Option<usize> {
	if node.is_textblock() {
		return Some(content_start);
	}
	let mut pos = content_start;
	for child in node.children() {
		if !child.is_leaf()
			&& let Some(found) = first_text_position(child, pos + 1)
		{
			return Some(found);
		}
		pos += child.size();
	}
	None
}

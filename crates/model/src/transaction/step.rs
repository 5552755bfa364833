use std::cmp::Ordering;
use std::ops::Range;

use crate::error::{ModelError, Result};
use crate::node::build::text_run;
use crate::node::{Node, NodeType};
use crate::resolve::ResolvedPos;

/// Bias determines how positions at change boundaries are mapped.
///
/// When mapping a position through a change, bias determines whether the
/// position moves with content inserted at exactly that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bias {
	/// Position stays before insertions at the same location.
	Left,
	/// Position moves after insertions at the same location.
	Right,
}

/// A single atomic document change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
	/// Insert text at a position inside a textblock.
	InsertText {
		/// Insertion point.
		pos: usize,
		/// Inserted text.
		text: String,
	},
	/// Delete the content between two positions inside one textblock, or the
	/// whole children between two boundaries of one container, joining
	/// textblocks when the range spans sibling blocks.
	Delete {
		/// Start of the range.
		from: usize,
		/// End of the range.
		to: usize,
	},
	/// Split the textblock around a position into two blocks.
	Split {
		/// Split point.
		pos: usize,
	},
	/// Insert an empty paragraph at a position between blocks.
	InsertParagraph {
		/// Insertion point.
		pos: usize,
	},
}

impl Step {
	/// Applies this step to `doc`, returning the new document.
	///
	/// Subtrees outside the changed region are shared with `doc`.
	pub fn apply(&self, doc: &Node) -> Result<Node> {
		match self {
			Self::InsertText { pos, text } => insert_text(doc, *pos, text),
			Self::Delete { from, to } => delete(doc, *from, *to),
			Self::Split { pos } => split(doc, *pos),
			Self::InsertParagraph { pos } => insert_paragraph(doc, *pos),
		}
	}

	/// Maps a position in the document before this step to the document after it.
	///
	/// A right-biased position at an inserted paragraph lands inside it.
	pub fn map(&self, pos: usize, bias: Bias) -> usize {
		match self {
			Self::InsertText { pos: at, text } => shift_after(pos, *at, text.chars().count(), bias),
			Self::Split { pos: at } => shift_after(pos, *at, 2, bias),
			Self::InsertParagraph { pos: at } => match pos.cmp(at) {
				Ordering::Less => pos,
				Ordering::Equal if bias == Bias::Left => pos,
				Ordering::Equal => pos + 1,
				Ordering::Greater => pos + 2,
			},
			Self::Delete { from, to } => {
				if pos <= *from {
					pos
				} else if pos >= *to {
					pos - (to - from)
				} else {
					*from
				}
			}
		}
	}
}

fn shift_after(pos: usize, at: usize, len: usize, bias: Bias) -> usize {
	if pos > at || (pos == at && bias == Bias::Right) {
		pos + len
	} else {
		pos
	}
}

fn insert_text(doc: &Node, pos: usize, text: &str) -> Result<Node> {
	let rpos = ResolvedPos::resolve(doc, pos)?;
	if !rpos.in_textblock() {
		return Err(ModelError::NotInTextblock(pos));
	}

	let block = rpos.parent();
	let mut content = block.text_content();
	content.insert_str(byte_offset(&content, rpos.parent_offset()), text);
	Ok(replace_node(&rpos, rpos.depth(), vec![block.copy_with(text_run(&content))]))
}

fn delete(doc: &Node, from: usize, to: usize) -> Result<Node> {
	if from > to {
		return Err(ModelError::InvalidRange { from, to });
	}
	if from == to {
		return Ok(doc.clone());
	}

	let start = ResolvedPos::resolve(doc, from)?;
	let end = ResolvedPos::resolve(doc, to)?;
	let depth = start.depth();

	if depth == end.depth() && start.start(depth) == end.start(depth) {
		let parent = start.parent();
		if !parent.is_textblock() {
			// Both ends sit on child boundaries of the same container.
			return Ok(replace_children(&start, depth, start.index(depth)..end.index(depth), Vec::new()));
		}

		let content = parent.text_content();
		let kept = cut(&content, start.parent_offset(), end.parent_offset());
		return Ok(replace_node(&start, depth, vec![parent.copy_with(text_run(&kept))]));
	}

	let siblings = depth == end.depth() && depth > 0 && start.start(depth - 1) == end.start(depth - 1);
	if siblings && start.in_textblock() && end.in_textblock() {
		let head = start.parent().text_content();
		let tail = end.parent().text_content();
		let mut joined = head[..byte_offset(&head, start.parent_offset())].to_owned();
		joined.push_str(&tail[byte_offset(&tail, end.parent_offset())..]);

		let merged = start.parent().copy_with(text_run(&joined));
		let range = start.index(depth - 1)..end.index(depth - 1) + 1;
		return Ok(replace_children(&start, depth - 1, range, vec![merged]));
	}

	Err(ModelError::UnsupportedDelete { from, to })
}

/// Breaks `from..to` into ranges a single [`Step::Delete`] can remove.
///
/// Each range lies inside one textblock, spans whole children of one
/// container, or joins two sibling textblocks. An endpoint between blocks
/// next to an endpoint inside a block is clamped to that block's edge, and
/// blocks wholly inside the range are removed. Ranges come out in document
/// order and do not overlap, so applying them last to first keeps every
/// position valid.
pub(super) fn plan_delete(doc: &Node, from: usize, to: usize, out: &mut Vec<Range<usize>>) -> Result<()> {
	if from >= to {
		return Ok(());
	}

	let start = ResolvedPos::resolve(doc, from)?;
	let end = ResolvedPos::resolve(doc, to)?;
	let shared = shared_depth(&start, &end);
	let (start_depth, end_depth) = (start.depth(), end.depth());

	let direct = start_depth == shared && end_depth == shared;
	let join = start_depth == shared + 1 && end_depth == shared + 1 && start.in_textblock() && end.in_textblock();
	if direct || join {
		out.push(from..to);
		return Ok(());
	}

	let mut middle = from..to;
	if start_depth > shared {
		plan_delete(doc, from, start.end(shared + 1), out)?;
		middle.start = start.after(shared + 1);
	}
	if end_depth > shared {
		middle.end = end.before(shared + 1);
	}
	if middle.start < middle.end {
		out.push(middle);
	}
	if end_depth > shared {
		plan_delete(doc, end.start(shared + 1), to, out)?;
	}
	Ok(())
}

/// Depth of the deepest node holding both positions.
fn shared_depth(a: &ResolvedPos, b: &ResolvedPos) -> usize {
	let mut depth = a.depth().min(b.depth());
	while depth > 0 && a.start(depth) != b.start(depth) {
		depth -= 1;
	}
	depth
}

/// Returns true if `pos` sits in a container without children.
pub(super) fn in_empty_container(doc: &Node, pos: usize) -> Result<bool> {
	let rpos = ResolvedPos::resolve(doc, pos)?;
	Ok(!rpos.in_textblock() && rpos.parent().child_count() == 0)
}

/// The nearest position where text can go for `pos`, if there is one.
///
/// Inside a textblock that is `pos` itself. Between blocks it is the start of
/// the following textblock, else the end of the preceding one.
pub(super) fn text_point(doc: &Node, pos: usize) -> Result<Option<usize>> {
	let rpos = ResolvedPos::resolve(doc, pos)?;
	if rpos.in_textblock() {
		return Ok(Some(pos));
	}

	let parent = rpos.parent();
	let index = rpos.index(rpos.depth());
	if parent.maybe_child(index).is_some_and(Node::is_textblock) {
		return Ok(Some(pos + 1));
	}
	if index > 0 && parent.child(index - 1).is_textblock() {
		return Ok(Some(pos - 1));
	}
	Ok(None)
}

fn insert_paragraph(doc: &Node, pos: usize) -> Result<Node> {
	let rpos = ResolvedPos::resolve(doc, pos)?;
	if rpos.in_textblock() {
		return Err(ModelError::NotBetweenBlocks(pos));
	}

	let depth = rpos.depth();
	let index = rpos.index(depth);
	let paragraph = Node::new(NodeType::Paragraph, Vec::new());
	Ok(replace_children(&rpos, depth, index..index, vec![paragraph]))
}

fn split(doc: &Node, pos: usize) -> Result<Node> {
	let rpos = ResolvedPos::resolve(doc, pos)?;
	if !rpos.in_textblock() || rpos.depth() == 0 {
		return Err(ModelError::NotInTextblock(pos));
	}

	let block = rpos.parent();
	let content = block.text_content();
	let at = byte_offset(&content, rpos.parent_offset());

	// Breaking out at the end of a heading continues with a paragraph.
	let at_end = rpos.parent_offset() == block.content_size();
	let tail_type = match block.node_type() {
		NodeType::Heading { .. } if at_end => NodeType::Paragraph,
		ty => ty,
	};

	let first = block.copy_with(text_run(&content[..at]));
	let second = Node::new(tail_type, text_run(&content[at..]));
	Ok(replace_node(&rpos, rpos.depth(), vec![first, second]))
}

/// Replaces the ancestor at `depth` (>= 1) with `with`, rebuilding its ancestors.
fn replace_node(rpos: &ResolvedPos, depth: usize, with: Vec<Node>) -> Node {
	let index = rpos.index(depth - 1);
	replace_children(rpos, depth - 1, index..index + 1, with)
}

/// Splices `with` into the children of the ancestor at `depth` and rebuilds
/// the chain of ancestors above it.
fn replace_children(rpos: &ResolvedPos, depth: usize, range: Range<usize>, with: Vec<Node>) -> Node {
	let parent = rpos.node(depth);
	let mut children = parent.children().to_vec();
	children.splice(range, with);
	let mut node = parent.copy_with(children);

	for d in (0..depth).rev() {
		let ancestor = rpos.node(d);
		let mut children = ancestor.children().to_vec();
		children[rpos.index(d)] = node;
		node = ancestor.copy_with(children);
	}
	node
}

/// Removes chars `from..to` from `text`.
fn cut(text: &str, from: usize, to: usize) -> String {
	let mut out = text[..byte_offset(text, from)].to_owned();
	out.push_str(&text[byte_offset(text, to)..]);
	out
}

/// Converts a char offset into a byte offset.
fn byte_offset(text: &str, chars: usize) -> usize {
	text.char_indices().nth(chars).map_or(text.len(), |(idx, _)| idx)
}

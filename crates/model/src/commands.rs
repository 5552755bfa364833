//! Editing commands.
//!
//! A command inspects a state and returns the transaction that performs it,
//! or `None` when it does not apply at the current selection.

use crate::error::Result;
use crate::node::NodeType;
use crate::selection::Selection;
use crate::state::EditorState;
use crate::transaction::Transaction;

/// Deletes the selected range, if the selection is not collapsed.
///
/// The cursor ends up where the range started.
pub fn delete_selection(state: &EditorState) -> Result<Option<Transaction>> {
	let selection = state.selection();
	if selection.is_empty() {
		return Ok(None);
	}
	let mut tr = state.tr();
	tr.set_selection(Selection::cursor(selection.from()));
	tr.delete(selection.from(), selection.to())?;
	Ok(Some(tr))
}

/// Splits the textblock at the cursor, deleting any selected content first.
///
/// The cursor ends up at the start of the new block.
pub fn split_block(state: &EditorState) -> Result<Option<Transaction>> {
	let selection = state.selection();
	let rpos = state.resolve(selection.from())?;
	if !rpos.in_textblock() || rpos.depth() == 0 {
		return Ok(None);
	}

	let mut tr = state.tr();
	tr.set_selection(Selection::cursor(selection.from()));
	tr.delete(selection.from(), selection.to())?;
	tr.split(selection.from())?;
	Ok(Some(tr))
}

/// Joins the textblock holding a cursor at its start with the block before it.
///
/// A preceding textblock is merged with the current one; a preceding leaf
/// block is removed. Nothing happens at the start of a container.
pub fn join_backward(state: &EditorState) -> Result<Option<Transaction>> {
	let selection = state.selection();
	if !selection.is_empty() {
		return Ok(None);
	}

	let rpos = state.resolve(selection.head)?;
	let depth = rpos.depth();
	if !rpos.in_textblock() || rpos.parent_offset() > 0 || depth == 0 {
		return Ok(None);
	}

	let index = rpos.index(depth - 1);
	let Some(before) = index.checked_sub(1).map(|i| rpos.node(depth - 1).child(i)) else {
		return Ok(None);
	};

	let block_start = rpos.before(depth);
	let mut tr = state.tr();
	match before.node_type() {
		ty if ty.is_textblock() => {
			tr.delete(block_start - 1, block_start + 1)?;
		}
		NodeType::HorizontalRule => {
			tr.delete(block_start - before.size(), block_start)?;
		}
		_ => return Ok(None),
	}
	Ok(Some(tr))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::node::build::{blockquote, doc, heading, hr, p, p_text, text};

	fn state(doc: crate::Node, selection: Selection) -> EditorState {
		EditorState::with_selection(doc, selection).unwrap()
	}

	fn run(state: &EditorState, command: fn(&EditorState) -> Result<Option<Transaction>>) -> EditorState {
		let tr = command(state).unwrap().expect("command should apply");
		state.apply(&tr).unwrap()
	}

	#[test]
	fn split_block_in_middle_of_text() {
		let before = state(doc([p_text("Hello")]), Selection::cursor(3));
		let after = run(&before, split_block);
		assert_eq!(after.doc(), &doc([p_text("He"), p_text("llo")]));
		assert_eq!(after.selection(), Selection::cursor(5));
	}

	#[test]
	fn split_block_replaces_selection() {
		let before = state(doc([p_text("Hello")]), Selection::new(2, 4));
		let after = run(&before, split_block);
		assert_eq!(after.doc(), &doc([p_text("H"), p_text("lo")]));
		assert_eq!(after.selection(), Selection::cursor(4));
	}

	#[test]
	fn split_block_at_heading_end_continues_with_paragraph() {
		let before = state(doc([heading(1, [text("Title")])]), Selection::cursor(6));
		let after = run(&before, split_block);
		assert_eq!(after.doc(), &doc([heading(1, [text("Title")]), p_text("")]));
		assert_eq!(after.selection(), Selection::cursor(8));
	}

	#[test]
	fn split_block_outside_textblock_does_not_apply() {
		let before = state(doc([hr(), p_text("x")]), Selection::cursor(0));
		assert!(split_block(&before).unwrap().is_none());
	}

	#[test]
	fn join_backward_merges_paragraphs() {
		let before = state(doc([p_text("Hi"), p_text("Yo")]), Selection::cursor(5));
		let after = run(&before, join_backward);
		assert_eq!(after.doc(), &doc([p_text("HiYo")]));
		assert_eq!(after.selection(), Selection::cursor(3));
	}

	#[test]
	fn join_backward_removes_preceding_rule() {
		let before = state(doc([hr(), p_text("x")]), Selection::cursor(2));
		let after = run(&before, join_backward);
		assert_eq!(after.doc(), &doc([p_text("x")]));
		assert_eq!(after.selection(), Selection::cursor(1));
	}

	#[test]
	fn join_backward_needs_cursor_at_block_start() {
		let mid = state(doc([p_text("Hi"), p_text("Yo")]), Selection::cursor(6));
		assert!(join_backward(&mid).unwrap().is_none());

		let first = state(doc([p_text("Hi")]), Selection::cursor(1));
		assert!(join_backward(&first).unwrap().is_none());

		let quoted = state(doc([blockquote([p_text("q")])]), Selection::cursor(2));
		assert!(join_backward(&quoted).unwrap().is_none());
	}

	#[test]
	fn delete_selection_ignores_cursor() {
		let cursor = state(doc([p_text("Hi")]), Selection::cursor(2));
		assert!(delete_selection(&cursor).unwrap().is_none());

		let range = state(doc([p_text("Hello")]), Selection::new(4, 2));
		let after = run(&range, delete_selection);
		assert_eq!(after.doc(), &doc([p_text("Hlo")]));
		assert_eq!(after.selection(), Selection::cursor(2));
	}

	#[test]
	fn delete_selection_over_every_block_leaves_an_empty_paragraph() {
		let all = state(doc([p_text("Hi"), hr()]), Selection::new(0, 5));
		let after = run(&all, delete_selection);
		assert_eq!(after.doc(), &doc([p([])]));
		assert_eq!(after.selection(), Selection::cursor(1));
	}

	#[test]
	fn delete_selection_ending_between_blocks_collapses() {
		let range = state(doc([p_text("Hello"), p_text("World")]), Selection::new(3, 7));
		let after = run(&range, delete_selection);
		assert_eq!(after.doc(), &doc([p_text("He"), p_text("World")]));
		assert_eq!(after.selection(), Selection::cursor(3));
	}

	#[test]
	fn split_block_over_a_block_boundary() {
		let before = state(doc([p_text("Hello"), p_text("World")]), Selection::new(3, 7));
		let after = run(&before, split_block);
		assert_eq!(after.doc(), &doc([p_text("He"), p_text(""), p_text("World")]));
		assert_eq!(after.selection(), Selection::cursor(5));
	}
}

//! Turns before-input notifications into transactions.

use quire_dom::{InputEvent, InputIntent, NativePoint, RenderTarget, StaticRange};
use quire_model::{EditorState, Selection, Transaction, commands};
use tracing::{debug, warn};

use crate::desc::ViewTree;
use crate::error::Result;

/// What the view did with a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputOutcome {
	/// The platform's own handling of the notification must be suppressed.
	pub prevent_default: bool,
	/// A transaction was dispatched.
	pub dispatched: bool,
}

impl InputOutcome {
	pub(crate) fn handled(dispatched: bool) -> Self {
		Self {
			prevent_default: true,
			dispatched,
		}
	}

	pub(crate) fn passed(dispatched: bool) -> Self {
		Self {
			prevent_default: false,
			dispatched,
		}
	}
}

/// Builds the transaction an input asks for, if any.
pub(crate) fn transaction_for<T: RenderTarget + ?Sized>(
	state: &EditorState,
	tree: &ViewTree,
	target: &T,
	event: &InputEvent,
) -> Result<Option<Transaction>> {
	let tr = match &event.intent {
		InputIntent::InsertText => insert_text(state, event.data.as_deref())?,
		InputIntent::InsertParagraph => commands::split_block(state)?,
		InputIntent::DeleteContentBackward => delete_backward(state, tree, target, event.target_range)?,
		InputIntent::Other(name) => {
			debug!(input_type = %name, "input.ignored");
			None
		}
	};
	Ok(tr)
}

fn insert_text(state: &EditorState, data: Option<&str>) -> Result<Option<Transaction>> {
	let Some(text) = data.filter(|text| !text.is_empty()) else {
		return Ok(None);
	};
	let selection = state.selection();
	let mut tr = state.tr();
	tr.replace_with_text(selection.from(), selection.to(), text)?;
	Ok(Some(tr))
}

/// Deletes backward from the selection.
///
/// Inside text the character before a collapsed cursor goes. Elsewhere the
/// platform's target range decides the span; without one the selection is
/// deleted, or a cursor at the start of a block joins it with the block
/// before.
fn delete_backward<T: RenderTarget + ?Sized>(
	state: &EditorState,
	tree: &ViewTree,
	target: &T,
	range: Option<StaticRange>,
) -> Result<Option<Transaction>> {
	let selection = state.selection();
	if selection.is_empty() {
		let rpos = state.resolve(selection.head)?;
		if rpos.in_textblock() && rpos.parent_offset() > 0 {
			let mut tr = state.tr();
			tr.delete(selection.head - 1, selection.head)?;
			return Ok(Some(tr));
		}
	}

	if let Some((from, to)) = range.and_then(|range| target_span(tree, target, range)) {
		if from < to {
			let mut tr = state.tr();
			tr.set_selection(Selection::cursor(from));
			tr.delete(from, to)?;
			return Ok(Some(tr));
		}
	}

	if selection.is_empty() {
		Ok(commands::join_backward(state)?)
	} else {
		Ok(commands::delete_selection(state)?)
	}
}

/// Document span of a native target range, ordered.
fn target_span<T: RenderTarget + ?Sized>(tree: &ViewTree, target: &T, range: StaticRange) -> Option<(usize, usize)> {
	let resolve = |point: NativePoint| tree.to_document_position(target, point);
	match (resolve(range.start), resolve(range.end)) {
		(Ok(start), Ok(end)) => Some((start.min(end), start.max(end))),
		(Err(err), _) | (_, Err(err)) => {
			warn!(%err, "input.target_range_unresolved");
			None
		}
	}
}

//! Native selection synchronization.
//!
//! Pushing writes the document selection into the native selection; pulling
//! reads the native selection back as document positions. A push pauses the
//! selection-change listener so the write does not come back as a pull.

use std::ops::{Deref, DerefMut};

use quire_dom::{NativePoint, RenderTarget, SelectionSubstrate};
use quire_model::{Direction, Selection};
use tracing::trace;

use crate::desc::ViewTree;
use crate::error::Result;

/// Detaches the selection-change listener until dropped.
///
/// Derefs to the target so writes go through the guard. The listener is
/// reattached on drop only if it was attached when the guard was taken.
pub(crate) struct ListenerPause<'a, T: SelectionSubstrate + ?Sized> {
	target: &'a mut T,
	resume: bool,
}

impl<'a, T: SelectionSubstrate + ?Sized> ListenerPause<'a, T> {
	pub(crate) fn new(target: &'a mut T) -> Self {
		let resume = target.is_listening_selection();
		if resume {
			target.listen_selection(false);
		}
		Self { target, resume }
	}
}

impl<T: SelectionSubstrate + ?Sized> Deref for ListenerPause<'_, T> {
	type Target = T;

	fn deref(&self) -> &T {
		self.target
	}
}

impl<T: SelectionSubstrate + ?Sized> DerefMut for ListenerPause<'_, T> {
	fn deref_mut(&mut self) -> &mut T {
		self.target
	}
}

impl<T: SelectionSubstrate + ?Sized> Drop for ListenerPause<'_, T> {
	fn drop(&mut self) {
		if self.resume {
			self.target.listen_selection(true);
		}
	}
}

/// Native coordinates for both ends of `selection`, resolved toward its inside.
pub(crate) fn native_endpoints(tree: &ViewTree, selection: Selection) -> Result<(NativePoint, NativePoint)> {
	let (anchor_before, head_before) = if selection.is_empty() {
		(true, true)
	} else {
		match selection.direction() {
			Direction::Forward => (false, true),
			Direction::Backward => (true, false),
		}
	};
	let anchor = tree.locate(selection.anchor, anchor_before)?;
	let head = tree.locate(selection.head, head_before)?;
	Ok((anchor, head))
}

/// Writes `selection` to the native selection with the listener paused.
pub(crate) fn push<T>(tree: &ViewTree, target: &mut T, selection: Selection) -> Result<()>
where
	T: SelectionSubstrate + ?Sized,
{
	let (anchor, head) = native_endpoints(tree, selection)?;
	let mut target = ListenerPause::new(target);
	target.set_selection(anchor, head);
	trace!(?selection, ?anchor, ?head, "selection.push");
	Ok(())
}

/// Reads the native selection as a document selection.
///
/// Returns `None` when there is no native selection.
pub(crate) fn read<T>(tree: &ViewTree, target: &T) -> Result<Option<Selection>>
where
	T: RenderTarget + SelectionSubstrate + ?Sized,
{
	let Some(native) = target.selection() else {
		return Ok(None);
	};
	let anchor = tree.to_document_position(target, native.anchor)?;
	let head = tree.to_document_position(target, native.focus)?;
	Ok(Some(Selection::new(anchor, head)))
}

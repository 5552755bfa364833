use tracing::trace;

use crate::error::{ModelError, Result};
use crate::node::Node;
use crate::resolve::ResolvedPos;
use crate::selection::Selection;
use crate::transaction::Transaction;

/// An immutable snapshot of a document and its selection.
///
/// `version` increases by one for every applied transaction that changed the
/// document.
#[derive(Debug, Clone)]
pub struct EditorState {
	doc: Node,
	selection: Selection,
	version: u64,
}

impl EditorState {
	/// Creates a state with the cursor at the start of the document.
	pub fn create(doc: Node) -> Self {
		let selection = Selection::at_start(&doc);
		Self {
			doc,
			selection,
			version: 0,
		}
	}

	/// Creates a state with an explicit selection.
	pub fn with_selection(doc: Node, selection: Selection) -> Result<Self> {
		check_selection(&doc, selection)?;
		Ok(Self {
			doc,
			selection,
			version: 0,
		})
	}

	/// The current document.
	pub fn doc(&self) -> &Node {
		&self.doc
	}

	/// The current selection.
	pub fn selection(&self) -> Selection {
		self.selection
	}

	/// Number of document-changing transactions applied so far.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Starts a transaction against this state's document.
	pub fn tr(&self) -> Transaction {
		Transaction::new(self.doc.clone())
	}

	/// Resolves `pos` in the current document.
	pub fn resolve(&self, pos: usize) -> Result<ResolvedPos> {
		ResolvedPos::resolve(&self.doc, pos)
	}

	/// Applies `tr`, producing the next state.
	///
	/// The new selection is the transaction's explicit selection, or the
	/// current selection mapped through its steps.
	pub fn apply(&self, tr: &Transaction) -> Result<EditorState> {
		if !tr.before().ptr_eq(&self.doc) {
			return Err(ModelError::StaleTransaction);
		}

		let doc = tr.doc().clone();
		let selection = tr.selection().unwrap_or_else(|| tr.map_selection(self.selection));
		check_selection(&doc, selection)?;

		let version = if tr.doc_changed() { self.version + 1 } else { self.version };
		trace!(steps = tr.steps().len(), version, ?selection, "state.apply");
		Ok(Self { doc, selection, version })
	}
}

fn check_selection(doc: &Node, selection: Selection) -> Result<()> {
	let size = doc.content_size();
	if selection.is_in_bounds(size) {
		Ok(())
	} else {
		Err(ModelError::SelectionOutOfRange {
			anchor: selection.anchor,
			head: selection.head,
			size,
		})
	}
}

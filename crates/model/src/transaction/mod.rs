//! Document transactions.
//!
//! A [`Transaction`] accumulates [`Step`]s against a starting document and
//! applies each one eagerly, so [`Transaction::doc`] is always the document
//! the next step will see. Positions passed to builder methods are therefore
//! in the coordinates of the current (partially transformed) document.

mod step;


pub use step::{Bias, Step};

use crate::error::{ModelError, Result};
use crate::node::Node;
use crate::selection::Selection;

/// A sequence of document steps plus an optional explicit selection.
#[derive(Debug, Clone)]
pub struct Transaction {
	before: Node,
	doc: Node,
	steps: Vec<Step>,
	selection: Option<Selection>,
}

impl Transaction {
	/// Starts an empty transaction against `doc`.
	pub fn new(doc: Node) -> Self {
		Self {
			before: doc.clone(),
			doc,
			steps: Vec::new(),
			selection: None,
		}
	}

	/// The document this transaction was started from.
	pub fn before(&self) -> &Node {
		&self.before
	}

	/// The document after all steps so far.
	pub fn doc(&self) -> &Node {
		&self.doc
	}

	/// The steps applied so far.
	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	/// Returns true if any step changed the document.
	pub fn doc_changed(&self) -> bool {
		!self.steps.is_empty()
	}

	/// Applies `step` and records it.
	///
	/// An explicitly set selection is mapped through the new step.
	pub fn step(&mut self, step: Step) -> Result<&mut Self> {
		self.doc = step.apply(&self.doc)?;
		if let Some(selection) = self.selection {
			self.selection = Some(selection.map(|pos| step.map(pos, Bias::Right)));
		}
		self.steps.push(step);
		Ok(self)
	}

	/// Inserts `text` at `pos`. Empty text is a no-op.
	///
	/// A position between blocks moves into the following textblock, else
	/// the preceding one. Without either, an empty paragraph is created there
	/// to hold the text.
	pub fn insert_text(&mut self, pos: usize, text: &str) -> Result<&mut Self> {
		self.insert_text_at(pos, text)?;
		Ok(self)
	}

	/// Inserts text and returns the position it went to.
	fn insert_text_at(&mut self, pos: usize, text: &str) -> Result<usize> {
		if text.is_empty() {
			return Ok(pos);
		}
		let at = match step::text_point(&self.doc, pos)? {
			Some(at) => at,
			None => {
				self.step(Step::InsertParagraph { pos })?;
				pos + 1
			}
		};
		self.step(Step::InsertText {
			pos: at,
			text: text.to_owned(),
		})?;
		Ok(at)
	}

	/// Deletes `from..to`. An empty range is a no-op.
	///
	/// Blocks wholly inside the range go; blocks it cuts into keep their
	/// outer part, and sibling textblocks cut at both ends are joined. A
	/// container left without children gets an empty paragraph.
	pub fn delete(&mut self, from: usize, to: usize) -> Result<&mut Self> {
		if from > to {
			return Err(ModelError::InvalidRange { from, to });
		}
		if from == to {
			return Ok(self);
		}

		let mut ranges = Vec::new();
		step::plan_delete(&self.doc, from, to, &mut ranges)?;
		let removed: usize = ranges.iter().map(|range| range.len()).sum();
		for range in ranges.into_iter().rev() {
			self.step(Step::Delete {
				from: range.start,
				to: range.end,
			})?;
		}

		let end = to - removed;
		if end > from && step::in_empty_container(&self.doc, end)? {
			self.step(Step::InsertParagraph { pos: end })?;
		}
		if step::in_empty_container(&self.doc, from)? {
			self.step(Step::InsertParagraph { pos: from })?;
		}
		Ok(self)
	}

	/// Replaces `from..to` with `text` and puts the cursor after the text.
	///
	/// Empty text only deletes.
	pub fn replace_with_text(&mut self, from: usize, to: usize, text: &str) -> Result<&mut Self> {
		self.delete(from, to)?;
		if text.is_empty() {
			return Ok(self);
		}
		let at = self.insert_text_at(from, text)?;
		self.selection = Some(Selection::cursor(at + text.chars().count()));
		Ok(self)
	}

	/// Splits the textblock at `pos`.
	pub fn split(&mut self, pos: usize) -> Result<&mut Self> {
		self.step(Step::Split { pos })
	}

	/// Sets the selection the resulting state will carry.
	///
	/// The selection is given in the coordinates of the current document and
	/// is mapped through any steps added afterwards.
	pub fn set_selection(&mut self, selection: Selection) -> &mut Self {
		self.selection = Some(selection);
		self
	}

	/// The explicitly set selection, if any.
	pub fn selection(&self) -> Option<Selection> {
		self.selection
	}

	/// Returns true if [`Transaction::set_selection`] was called.
	pub fn is_selection_set(&self) -> bool {
		self.selection.is_some()
	}

	/// Maps a position from the starting document through every step.
	pub fn map(&self, pos: usize, bias: Bias) -> usize {
		self.steps.iter().fold(pos, |pos, step| step.map(pos, bias))
	}

	/// Maps a selection from the starting document through every step.
	pub fn map_selection(&self, selection: Selection) -> Selection {
		selection.map(|pos| self.map(pos, Bias::Right))
	}
}

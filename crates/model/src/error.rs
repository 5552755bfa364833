//! Error types for document model operations.

use thiserror::Error;

/// Errors raised when a position, range or step does not fit the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
	/// A position lies outside the document content.
	#[error("position {pos} out of range (content size {size})")]
	PositionOutOfRange {
		/// The offending position.
		pos: usize,
		/// Content size of the document.
		size: usize,
	},

	/// A range whose start lies after its end.
	#[error("invalid range {from}..{to}")]
	InvalidRange {
		/// Start of the range.
		from: usize,
		/// End of the range.
		to: usize,
	},

	/// A deletion that would cut through structure this model cannot rejoin.
	#[error("cannot delete {from}..{to}: range crosses unrelated blocks")]
	UnsupportedDelete {
		/// Start of the range.
		from: usize,
		/// End of the range.
		to: usize,
	},

	/// Text can only be inserted inside a textblock.
	#[error("position {0} is not inside a textblock")]
	NotInTextblock(usize),

	/// Blocks can only be inserted between other blocks.
	#[error("position {0} is not between blocks")]
	NotBetweenBlocks(usize),

	/// A transaction built against a different document than the state holds.
	#[error("transaction was built against a different document")]
	StaleTransaction,

	/// A selection endpoint outside the resulting document.
	#[error("selection {anchor}..{head} out of range (content size {size})")]
	SelectionOutOfRange {
		/// Selection anchor.
		anchor: usize,
		/// Selection head.
		head: usize,
		/// Content size of the document.
		size: usize,
	},
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

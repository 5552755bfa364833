//! Document model for quire: immutable nodes, positions, selections and
//! transactions.
//!
//! Positions address a flat coordinate space over the document. Every text
//! node contributes one unit per character, leaf blocks contribute one unit,
//! and every container contributes an opening and a closing token around its
//! content. The top-level [`NodeType::Doc`] is addressed by its content only,
//! so position `0` is the start of the document content.

/// Editing commands built on top of transactions.
pub mod commands;
/// Model error types.
pub mod error;
/// Document nodes and node types.
pub mod node;
/// Resolved positions.
pub mod resolve;
/// Anchor/head selections.
pub mod selection;
/// Editor state snapshots.
pub mod state;
/// Document transactions and steps.
pub mod transaction;

pub use error::{ModelError, Result};
pub use node::{Node, NodeType};
pub use resolve::ResolvedPos;
pub use selection::{Direction, Selection};
pub use state::EditorState;
pub use transaction::{Bias, Step, Transaction};

//! Error types for the editor view.

use quire_dom::DomId;
use quire_model::ModelError;
use thiserror::Error;

/// Errors raised while loading a [`ViewConfig`](crate::ViewConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The TOML source did not parse or did not match the schema.
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),

	/// An attribute name that the view manages itself.
	#[error("attribute '{0}' is reserved")]
	ReservedAttribute(String),
}

/// Errors raised by the view.
#[derive(Debug, Error)]
pub enum ViewError {
	/// The document model rejected an operation.
	#[error(transparent)]
	Model(#[from] ModelError),

	/// A native node that no view node inside this editor owns.
	#[error("native node {0:?} is not managed by this view")]
	UnownedNode(DomId),

	/// A document position outside the rendered tree.
	#[error("position {pos} out of range (content size {size})")]
	PositionOutOfRange {
		/// The offending position.
		pos: usize,
		/// Content size of the rendered document.
		size: usize,
	},

	/// Invalid configuration.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Result type for view operations.
pub type Result<T> = std::result::Result<T, ViewError>;

//! Keeps a native element tree in sync with an immutable document.
//!
//! [`EditorView`] owns a render target, a [`ViewTree`] mirroring the
//! document, and the current [`EditorState`](quire_model::EditorState). Each
//! state change reconciles the tree in place and then pushes the document
//! selection to the native selection. Native selection changes and
//! before-input notifications flow the other way, as transactions.

/// View configuration.
pub mod config;
/// View tree, reconciliation and position mapping.
pub mod desc;
/// View error types.
pub mod error;
/// Input intent dispatch.
mod input;
/// Node type rendering rules.
pub mod render;
/// Native selection synchronization.
mod selection;
/// The editor view.
pub mod view;

pub use config::ViewConfig;
pub use desc::{ReconcileStats, ViewId, ViewNode, ViewTree};
pub use error::{ConfigError, Result, ViewError};
pub use input::InputOutcome;
pub use render::{ContentHole, RenderSpec, Rendered, render_node, render_spec};
pub use view::EditorView;

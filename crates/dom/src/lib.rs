//! Native element tree, selection and input contracts consumed by the view.
//!
//! The view never talks to a concrete rendering surface. It is generic over
//! [`Target`], the union of [`RenderTarget`] (element tree manipulation),
//! [`SelectionSubstrate`] (native selection and its change listener) and
//! [`EventSource`] (queued notifications). [`MemoryDom`] implements all three
//! in memory and is what headless hosts and tests use.

/// Input and selection notifications.
pub mod event;
/// In-memory render target.
pub mod memory;
/// Contract traits and native coordinates.
pub mod target;

pub use event::{DomEvent, InputEvent, InputIntent, StaticRange};
pub use memory::MemoryDom;
pub use target::{DomId, EventSource, NativePoint, NativeSelection, RenderTarget, SelectionSubstrate, Target, ViewRef};

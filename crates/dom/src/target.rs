use crate::event::DomEvent;

/// Handle to a native node (element or text) owned by a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomId(pub usize);

/// Opaque back-reference from a native node to the view node that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewRef(pub usize);

/// A native selection coordinate.
///
/// For text nodes `offset` counts characters. For elements it counts child
/// nodes, as native selection APIs do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativePoint {
	/// The native node the coordinate is relative to.
	pub node: DomId,
	/// Offset within `node`.
	pub offset: usize,
}

impl NativePoint {
	/// Creates a coordinate.
	pub fn new(node: DomId, offset: usize) -> Self {
		Self { node, offset }
	}
}

/// A native selection: where it started and where its focus is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeSelection {
	/// The fixed end.
	pub anchor: NativePoint,
	/// The active end.
	pub focus: NativePoint,
}

/// Element tree primitives.
///
/// Mutating a handle that the target did not hand out, or that was released,
/// is a programmer error and implementations may panic. The read accessors
/// (`parent`, `children`, `view_ref`) answer empty for such handles, since
/// native selections can outlive the nodes they point into.
pub trait RenderTarget {
	/// Creates a detached element.
	fn create_element(&mut self, tag: &str) -> DomId;

	/// Creates a detached text node.
	fn create_text(&mut self, data: &str) -> DomId;

	/// Appends `child` as the last child of `parent`.
	fn append_child(&mut self, parent: DomId, child: DomId);

	/// Replaces `old` (a child of `parent`) with `new`, detaching `old`.
	fn replace_child(&mut self, parent: DomId, new: DomId, old: DomId);

	/// Detaches `child` from `parent`.
	fn remove_child(&mut self, parent: DomId, child: DomId);

	/// Frees a detached node and its descendants.
	fn release(&mut self, node: DomId);

	/// Returns the parent of `node`, if attached.
	fn parent(&self, node: DomId) -> Option<DomId>;

	/// Returns the children of `node` in order.
	fn children(&self, node: DomId) -> &[DomId];

	/// Sets an attribute on an element.
	fn set_attribute(&mut self, node: DomId, name: &str, value: &str);

	/// Removes an attribute from an element.
	fn remove_attribute(&mut self, node: DomId, name: &str);

	/// Sets the content-editable flag of an element.
	fn set_editable(&mut self, node: DomId, editable: bool);

	/// Stores (or clears) the owning view back-reference of a node.
	fn set_view_ref(&mut self, node: DomId, view: Option<ViewRef>);

	/// Returns the owning view back-reference of a node.
	fn view_ref(&self, node: DomId) -> Option<ViewRef>;
}

/// Native selection access and its change notification.
pub trait SelectionSubstrate {
	/// Returns the current native selection.
	fn selection(&self) -> Option<NativeSelection>;

	/// Sets the native selection.
	///
	/// Fires a selection-change notification while the listener is attached.
	fn set_selection(&mut self, anchor: NativePoint, focus: NativePoint);

	/// Attaches or detaches the selection-change listener.
	fn listen_selection(&mut self, listening: bool);

	/// Returns true while the selection-change listener is attached.
	fn is_listening_selection(&self) -> bool;
}

/// Source of queued notifications.
pub trait EventSource {
	/// Drains pending notifications in delivery order.
	fn take_events(&mut self) -> Vec<DomEvent>;
}

/// Everything the view needs from its rendering surface.
pub trait Target: RenderTarget + SelectionSubstrate + EventSource {}

impl<T: RenderTarget + SelectionSubstrate + EventSource> Target for T {}

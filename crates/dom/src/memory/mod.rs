use std::collections::BTreeMap;
use std::fmt::Write as _;

use slab::Slab;
use tracing::trace;

use crate::event::DomEvent;
use crate::target::{DomId, EventSource, NativePoint, NativeSelection, RenderTarget, SelectionSubstrate, ViewRef};


/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

#[derive(Debug, Clone)]
enum NodeData {
	Element {
		tag: String,
		attributes: BTreeMap<String, String>,
		editable: bool,
	},
	Text(String),
}

#[derive(Debug, Clone)]
struct MemoryNode {
	data: NodeData,
	parent: Option<DomId>,
	children: Vec<DomId>,
	view: Option<ViewRef>,
}

/// An in-memory render target with a native selection and an event queue.
///
/// Selection changes made while the listener is attached queue a
/// [`DomEvent::SelectionChange`]; hosts drain the queue through
/// [`EventSource::take_events`]. Every element tree, attribute and text
/// mutation is counted so callers can assert that an update touched nothing.
#[derive(Debug, Default)]
pub struct MemoryDom {
	nodes: Slab<MemoryNode>,
	selection: Option<NativeSelection>,
	listening: bool,
	events: Vec<DomEvent>,
	mutations: usize,
	selection_writes: usize,
}

impl MemoryDom {
	/// Creates an empty target.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if `node` has not been released.
	pub fn is_live(&self, node: DomId) -> bool {
		self.nodes.contains(node.0)
	}

	/// Number of live nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Tag name of an element.
	pub fn tag(&self, node: DomId) -> Option<&str> {
		match &self.nodes.get(node.0)?.data {
			NodeData::Element { tag, .. } => Some(tag),
			NodeData::Text(_) => None,
		}
	}

	/// Data of a text node.
	pub fn text(&self, node: DomId) -> Option<&str> {
		match &self.nodes.get(node.0)?.data {
			NodeData::Text(data) => Some(data),
			NodeData::Element { .. } => None,
		}
	}

	/// Value of an element attribute.
	pub fn attribute(&self, node: DomId, name: &str) -> Option<&str> {
		match &self.nodes.get(node.0)?.data {
			NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
			NodeData::Text(_) => None,
		}
	}

	/// Returns true if the element is content-editable.
	pub fn is_editable(&self, node: DomId) -> bool {
		matches!(
			self.nodes.get(node.0).map(|n| &n.data),
			Some(NodeData::Element { editable: true, .. })
		)
	}

	/// Number of tree, attribute and text mutations performed so far.
	pub fn mutation_count(&self) -> usize {
		self.mutations
	}

	/// Number of times the native selection was set.
	pub fn selection_writes(&self) -> usize {
		self.selection_writes
	}

	/// Concatenated text below `node`.
	pub fn text_content(&self, node: DomId) -> String {
		let mut out = String::new();
		self.collect_text(node, &mut out);
		out
	}

	fn collect_text(&self, node: DomId, out: &mut String) {
		let Some(entry) = self.nodes.get(node.0) else {
			return;
		};
		match &entry.data {
			NodeData::Text(data) => out.push_str(data),
			NodeData::Element { .. } => entry.children.iter().for_each(|&child| self.collect_text(child, out)),
		}
	}

	/// Serializes the subtree at `node` as markup.
	pub fn to_html(&self, node: DomId) -> String {
		let mut out = String::new();
		self.write_html(node, &mut out);
		out
	}

	fn write_html(&self, node: DomId, out: &mut String) {
		let Some(entry) = self.nodes.get(node.0) else {
			return;
		};
		match &entry.data {
			NodeData::Text(data) => out.push_str(&escape(data)),
			NodeData::Element {
				tag,
				attributes,
				editable,
			} => {
				let _ = write!(out, "<{tag}");
				for (name, value) in attributes {
					let _ = write!(out, " {name}=\"{}\"", escape(value));
				}
				if *editable {
					out.push_str(" contenteditable=\"true\"");
				}
				out.push('>');
				if VOID_TAGS.contains(&tag.as_str()) {
					return;
				}
				entry.children.iter().for_each(|&child| self.write_html(child, out));
				let _ = write!(out, "</{tag}>");
			}
		}
	}

	/// Simulates the user moving the native selection.
	///
	/// Unlike [`SelectionSubstrate::set_selection`] this is not counted as a
	/// programmatic write.
	pub fn select(&mut self, anchor: NativePoint, focus: NativePoint) {
		self.selection = Some(NativeSelection { anchor, focus });
		self.notify_selection();
	}

	/// Queues a notification, as the platform would on user input.
	pub fn push_event(&mut self, event: DomEvent) {
		self.events.push(event);
	}

	/// Returns the number of queued notifications.
	pub fn pending_events(&self) -> usize {
		self.events.len()
	}

	fn notify_selection(&mut self) {
		if self.listening {
			self.events.push(DomEvent::SelectionChange);
		}
	}

	fn node_mut(&mut self, node: DomId) -> &mut MemoryNode {
		&mut self.nodes[node.0]
	}

	/// Detaches `node` from its current parent, if any.
	fn detach(&mut self, node: DomId) {
		if let Some(parent) = self.node_mut(node).parent.take() {
			self.node_mut(parent).children.retain(|&child| child != node);
		}
	}

	fn index_in_parent(&self, parent: DomId, child: DomId) -> usize {
		let position = self.nodes[parent.0].children.iter().position(|&c| c == child);
		match position {
			Some(index) => index,
			None => panic!("{child:?} is not a child of {parent:?}"),
		}
	}
}

impl RenderTarget for MemoryDom {
	fn create_element(&mut self, tag: &str) -> DomId {
		self.mutations += 1;
		DomId(self.nodes.insert(MemoryNode {
			data: NodeData::Element {
				tag: tag.to_owned(),
				attributes: BTreeMap::new(),
				editable: false,
			},
			parent: None,
			children: Vec::new(),
			view: None,
		}))
	}

	fn create_text(&mut self, data: &str) -> DomId {
		self.mutations += 1;
		DomId(self.nodes.insert(MemoryNode {
			data: NodeData::Text(data.to_owned()),
			parent: None,
			children: Vec::new(),
			view: None,
		}))
	}

	fn append_child(&mut self, parent: DomId, child: DomId) {
		self.mutations += 1;
		self.detach(child);
		self.node_mut(parent).children.push(child);
		self.node_mut(child).parent = Some(parent);
	}

	fn replace_child(&mut self, parent: DomId, new: DomId, old: DomId) {
		self.mutations += 1;
		self.detach(new);
		let index = self.index_in_parent(parent, old);
		self.node_mut(parent).children[index] = new;
		self.node_mut(new).parent = Some(parent);
		self.node_mut(old).parent = None;
	}

	fn remove_child(&mut self, parent: DomId, child: DomId) {
		self.mutations += 1;
		let index = self.index_in_parent(parent, child);
		self.node_mut(parent).children.remove(index);
		self.node_mut(child).parent = None;
	}

	fn release(&mut self, node: DomId) {
		self.detach(node);
		let mut stack = vec![node];
		let mut released = 0usize;
		while let Some(id) = stack.pop() {
			if let Some(entry) = self.nodes.try_remove(id.0) {
				stack.extend(entry.children);
				released += 1;
			}
		}

		let dangling = self.selection.is_some_and(|sel| !self.is_live(sel.anchor.node) || !self.is_live(sel.focus.node));
		if dangling {
			self.selection = None;
		}
		trace!(?node, released, "memory_dom.release");
	}

	fn parent(&self, node: DomId) -> Option<DomId> {
		self.nodes.get(node.0)?.parent
	}

	fn children(&self, node: DomId) -> &[DomId] {
		self.nodes.get(node.0).map_or(&[], |entry| &entry.children)
	}

	fn set_attribute(&mut self, node: DomId, name: &str, value: &str) {
		self.mutations += 1;
		if let NodeData::Element { attributes, .. } = &mut self.node_mut(node).data {
			attributes.insert(name.to_owned(), value.to_owned());
		}
	}

	fn remove_attribute(&mut self, node: DomId, name: &str) {
		self.mutations += 1;
		if let NodeData::Element { attributes, .. } = &mut self.node_mut(node).data {
			attributes.remove(name);
		}
	}

	fn set_editable(&mut self, node: DomId, editable: bool) {
		self.mutations += 1;
		if let NodeData::Element { editable: flag, .. } = &mut self.node_mut(node).data {
			*flag = editable;
		}
	}

	fn set_view_ref(&mut self, node: DomId, view: Option<ViewRef>) {
		self.node_mut(node).view = view;
	}

	fn view_ref(&self, node: DomId) -> Option<ViewRef> {
		self.nodes.get(node.0)?.view
	}
}

impl SelectionSubstrate for MemoryDom {
	fn selection(&self) -> Option<NativeSelection> {
		self.selection
	}

	fn set_selection(&mut self, anchor: NativePoint, focus: NativePoint) {
		self.selection_writes += 1;
		self.selection = Some(NativeSelection { anchor, focus });
		self.notify_selection();
	}

	fn listen_selection(&mut self, listening: bool) {
		self.listening = listening;
	}

	fn is_listening_selection(&self) -> bool {
		self.listening
	}
}

impl EventSource for MemoryDom {
	fn take_events(&mut self) -> Vec<DomEvent> {
		std::mem::take(&mut self.events)
	}
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

//! Shared helpers for view integration tests.

#![allow(dead_code)]

use quire_dom::{DomId, MemoryDom, RenderTarget};
use quire_model::{EditorState, Node, Selection};
use quire_view::{EditorView, ViewConfig};

/// Installs a test-writer subscriber once per test binary.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}

/// Mounts `doc` into a fresh [`MemoryDom`] with `selection`.
pub fn view(doc: Node, selection: Selection) -> EditorView<MemoryDom> {
	init_tracing();
	let mut dom = MemoryDom::new();
	let mount = dom.create_element("div");
	let state = EditorState::with_selection(doc, selection).expect("selection fits the document");
	EditorView::new(dom, mount, state, ViewConfig::default()).expect("view mounts")
}

/// Serialized markup of the mount element.
pub fn html(view: &EditorView<MemoryDom>) -> String {
	view.target().to_html(view.mount())
}

/// Native children of the mount element.
pub fn blocks(view: &EditorView<MemoryDom>) -> Vec<DomId> {
	view.target().children(view.mount()).to_vec()
}

/// The first native child of the `index`th top-level block.
pub fn block_child(view: &EditorView<MemoryDom>, index: usize) -> DomId {
	let dom = view.target();
	dom.children(dom.children(view.mount())[index])[0]
}

use pretty_assertions::assert_eq;
use quire_dom::{MemoryDom, NativePoint, RenderTarget};
use quire_model::node::build::{blockquote, code_block, doc, heading, hr, p, p_text, text};

use super::*;
use crate::error::ViewError;

fn mounted(doc: &Node) -> (MemoryDom, DomId, ViewTree) {
	let mut dom = MemoryDom::new();
	let mount = dom.create_element("div");
	let tree = ViewTree::mount(&mut dom, mount, doc);
	(dom, mount, tree)
}

fn child(tree: &ViewTree, parent: ViewId, index: usize) -> ViewId {
	tree[parent].children()[index]
}

#[test]
fn mount_renders_every_child() {
	let doc = doc([
		heading(1, [text("Title")]),
		p_text("Body"),
		code_block("x"),
		hr(),
	]);
	let (dom, mount, tree) = mounted(&doc);

	assert_eq!(
		dom.to_html(mount),
		"<div><h1>Title</h1><p>Body</p><pre spellcheck=\"false\"><code>x</code></pre><hr></div>"
	);
	assert_eq!(tree.len(), 8);
	assert_eq!(tree.mount_dom(), mount);
	assert_eq!(tree.owner(&dom, mount), Some(tree.root()));
}

#[test]
fn every_native_node_points_back_to_its_view() {
	let (dom, _, tree) = mounted(&doc([code_block("let x;"), blockquote([p_text("q")])]));
	let code = child(&tree, tree.root(), 0);
	let pre = tree[code].dom();
	let slot = tree[code].content_dom().unwrap();

	assert_ne!(pre, slot);
	assert_eq!(tree.owner(&dom, pre), Some(code));
	assert_eq!(tree.owner(&dom, slot), Some(code));

	let quote = child(&tree, tree.root(), 1);
	let para = child(&tree, quote, 0);
	let run = child(&tree, para, 0);
	assert_eq!(tree[run].parent(), Some(para));
	assert_eq!(tree.owner(&dom, tree[run].dom()), Some(run));
}

#[test]
fn updating_with_the_same_document_touches_nothing() {
	let doc = doc([p_text("a"), blockquote([p_text("b")])]);
	let (mut dom, mount, mut tree) = mounted(&doc);
	let html = dom.to_html(mount);
	let before = dom.mutation_count();

	let stats = tree.update(&mut dom, &doc);

	assert_eq!(dom.mutation_count(), before);
	assert_eq!(stats, ReconcileStats { reused: 5, created: 0, destroyed: 0 });
	assert_eq!(dom.to_html(mount), html);
}

#[test]
fn new_text_replaces_only_the_text_node() {
	let (mut dom, mount, mut tree) = mounted(&doc([p_text("Hello")]));
	let para = child(&tree, tree.root(), 0);
	let para_dom = tree[para].dom();
	let old_text = tree[child(&tree, para, 0)].dom();

	let stats = tree.update(&mut dom, &doc([p_text("Hello!")]));

	assert_eq!(tree[child(&tree, tree.root(), 0)].dom(), para_dom);
	let new_text = tree[child(&tree, para, 0)].dom();
	assert_ne!(new_text, old_text);
	assert!(!dom.is_live(old_text));
	assert_eq!(dom.text(new_text), Some("Hello!"));
	assert_eq!(dom.to_html(mount), "<div><p>Hello!</p></div>");
	assert_eq!(stats, ReconcileStats { reused: 1, created: 1, destroyed: 1 });
}

#[test]
fn identical_text_nodes_are_reused_across_documents() {
	let shared = text("same");
	let (mut dom, mount, mut tree) = mounted(&doc([p([shared.clone()])]));
	let para = child(&tree, tree.root(), 0);
	let run_dom = tree[child(&tree, para, 0)].dom();

	let stats = tree.update(&mut dom, &doc([p([shared]), hr()]));

	assert_eq!(tree[child(&tree, para, 0)].dom(), run_dom);
	assert_eq!(stats, ReconcileStats { reused: 2, created: 1, destroyed: 0 });
	assert_eq!(dom.to_html(mount), "<div><p>same</p><hr></div>");
}

#[test]
fn markup_change_rebuilds_the_subtree() {
	let (mut dom, mount, mut tree) = mounted(&doc([p_text("a"), p_text("b")]));
	let first = tree[child(&tree, tree.root(), 0)].dom();
	let second = tree[child(&tree, tree.root(), 1)].dom();

	tree.update(&mut dom, &doc([p_text("a"), heading(1, [text("b")])]));

	assert_eq!(dom.children(mount)[0], first);
	assert_ne!(dom.children(mount)[1], second);
	assert!(!dom.is_live(second));
	assert_eq!(dom.to_html(mount), "<div><p>a</p><h1>b</h1></div>");
}

#[test]
fn surplus_children_are_destroyed() {
	let (mut dom, mount, mut tree) = mounted(&doc([p_text("a"), hr(), p_text("c")]));
	let dropped: Vec<DomId> = dom.children(mount)[1..].to_vec();

	let stats = tree.update(&mut dom, &doc([p_text("a")]));

	assert_eq!(stats.destroyed, 3);
	assert_eq!(tree[tree.root()].children().len(), 1);
	assert_eq!(tree.len(), 3);
	assert!(dropped.iter().all(|&id| !dom.is_live(id)));
	assert_eq!(dom.to_html(mount), "<div><p>a</p></div>");
}

#[test]
fn missing_children_are_appended() {
	let (mut dom, mount, mut tree) = mounted(&doc([p_text("a")]));
	tree.update(&mut dom, &doc([p_text("a"), hr(), p([])]));
	assert_eq!(dom.to_html(mount), "<div><p>a</p><hr><p></p></div>");
	assert_eq!(tree[tree.root()].children().len(), 3);
}

#[test]
fn unmount_releases_everything_but_the_mount() {
	let (mut dom, mount, tree) = mounted(&doc([p_text("a"), blockquote([p_text("b")])]));
	tree.unmount(&mut dom);
	assert!(dom.children(mount).is_empty());
	assert_eq!(dom.view_ref(mount), None);
	assert_eq!(dom.node_count(), 1);
}

/// `doc(p("Hello"), hr, blockquote(p("x")), p())`, content size 15.
fn mixed() -> Node {
	doc([p_text("Hello"), hr(), blockquote([p_text("x")]), p([])])
}

#[test]
fn locate_resolves_text_and_gaps() {
	let (dom, mount, tree) = mounted(&mixed());
	let hello = dom.children(dom.children(mount)[0])[0];
	let quote = dom.children(mount)[2];
	let x = dom.children(dom.children(quote)[0])[0];
	let empty = dom.children(mount)[3];

	assert_eq!(tree.locate(0, false).unwrap(), NativePoint::new(mount, 0));
	assert_eq!(tree.locate(1, false).unwrap(), NativePoint::new(hello, 0));
	assert_eq!(tree.locate(6, false).unwrap(), NativePoint::new(hello, 5));
	assert_eq!(tree.locate(7, false).unwrap(), NativePoint::new(mount, 1));
	assert_eq!(tree.locate(8, false).unwrap(), NativePoint::new(mount, 2));
	assert_eq!(tree.locate(8, true).unwrap(), NativePoint::new(mount, 2));
	assert_eq!(tree.locate(9, false).unwrap(), NativePoint::new(quote, 0));
	assert_eq!(tree.locate(10, true).unwrap(), NativePoint::new(x, 0));
	assert_eq!(tree.locate(13, false).unwrap(), NativePoint::new(mount, 3));
	assert_eq!(tree.locate(14, false).unwrap(), NativePoint::new(empty, 0));
	assert_eq!(tree.locate(15, false).unwrap(), NativePoint::new(mount, 4));
}

#[test]
fn locate_rejects_positions_past_the_end() {
	let (_, _, tree) = mounted(&mixed());
	assert!(matches!(
		tree.locate(16, false),
		Err(ViewError::PositionOutOfRange { pos: 16, size: 15 })
	));

	let (_, _, empty) = mounted(&doc([]));
	assert!(empty.locate(0, true).is_ok());
	assert!(empty.locate(1, true).is_err());
}

#[test]
fn locate_and_to_document_position_are_inverse() {
	let (dom, _, tree) = mounted(&mixed());
	for pos in 0..=15 {
		for prefer_before in [false, true] {
			let point = tree.locate(pos, prefer_before).unwrap();
			assert_eq!(
				tree.to_document_position(&dom, point).unwrap(),
				pos,
				"pos {pos}, prefer_before {prefer_before}"
			);
		}
	}
}

#[test]
fn to_document_position_handles_element_coordinates() {
	let (dom, mount, tree) = mounted(&doc([code_block("ab"), hr()]));
	let pre = dom.children(mount)[0];
	let rule = dom.children(mount)[1];

	assert_eq!(tree.to_document_position(&dom, NativePoint::new(pre, 0)).unwrap(), 1);
	assert_eq!(tree.to_document_position(&dom, NativePoint::new(pre, 1)).unwrap(), 3);
	assert_eq!(tree.to_document_position(&dom, NativePoint::new(rule, 0)).unwrap(), 4);
	assert_eq!(tree.to_document_position(&dom, NativePoint::new(rule, 1)).unwrap(), 5);
	assert_eq!(tree.to_document_position(&dom, NativePoint::new(mount, 9)).unwrap(), 5);
}

#[test]
fn foreign_nodes_resolve_through_owned_ancestors() {
	let (mut dom, mount, tree) = mounted(&doc([p_text("a"), p_text("bc")]));
	let second = dom.children(mount)[1];
	let stray = dom.create_element("span");
	dom.append_child(second, stray);
	assert_eq!(tree.to_document_position(&dom, NativePoint::new(stray, 0)).unwrap(), 4);

	let outside = dom.create_element("div");
	assert!(matches!(
		tree.to_document_position(&dom, NativePoint::new(outside, 0)),
		Err(ViewError::UnownedNode(id)) if id == outside
	));
}

#[test]
fn content_start_accumulates_borders_and_siblings() {
	let (_, _, tree) = mounted(&mixed());
	let root = tree.root();
	let quote = child(&tree, root, 2);
	let inner = child(&tree, quote, 0);
	assert_eq!(tree.content_start(root), 0);
	assert_eq!(tree.content_start(child(&tree, root, 1)), 7);
	assert_eq!(tree.content_start(quote), 9);
	assert_eq!(tree.content_start(inner), 10);
	assert_eq!(tree.content_start(child(&tree, inner, 0)), 10);
}

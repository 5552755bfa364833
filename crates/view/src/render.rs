use quire_dom::{DomId, RenderTarget};
use quire_model::{Node, NodeType};

/// Where rendered children go inside a node's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentHole {
	/// The node has no children.
	None,
	/// Children go directly into the element.
	Element,
	/// Children go into a single nested element with this tag.
	Nested(&'static str),
}

/// Rendering rule for one node type: a tag, fixed attributes and a hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSpec {
	/// Element tag.
	pub tag: &'static str,
	/// Attributes set on the element.
	pub attrs: &'static [(&'static str, &'static str)],
	/// Where children are placed.
	pub hole: ContentHole,
}

impl RenderSpec {
	const fn new(tag: &'static str, hole: ContentHole) -> Self {
		Self { tag, attrs: &[], hole }
	}
}

/// Returns the rendering rule for a node type, or `None` for text.
pub fn render_spec(ty: NodeType) -> Option<RenderSpec> {
	let spec = match ty.normalized() {
		NodeType::Text => return None,
		NodeType::Doc => RenderSpec::new("div", ContentHole::Element),
		NodeType::Paragraph => RenderSpec::new("p", ContentHole::Element),
		NodeType::Heading { level } => RenderSpec::new(heading_tag(level), ContentHole::Element),
		NodeType::Blockquote => RenderSpec::new("blockquote", ContentHole::Element),
		NodeType::CodeBlock => RenderSpec {
			tag: "pre",
			attrs: &[("spellcheck", "false")],
			hole: ContentHole::Nested("code"),
		},
		NodeType::HorizontalRule => RenderSpec::new("hr", ContentHole::None),
	};
	Some(spec)
}

fn heading_tag(level: u8) -> &'static str {
	match level {
		1 => "h1",
		2 => "h2",
		3 => "h3",
		4 => "h4",
		5 => "h5",
		_ => "h6",
	}
}

/// Native output of rendering one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rendered {
	/// The node's outermost native node.
	pub dom: DomId,
	/// The element that receives children, for container nodes.
	pub content_dom: Option<DomId>,
}

/// Creates the native nodes for `node` without its children.
///
/// The result is detached; callers insert it where it belongs.
pub fn render_node<T: RenderTarget + ?Sized>(target: &mut T, node: &Node) -> Rendered {
	let Some(spec) = render_spec(node.node_type()) else {
		let dom = target.create_text(node.text_str().unwrap_or_default());
		return Rendered { dom, content_dom: None };
	};

	let dom = target.create_element(spec.tag);
	for (name, value) in spec.attrs {
		target.set_attribute(dom, name, value);
	}
	let content_dom = match spec.hole {
		ContentHole::None => None,
		ContentHole::Element => Some(dom),
		ContentHole::Nested(tag) => {
			let inner = target.create_element(tag);
			target.append_child(dom, inner);
			Some(inner)
		}
	};
	Rendered { dom, content_dom }
}

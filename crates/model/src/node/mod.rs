use std::fmt;
use std::sync::Arc;

pub mod build;


/// The closed set of node types the model knows how to build and render.
///
/// Attributes live inside the variant, so two nodes are markup-equal exactly
/// when their types compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
	/// Top-level document.
	Doc,
	/// Plain paragraph textblock.
	Paragraph,
	/// Heading textblock with a level in `1..=6`. Nodes clamp other levels.
	Heading {
		/// Heading level.
		level: u8,
	},
	/// Container of blocks.
	Blockquote,
	/// Preformatted textblock.
	CodeBlock,
	/// Leaf block without content.
	HorizontalRule,
	/// Run of characters.
	Text,
}

impl NodeType {
	/// Returns the schema name of this type.
	pub fn name(self) -> &'static str {
		match self {
			Self::Doc => "doc",
			Self::Paragraph => "paragraph",
			Self::Heading { .. } => "heading",
			Self::Blockquote => "blockquote",
			Self::CodeBlock => "code_block",
			Self::HorizontalRule => "horizontal_rule",
			Self::Text => "text",
		}
	}

	/// Clamps attributes into their valid range.
	pub fn normalized(self) -> Self {
		match self {
			Self::Heading { level } => Self::Heading {
				level: level.clamp(1, 6),
			},
			ty => ty,
		}
	}

	/// Returns true for the text type.
	pub fn is_text(self) -> bool {
		self == Self::Text
	}

	/// Returns true for blocks whose content is inline text.
	pub fn is_textblock(self) -> bool {
		matches!(self, Self::Paragraph | Self::Heading { .. } | Self::CodeBlock)
	}

	/// Returns true for types that never hold child nodes.
	pub fn is_leaf(self) -> bool {
		matches!(self, Self::Text | Self::HorizontalRule)
	}
}

#[derive(Debug)]
enum Content {
	Text(String),
	Children(Vec<Node>),
	Empty,
}

#[derive(Debug)]
struct NodeInner {
	ty: NodeType,
	content: Content,
	size: usize,
}

/// An immutable document node.
///
/// Cloning a node clones a shared handle; use [`Node::ptr_eq`] to test
/// identity and [`Node::same_markup`] to test whether two nodes would render
/// to the same element.
#[derive(Clone)]
pub struct Node(Arc<NodeInner>);

impl Node {
	/// Creates a text node.
	pub fn text(text: impl Into<String>) -> Self {
		let text = text.into();
		let size = text.chars().count();
		Self(Arc::new(NodeInner {
			ty: NodeType::Text,
			content: Content::Text(text),
			size,
		}))
	}

	/// Creates a node of type `ty` holding `children`.
	///
	/// Leaf types ignore `children`. Use [`Node::text`] for text nodes.
	/// Out-of-range heading levels are clamped.
	pub fn new(ty: NodeType, children: impl IntoIterator<Item = Node>) -> Self {
		debug_assert!(!ty.is_text(), "text nodes are built with Node::text");
		let ty = ty.normalized();
		if ty.is_leaf() {
			return Self(Arc::new(NodeInner {
				ty,
				content: Content::Empty,
				size: 1,
			}));
		}

		let children: Vec<Node> = children.into_iter().collect();
		let content_size: usize = children.iter().map(Node::size).sum();
		Self(Arc::new(NodeInner {
			ty,
			content: Content::Children(children),
			size: content_size + 2,
		}))
	}

	/// Creates a node of the same type with different children.
	pub fn copy_with(&self, children: impl IntoIterator<Item = Node>) -> Self {
		Self::new(self.node_type(), children)
	}

	/// Returns the node type.
	pub fn node_type(&self) -> NodeType {
		self.0.ty
	}

	/// Returns the size of this node in position units.
	pub fn size(&self) -> usize {
		self.0.size
	}

	/// Returns the size of the content between the node's boundary tokens.
	pub fn content_size(&self) -> usize {
		match &self.0.content {
			Content::Text(_) => self.0.size,
			Content::Children(_) => self.0.size - 2,
			Content::Empty => 0,
		}
	}

	/// Returns the child nodes (empty for leaves).
	pub fn children(&self) -> &[Node] {
		match &self.0.content {
			Content::Children(children) => children,
			_ => &[],
		}
	}

	/// Returns the number of children.
	pub fn child_count(&self) -> usize {
		self.children().len()
	}

	/// Returns the child at `index`.
	///
	/// # Panics
	///
	/// Panics if `index` is out of bounds.
	pub fn child(&self, index: usize) -> &Node {
		&self.children()[index]
	}

	/// Returns the child at `index`, if any.
	pub fn maybe_child(&self, index: usize) -> Option<&Node> {
		self.children().get(index)
	}

	/// Returns the text of a text node.
	pub fn text_str(&self) -> Option<&str> {
		match &self.0.content {
			Content::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Concatenates all text below this node.
	pub fn text_content(&self) -> String {
		let mut out = String::new();
		self.collect_text(&mut out);
		out
	}

	fn collect_text(&self, out: &mut String) {
		match &self.0.content {
			Content::Text(text) => out.push_str(text),
			Content::Children(children) => children.iter().for_each(|child| child.collect_text(out)),
			Content::Empty => {}
		}
	}

	/// Returns true if this is a text node.
	pub fn is_text(&self) -> bool {
		self.0.ty.is_text()
	}

	/// Returns true if this node's content is inline text.
	pub fn is_textblock(&self) -> bool {
		self.0.ty.is_textblock()
	}

	/// Returns true if this node can never hold children.
	pub fn is_leaf(&self) -> bool {
		self.0.ty.is_leaf()
	}

	/// Returns true if both handles point to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}

	/// Returns true if `other` would render to the same element, ignoring content.
	pub fn same_markup(&self, other: &Node) -> bool {
		self.0.ty == other.0.ty
	}
}

/// Structural equality: same type and equal content.
impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		if self.ptr_eq(other) {
			return true;
		}
		if !self.same_markup(other) || self.size() != other.size() {
			return false;
		}
		match (&self.0.content, &other.0.content) {
			(Content::Text(a), Content::Text(b)) => a == b,
			(Content::Children(a), Content::Children(b)) => a == b,
			(Content::Empty, Content::Empty) => true,
			_ => false,
		}
	}
}

impl Eq for Node {}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.0.content {
			Content::Text(text) => write!(f, "{text:?}"),
			Content::Empty => write!(f, "{}", self.0.ty.name()),
			Content::Children(children) => {
				write!(f, "{}(", self.0.ty.name())?;
				for (i, child) in children.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{child:?}")?;
				}
				write!(f, ")")
			}
		}
	}
}

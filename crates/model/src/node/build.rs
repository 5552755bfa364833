//! Shorthand constructors for building documents in code and tests.

use super::{Node, NodeType};

/// Builds a document node.
pub fn doc(children: impl IntoIterator<Item = Node>) -> Node {
	Node::new(NodeType::Doc, children)
}

/// Builds a paragraph.
pub fn p(children: impl IntoIterator<Item = Node>) -> Node {
	Node::new(NodeType::Paragraph, children)
}

/// Builds a paragraph holding a single run of text (or nothing, for `""`).
pub fn p_text(text: &str) -> Node {
	p(text_run(text))
}

/// Builds a heading of the given level.
pub fn heading(level: u8, children: impl IntoIterator<Item = Node>) -> Node {
	Node::new(NodeType::Heading { level }, children)
}

/// Builds a blockquote.
pub fn blockquote(children: impl IntoIterator<Item = Node>) -> Node {
	Node::new(NodeType::Blockquote, children)
}

/// Builds a code block holding a single run of text.
pub fn code_block(text: &str) -> Node {
	Node::new(NodeType::CodeBlock, text_run(text))
}

/// Builds a horizontal rule.
pub fn hr() -> Node {
	Node::new(NodeType::HorizontalRule, [])
}

/// Builds a text node.
pub fn text(text: &str) -> Node {
	Node::text(text)
}

/// Returns a single text node, or nothing for empty text.
pub(crate) fn text_run(text: &str) -> Option<Node> {
	(!text.is_empty()).then(|| Node::text(text))
}

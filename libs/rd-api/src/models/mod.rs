//! Response models and the XML helpers they share

use roxmltree::{Document, Node, ParsingOptions};

use crate::error::ParseError;

pub mod inventory;
pub mod message;

/// Parse a response body and hand its root element to `f`.
///
/// Message documents are XHTML and may carry a DOCTYPE, so DTDs are allowed.
pub(crate) fn with_root<T>(
    bytes: &[u8],
    f: impl FnOnce(Node<'_, '_>) -> T,
) -> Result<T, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let document = Document::parse_with_options(text, options)?;
    Ok(f(document.root_element()))
}

/// Element children of `node` with the given local name
pub(crate) fn children_named<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |child| child.is_element() && child.tag_name().name() == name)
}

/// Concatenated, trimmed text of an element and its descendants
pub(crate) fn text_of(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    text.trim().to_string()
}

/// Text of the first child element with the given name, empty when absent
pub(crate) fn child_text(node: Node<'_, '_>, name: &str) -> String {
    children_named(node, name)
        .next()
        .map(text_of)
        .unwrap_or_default()
}

/// Boolean child element, `true` or `1` meaning set
pub(crate) fn child_flag(node: Node<'_, '_>, name: &str) -> bool {
    matches!(child_text(node, name).as_str(), "true" | "1")
}

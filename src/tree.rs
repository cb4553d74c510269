//! The parsed-document boundary: an owned XML element tree.
//!
//! Everything downstream of this module operates on [`Node`] values and never
//! sees raw markup. Malformed documents fail here, inside
//! [`parse_document`], and never reach schema discovery or flattening.
//!
//! Parsing is deliberately namespace-unaware: tag and attribute names are
//! kept verbatim, prefixes included, which matches the record formats this
//! crate targets (E-utilities responses do not use namespaces).

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One XML element: tag name, attributes in document order, optional text,
/// and child elements in document order.
///
/// `text` holds the character data that appears between the element's start
/// tag and its first child element (the common "leaf value" position).
/// Whitespace-only runs are discarded during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of elements in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// Parse an XML document string into its root [`Node`].
///
/// A document with no element at all (for example, only a declaration and
/// comments) yields [`Error::EmptyDocument`].
pub fn parse_document(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => open.push(element_node(&start)?),
            Event::Empty(start) => {
                let node = element_node(&start)?;
                attach(&mut open, &mut root, node)?;
            }
            Event::End(_) => {
                // quick-xml rejects mismatched or stray end tags before we
                // get here, so the stack is never empty at this point.
                if let Some(node) = open.pop() {
                    attach(&mut open, &mut root, node)?;
                }
            }
            Event::Text(text) => {
                let content = text.unescape()?.into_owned();
                set_leading_text(&mut open, content);
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                set_leading_text(&mut open, content);
            }
            Event::Eof => {
                if let Some(unclosed) = open.last() {
                    return Err(Error::UnclosedElement(unclosed.tag.clone()));
                }
                break;
            }
            // Declarations, comments, doctypes and processing instructions
            // carry nothing tabular.
            _ => {}
        }
    }

    root.ok_or(Error::EmptyDocument)
}

fn element_node(start: &BytesStart<'_>) -> Result<Node> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = Node::new(tag);
    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.attributes.push((name, value));
    }
    Ok(node)
}

fn attach(open: &mut Vec<Node>, root: &mut Option<Node>, node: Node) -> Result<()> {
    if let Some(parent) = open.last_mut() {
        parent.children.push(node);
    } else if root.is_none() {
        *root = Some(node);
    } else {
        // A well-formed document has exactly one document element.
        return Err(Error::TrailingElement(node.tag));
    }
    Ok(())
}

/// Record text only in the "leading" position: after the start tag, before
/// any child element. Later runs (tail text between siblings) are dropped,
/// matching how the flattener consumes element text.
fn set_leading_text(open: &mut [Node], content: String) {
    if content.is_empty() {
        return;
    }
    if let Some(current) = open.last_mut() {
        if current.text.is_none() && current.children.is_empty() {
            current.text = Some(content);
        }
    }
}

//! Minimal owned XML element tree built on `quick-xml`.
//!
//! Registry records are loosely structured: any element may be missing.
//! The tree therefore exposes only `Option`-returning accessors so callers can
//! chain lookups and skip a field when a node is absent. Element and attribute
//! names are stored by local name; namespace prefixes are dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Errors produced while building an [`XmlNode`] tree.
#[derive(Debug, Clone, Error)]
pub enum XmlError {
    /// The underlying reader rejected the input
    #[error("XML syntax error at byte {position}: {message}")]
    Syntax {
        /// Byte offset reported by the reader
        position: u64,
        /// Reader error message
        message: String,
    },

    /// Input ended before the root element was closed
    #[error("XML document ended inside unclosed element <{name}>")]
    Unclosed {
        /// Innermost open element
        name: String,
    },

    /// Input contained no element at all
    #[error("XML document has no root element")]
    NoRoot,

    /// A second top-level element followed the root
    #[error("XML document has more than one root element (second root <{name}>)")]
    MultipleRoots {
        /// Name of the extra top-level element
        name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlContent {
    Element(XmlNode),
    Text(String),
}

/// An element with its attributes and mixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<XmlContent>,
}

impl XmlNode {
    fn from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, XmlError> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| syntax_error(reader, &e))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(|e| syntax_error(reader, &e))?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            content: Vec::new(),
        })
    }

    /// Local element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the attribute with the given local name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements in document order.
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.content.iter().filter_map(|item| match item {
            XmlContent::Element(node) => Some(node),
            XmlContent::Text(_) => None,
        })
    }

    /// Child elements with the given local name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlNode> {
        self.children().filter(move |node| node.name == name)
    }

    /// First child element with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children().find(|node| node.name == name)
    }

    /// Follows a chain of child names, stopping at the first missing step.
    #[must_use]
    pub fn descend(&self, path: &[&str]) -> Option<&XmlNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// All descendant text with whitespace runs collapsed; `None` when blank.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            None
        } else {
            Some(collapsed)
        }
    }

    /// Text of the first child with the given name.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).and_then(XmlNode::text)
    }

    fn collect_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                XmlContent::Text(text) => out.push_str(text),
                XmlContent::Element(node) => node.collect_text(out),
            }
        }
    }
}

fn syntax_error(reader: &Reader<&[u8]>, error: &dyn std::fmt::Display) -> XmlError {
    XmlError::Syntax {
        position: reader.error_position() as u64,
        message: error.to_string(),
    }
}

/// Parses a complete XML document and returns its root element.
///
/// # Errors
///
/// Returns [`XmlError`] for malformed markup, unclosed elements, a missing
/// root, or more than one root.
pub fn parse_document(xml: &str) -> Result<XmlNode, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        let event = reader.read_event().map_err(|e| syntax_error(&reader, &e))?;
        match event {
            Event::Start(start) => {
                let node = XmlNode::from_start(&start, &reader)?;
                if stack.is_empty() && root.is_some() {
                    return Err(XmlError::MultipleRoots { name: node.name });
                }
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = XmlNode::from_start(&start, &reader)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                // quick-xml verifies end names, so the top of the stack is the match.
                if let Some(node) = stack.pop() {
                    attach(&mut stack, &mut root, node)?;
                }
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| syntax_error(&reader, &e))?;
                    parent.content.push(XmlContent::Text(text.into_owned()));
                }
            }
            Event::CData(cdata) => {
                if let Some(parent) = stack.last_mut() {
                    let text = String::from_utf8_lossy(&cdata.into_inner()).into_owned();
                    parent.content.push(XmlContent::Text(text));
                }
            }
            Event::Eof => break,
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed { name: open.name });
    }
    root.ok_or(XmlError::NoRoot)
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    node: XmlNode,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.content.push(XmlContent::Element(node));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::MultipleRoots { name: node.name });
    }
    *root = Some(node);
    Ok(())
}

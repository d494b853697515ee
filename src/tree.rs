// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A generic attributed tree.
//!
//! This is the input of the conversion. It doesn't know anything about SVG,
//! it simply stores tag names, raw attribute values and children.

use crate::Error;

const XLINK_NS: &str = "http://www.w3.org/1999/xlink";

/// Tag name used by text nodes.
pub const TEXT_TAG_NAME: &str = "#text";

const MAX_DEPTH: u32 = 1024;

/// An attribute.
#[derive(Clone, PartialEq, Debug)]
pub struct Attribute {
    /// Attribute's local name.
    pub name: String,
    /// Attribute's raw value.
    pub value: String,
}

/// A generic tree node.
///
/// Element nodes have a tag name, attributes and children.
/// Text nodes have the `#text` tag name and a text.
#[derive(Clone, PartialEq, Default, Debug)]
pub struct Node {
    tag_name: String,
    attributes: Vec<Attribute>,
    children: Vec<Node>,
    text: Option<String>,
}

impl Node {
    /// Creates a new element node without attributes and children.
    pub fn new(tag_name: &str) -> Self {
        Node {
            tag_name: tag_name.to_string(),
            ..Node::default()
        }
    }

    /// Creates a new text node.
    pub fn new_text(text: &str) -> Self {
        Node {
            tag_name: TEXT_TAG_NAME.to_string(),
            text: Some(text.to_string()),
            ..Node::default()
        }
    }

    /// Sets an attribute and returns the node.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Appends a child and returns the node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Sets an attribute.
    ///
    /// Replaces the value of an existing attribute with the same name.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Appends a child.
    pub fn append(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Returns node's tag name.
    #[inline]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Checks that node has a specified tag name.
    #[inline]
    pub fn has_tag_name(&self, name: &str) -> bool {
        self.tag_name == name
    }

    /// Returns node's attributes in the document order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Checks that node has a specified attribute.
    #[inline]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// Returns node's children.
    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Checks that node has children.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the text of a text node.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Checks that node is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.tag_name == TEXT_TAG_NAME
    }

    /// Returns an iterator over this node and its descendants in pre-order.
    #[inline]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// An iterator over a node and its descendants in pre-order.
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl Node {
    /// Parses a tree from a string.
    ///
    /// Returns the root element.
    ///
    /// Parsing is recursive, so deeply nested documents require a large stack.
    /// Documents nested deeper than 1024 levels are rejected with
    /// [`Error::ElementsLimitReached`], but reaching that depth needs a thread
    /// with a few MiB of stack, especially in debug builds.
    pub fn from_str(text: &str) -> Result<Node, Error> {
        let opt = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };

        let xml = roxmltree::Document::parse_with_options(text, opt)?;
        parse_element(xml.root_element(), 0)
    }

    /// Parses a tree from raw data.
    ///
    /// Returns the root element.
    pub fn from_data(data: &[u8]) -> Result<Node, Error> {
        let text = std::str::from_utf8(data).map_err(|_| Error::NotAnUtf8Str)?;
        Node::from_str(text)
    }
}

fn parse_element(xml: roxmltree::Node, depth: u32) -> Result<Node, Error> {
    if depth > MAX_DEPTH {
        return Err(Error::ElementsLimitReached);
    }

    let mut node = Node::new(xml.tag_name().name());

    let mut style = None;
    for attr in xml.attributes() {
        let name = attr.name();
        match attr.namespace() {
            Some(XLINK_NS) if name == "href" => node.set_attribute("href", attr.value()),
            _ if name == "style" => style = Some(attr.value()),
            _ => node.set_attribute(name, attr.value()),
        }
    }

    // Declarations from the `style` attribute override presentation attributes.
    if let Some(value) = style {
        for declaration in simplecss::DeclarationTokenizer::from(value) {
            node.set_attribute(declaration.name, declaration.value);
        }
    }

    for child in xml.children() {
        if child.is_element() {
            node.append(parse_element(child, depth + 1)?);
        } else if child.is_text() {
            let text = child.text().unwrap_or_default().trim();
            if !text.is_empty() {
                node.append(Node::new_text(text));
            }
        }
    }

    Ok(node)
}

// crates/scl-extract/src/tree.rs

//! In-memory tree model for SCL documents.
//!
//! Extraction clones arbitrary subtrees (Header, IED, Private blocks) and
//! the canonical formatter relies on attribute order and CDATA sections
//! surviving exactly as parsed, so the model is a plain ordered tree rather
//! than a typed schema mapping.

use alloc::string::String;
use alloc::vec::Vec;

/// A single XML attribute.
///
/// Attribute order on an element is meaningful for output, so elements
/// store attributes as a list, not a map. Names are unique per element;
/// the parser rejects duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Qualified attribute name, prefixes kept verbatim.
    pub name: String,
    /// Attribute value with XML entities resolved.
    pub value: String,
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data with entities resolved. Whitespace-only text is kept
    /// in the tree but never serialised.
    Text(String),
    /// A CDATA section, stored raw. Line endings are normalised to LF when
    /// the document is serialised; nothing else is ever touched.
    Cdata(String),
}

/// An element with its qualified tag name, ordered attributes and ordered
/// children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Returns the value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name == name)
            .map(|attribute| attribute.value.as_str())
    }

    /// Iterates over the direct element children in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Returns the first direct child element with the given tag name.
    pub fn find_child(&self, tag: &str) -> Option<&Element> {
        self.child_elements().find(|element| element.tag == tag)
    }

    /// Depth-first iterator over all descendant elements, in document
    /// order. `self` is not included.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = Vec::new();
        for child in self.children.iter().rev() {
            if let Node::Element(element) = child {
                stack.push(element);
            }
        }
        Descendants { stack }
    }
}

/// Iterator returned by [`Element::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        // Children go on the stack in reverse so the first child is popped
        // next, keeping document order.
        for child in element.children.iter().rev() {
            if let Node::Element(child) = child {
                self.stack.push(child);
            }
        }
        Some(element)
    }
}

/// A parsed SCL document, rooted at the `<SCL>` element.
///
/// The XML declaration of the source text is not modelled; the canonical
/// formatter always emits exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SclDocument {
    pub root: Element,
}

impl SclDocument {
    /// Iterates over the `<IED>` children of the root in document order.
    pub fn ieds(&self) -> impl Iterator<Item = &Element> + '_ {
        self.root.child_elements().filter(|element| element.tag == "IED")
    }

    /// Finds the IED whose `name` attribute equals `name`.
    pub fn ied(&self, name: &str) -> Option<&Element> {
        self.ieds().find(|element| element.attr("name") == Some(name))
    }
}

// crates/scl-extract/src/parser.rs

//! Event-driven parsing of SCL text into the [`crate::tree`] model.

use crate::error::SclError;
use crate::tree::{Attribute, Element, Node, SclDocument};
use alloc::borrow::ToOwned;
use alloc::vec::Vec;
use core::str;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parses an SCL string into an [`SclDocument`] tree.
///
/// This is the only place where malformed input is detected: anything that
/// is not a single well-formed XML document is rejected here, before any
/// extraction logic runs. Comments, processing instructions, doctype and
/// XML declarations carry no tree content and are skipped; character data
/// split by a skipped node is merged back into one text node.
///
/// # Errors
/// Returns an `SclError` if the input is not well-formed, or contains
/// duplicated attributes, unknown entity references or invalid UTF-8.
pub fn load_scl_from_str(xml: &str) -> Result<SclDocument, SclError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start)?;
                attach_element(&mut stack, &mut root, element)?;
            }
            Event::End(end) => {
                let element = stack
                    .pop()
                    .ok_or(SclError::IllFormed("closing tag without opening tag"))?;
                if element.tag.as_bytes() != end.name().as_ref() {
                    return Err(SclError::IllFormed("mismatched closing tag"));
                }
                attach_element(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let bytes = text.into_inner();
                let value = unescape(str::from_utf8(&bytes)?)?;
                match stack.last_mut() {
                    Some(parent) => push_text(parent, &value),
                    // Whitespace around the root element is legal and
                    // carries nothing.
                    None if value.trim().is_empty() => {}
                    None => {
                        return Err(SclError::IllFormed("text outside of the root element"));
                    }
                }
            }
            Event::CData(cdata) => {
                let bytes = cdata.into_inner();
                let content = str::from_utf8(&bytes)?.to_owned();
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Cdata(content)),
                    None => {
                        return Err(SclError::IllFormed("CDATA outside of the root element"));
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // contribute nothing to the tree.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(SclError::IllFormed("unclosed element at end of input"));
    }
    root.map(|root| SclDocument { root })
        .ok_or(SclError::IllFormed("missing root element"))
}

/// Builds an [`Element`] from a start (or empty) tag, resolving entity
/// references in attribute values.
fn element_from_start(start: &BytesStart<'_>) -> Result<Element, SclError> {
    let tag = str::from_utf8(start.name().as_ref())?.to_owned();
    let mut attributes: Vec<Attribute> = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let name = str::from_utf8(attribute.key.as_ref())?.to_owned();
        if attributes.iter().any(|existing| existing.name == name) {
            return Err(SclError::IllFormed("duplicated attribute"));
        }
        let value = unescape(str::from_utf8(&attribute.value)?)?.into_owned();
        attributes.push(Attribute { name, value });
    }
    Ok(Element {
        tag,
        attributes,
        children: Vec::new(),
    })
}

/// Hangs a finished element under the current open element, or installs it
/// as the document root.
fn attach_element(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), SclError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => {
            return Err(SclError::IllFormed("more than one root element"));
        }
        None => *root = Some(element),
    }
    Ok(())
}

/// Appends character data to `parent`, merging with a directly preceding
/// text node so that text split by a skipped comment stays one node.
fn push_text(parent: &mut Element, value: &str) {
    if let Some(Node::Text(existing)) = parent.children.last_mut() {
        existing.push_str(value);
    } else {
        parent.children.push(Node::Text(value.to_owned()));
    }
}

// crates/scl-extract/src/formatter.rs

//! Canonical text serialisation for SCL trees.
//!
//! Output is deterministic and independent of how the source document was
//! formatted: two-space indentation, one child per line, childless
//! elements self-closed, elements with a single text child rendered on
//! one line, CDATA inside `Private` blocks passed through with line
//! endings normalised to LF.

use crate::error::SclError;
use crate::tree::{Element, Node, SclDocument};
use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// The declaration every serialised document starts with.
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

/// One indentation step.
const INDENT: &str = "  ";

/// Serialises a document into its canonical textual form.
///
/// Formatting the same tree twice, or two structurally equal trees,
/// yields byte-identical text, so extracted files can be diffed reliably.
/// The result ends with a newline and starts with exactly one XML
/// declaration.
///
/// # Errors
/// Returns an `SclError` if writing to the output buffer fails.
pub fn save_scl_to_string(document: &SclDocument) -> Result<String, SclError> {
    let mut out = String::new();
    format_element(&mut out, &document.root, 0)?;
    out.push('\n');

    // Prepended only when the produced text does not already begin with
    // the declaration line.
    if out.starts_with(XML_DECLARATION) {
        return Ok(out);
    }
    let mut declared = String::with_capacity(XML_DECLARATION.len() + out.len());
    declared.push_str(XML_DECLARATION);
    declared.push_str(&out);
    Ok(declared)
}

/// Parses `scl` and returns it reformatted in canonical form.
///
/// # Errors
/// Returns an `SclError` if the input is not a single well-formed
/// document.
pub fn format_scl_str(scl: &str) -> Result<String, SclError> {
    let document = crate::parser::load_scl_from_str(scl)?;
    save_scl_to_string(&document)
}

/// A text node carries output only when it has non-whitespace content;
/// elements and CDATA sections always do.
fn is_significant(node: &Node) -> bool {
    match node {
        Node::Element(_) | Node::Cdata(_) => true,
        Node::Text(text) => !text.trim().is_empty(),
    }
}

fn format_element(out: &mut String, element: &Element, depth: usize) -> Result<(), SclError> {
    // `Private` blocks wrap opaque payloads; the first CDATA child is
    // emitted verbatim between the tag lines and everything else in the
    // block is dropped.
    if element.tag == "Private" {
        let payload = element.children.iter().find_map(|child| match child {
            Node::Cdata(content) => Some(content.as_str()),
            _ => None,
        });
        if let Some(content) = payload {
            write_indent(out, depth);
            write_tag_open(out, element)?;
            out.push_str(">\n");
            format_cdata(out, content, depth + 1);
            out.push('\n');
            write_indent(out, depth);
            write!(out, "</{}>", element.tag)?;
            return Ok(());
        }
    }

    let significant: Vec<&Node> = element
        .children
        .iter()
        .filter(|child| is_significant(child))
        .collect();

    match significant.as_slice() {
        // No content worth keeping, whitespace-only text included:
        // self-close.
        [] => {
            write_indent(out, depth);
            write_tag_open(out, element)?;
            out.push_str("/>");
        }
        // A single text child stays on the element's own line.
        [Node::Text(text)] => {
            write_indent(out, depth);
            write_tag_open(out, element)?;
            write!(out, ">{}</{}>", escape_xml(text.trim()), element.tag)?;
        }
        children => {
            write_indent(out, depth);
            write_tag_open(out, element)?;
            out.push_str(">\n");
            for child in children {
                format_node(out, child, depth + 1)?;
                out.push('\n');
            }
            write_indent(out, depth);
            write!(out, "</{}>", element.tag)?;
        }
    }
    Ok(())
}

fn format_node(out: &mut String, node: &Node, depth: usize) -> Result<(), SclError> {
    match node {
        Node::Element(element) => format_element(out, element, depth),
        // Text lines carry no indentation of their own.
        Node::Text(text) => {
            write!(out, "{}", escape_xml(text.trim()))?;
            Ok(())
        }
        Node::Cdata(content) => {
            format_cdata(out, content, depth);
            Ok(())
        }
    }
}

/// Writes `<Tag` plus the attribute list, without closing the tag.
fn write_tag_open(out: &mut String, element: &Element) -> Result<(), SclError> {
    write!(out, "<{}", element.tag)?;
    for attribute in &element.attributes {
        write!(out, " {}=\"{}\"", attribute.name, escape_xml(&attribute.value))?;
    }
    Ok(())
}

/// Emits a CDATA section at the given depth. The payload goes out raw,
/// with CRLF and lone CR collapsed to LF; nothing is escaped or
/// re-indented.
fn format_cdata(out: &mut String, content: &str, depth: usize) {
    write_indent(out, depth);
    out.push_str("<![CDATA[");
    out.push_str(&normalize_line_endings(content));
    out.push_str("]]>");
}

fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Collapses CRLF and lone CR line endings to LF.
fn normalize_line_endings(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    let mut normalized = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            normalized.push('\n');
        } else {
            normalized.push(c);
        }
    }
    Cow::Owned(normalized)
}

/// Escapes the five reserved characters for attribute values and text
/// content. The rewrite is character-wise, so ampersands introduced for
/// one character are never escaped again.
fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

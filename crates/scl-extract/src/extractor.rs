// crates/scl-extract/src/extractor.rs

//! Assembles a standalone, single-IED document out of a full SCL file.

use crate::closure::resolve_type_closure;
use crate::error::SclError;
use crate::filter::{filter_communication, filter_templates};
use crate::formatter::save_scl_to_string;
use crate::parser::load_scl_from_str;
use crate::tree::{Element, Node, SclDocument};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use log::debug;

/// Extracts the named IED from `document` into a new, self-contained
/// document.
///
/// The new root carries the source root's tag and attributes verbatim
/// and, in this order:
///
/// 1. the `Header` clone, when the source has one,
/// 2. the `Communication` section filtered to the IED's `ConnectedAP`s,
/// 3. the IED subtree clone,
/// 4. the `DataTypeTemplates` section filtered to the IED's type closure.
///
/// Sections that end up empty are omitted entirely. The source document
/// is left untouched.
///
/// # Errors
/// Returns [`SclError::IedNotFound`] if no `<IED>` child of the root has
/// the requested `name`.
pub fn extract_ied(document: &SclDocument, ied_name: &str) -> Result<SclDocument, SclError> {
    let root = &document.root;
    let ied = document
        .ied(ied_name)
        .ok_or_else(|| SclError::IedNotFound(ied_name.to_string()))?;

    // 1. Compute the type closure before any section is rebuilt.
    let templates = root.find_child("DataTypeTemplates");
    let closure = resolve_type_closure(ied, templates);
    debug!(
        "closure for \"{}\": {} LNodeType, {} DOType, {} DAType",
        ied_name,
        closure.lnode_types.len(),
        closure.do_types.len(),
        closure.da_types.len()
    );

    // 2. Assemble the new root in the fixed section order.
    let mut children: Vec<Node> = Vec::new();
    if let Some(header) = root.find_child("Header") {
        children.push(Node::Element(header.clone()));
    }
    if let Some(communication) = root.find_child("Communication") {
        if let Some(filtered) = filter_communication(communication, ied_name) {
            children.push(Node::Element(filtered));
        }
    }
    children.push(Node::Element(ied.clone()));
    if let Some(templates) = templates {
        if let Some(filtered) = filter_templates(templates, &closure) {
            children.push(Node::Element(filtered));
        }
    }

    Ok(SclDocument {
        root: Element {
            tag: root.tag.clone(),
            attributes: root.attributes.clone(),
            children,
        },
    })
}

/// Parses `scl`, extracts the named IED and returns the canonical text of
/// the resulting document, ready to be written out as `<ied-name>.cid`.
///
/// # Errors
/// Returns an `SclError` if parsing fails or the IED does not exist.
pub fn extract_ied_to_string(scl: &str, ied_name: &str) -> Result<String, SclError> {
    let document = load_scl_from_str(scl)?;
    let extracted = extract_ied(&document, ied_name)?;
    save_scl_to_string(&extracted)
}

// crates/scl-extract/src/filter.rs

//! Narrows the `<Communication>` and `<DataTypeTemplates>` sections down
//! to a single IED.
//!
//! Both filters leave the source section untouched and build a reduced
//! copy, so one parsed document can serve any number of extractions.

use crate::closure::TypeClosure;
use crate::tree::{Element, Node};
use alloc::vec::Vec;
use log::debug;

/// Returns a copy of `<Communication>` reduced to the `SubNetwork`s that
/// connect the named IED, or `None` when no `SubNetwork` mentions it.
///
/// Within a surviving `SubNetwork`, `ConnectedAP` entries of other IEDs
/// are removed; all other children (`Text`, `BitRate`, `Private`, ...)
/// ride along. Source order is preserved throughout.
pub fn filter_communication(communication: &Element, ied_name: &str) -> Option<Element> {
    let mut subnetworks = 0usize;
    let mut children = Vec::new();

    for child in &communication.children {
        match child {
            Node::Element(element) if element.tag == "SubNetwork" => {
                if let Some(filtered) = filter_subnetwork(element, ied_name) {
                    subnetworks += 1;
                    children.push(Node::Element(filtered));
                }
            }
            other => children.push(other.clone()),
        }
    }

    if subnetworks == 0 {
        debug!("no SubNetwork connects \"{}\"; dropping Communication", ied_name);
        return None;
    }
    Some(Element {
        tag: communication.tag.clone(),
        attributes: communication.attributes.clone(),
        children,
    })
}

/// Returns a copy of one `SubNetwork` holding only the named IED's
/// `ConnectedAP` entries, or `None` when it has none.
fn filter_subnetwork(subnetwork: &Element, ied_name: &str) -> Option<Element> {
    let mut connected = 0usize;
    let mut children = Vec::new();

    for child in &subnetwork.children {
        match child {
            Node::Element(element) if element.tag == "ConnectedAP" => {
                if element.attr("iedName") == Some(ied_name) {
                    connected += 1;
                    children.push(child.clone());
                }
            }
            other => children.push(other.clone()),
        }
    }

    if connected == 0 {
        return None;
    }
    Some(Element {
        tag: subnetwork.tag.clone(),
        attributes: subnetwork.attributes.clone(),
        children,
    })
}

/// Returns a copy of `<DataTypeTemplates>` holding only the definitions
/// in `closure`, or `None` when no element children remain.
///
/// `EnumType` definitions are always retained; the closure does not track
/// enum references. Unknown element kinds ride along untouched.
pub fn filter_templates(templates: &Element, closure: &TypeClosure) -> Option<Element> {
    let mut elements = 0usize;
    let mut children = Vec::new();

    for child in &templates.children {
        match child {
            Node::Element(element) => {
                if retain_definition(element, closure) {
                    elements += 1;
                    children.push(child.clone());
                }
            }
            other => children.push(other.clone()),
        }
    }

    if elements == 0 {
        debug!("closure retains no definitions; dropping DataTypeTemplates");
        return None;
    }
    Some(Element {
        tag: templates.tag.clone(),
        attributes: templates.attributes.clone(),
        children,
    })
}

/// Membership test for one type definition.
fn retain_definition(definition: &Element, closure: &TypeClosure) -> bool {
    let id = definition.attr("id");
    match definition.tag.as_str() {
        "LNodeType" => id.is_some_and(|id| closure.lnode_types.contains(id)),
        "DOType" => id.is_some_and(|id| closure.do_types.contains(id)),
        "DAType" => id.is_some_and(|id| closure.da_types.contains(id)),
        "EnumType" => true,
        _ => true,
    }
}

// crates/scl-extract/src/closure.rs

//! Transitive closure of data type definitions referenced by an IED.
//!
//! Seeds are the `lnType` references of every logical node in the IED
//! subtree. From the seeds, `DO` and `SDO` references are chased through
//! `DOType` definitions and `DA` and `BDA` references through `DAType`
//! definitions. `EnumType` definitions are not chased; the template filter
//! retains them unconditionally.

use crate::tree::Element;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use log::warn;

/// The set of type definition ids an IED needs to be self-contained.
///
/// Membership is the sole criterion the template filter applies, so ids
/// that never resolved to a definition are harmless members.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TypeClosure {
    /// `LNodeType` ids named by `lnType` attributes.
    pub lnode_types: BTreeSet<String>,
    /// `DOType` ids reachable through `DO` and `SDO` references.
    pub do_types: BTreeSet<String>,
    /// `DAType` ids reachable through `DA` and `BDA` references.
    pub da_types: BTreeSet<String>,
}

/// One-pass id lookup over the `<DataTypeTemplates>` children, so the
/// closure walk stays linear in the library size.
struct TemplateIndex<'a> {
    lnode_types: BTreeMap<&'a str, &'a Element>,
    do_types: BTreeMap<&'a str, &'a Element>,
    da_types: BTreeMap<&'a str, &'a Element>,
    enum_types: BTreeSet<&'a str>,
}

impl<'a> TemplateIndex<'a> {
    fn new(templates: Option<&'a Element>) -> Self {
        let mut index = TemplateIndex {
            lnode_types: BTreeMap::new(),
            do_types: BTreeMap::new(),
            da_types: BTreeMap::new(),
            enum_types: BTreeSet::new(),
        };
        let Some(templates) = templates else {
            return index;
        };
        for definition in templates.child_elements() {
            let Some(id) = definition.attr("id") else {
                continue;
            };
            match definition.tag.as_str() {
                "LNodeType" => {
                    index.lnode_types.insert(id, definition);
                }
                "DOType" => {
                    index.do_types.insert(id, definition);
                }
                "DAType" => {
                    index.da_types.insert(id, definition);
                }
                "EnumType" => {
                    index.enum_types.insert(id);
                }
                _ => {}
            }
        }
        index
    }
}

/// Computes the ids of every type definition transitively referenced by
/// the IED's logical nodes.
///
/// References to ids absent from the library are logged and skipped; a
/// partial or missing `<DataTypeTemplates>` section never aborts an
/// extraction.
///
/// # Arguments
/// * `ied` - The `<IED>` element whose logical nodes seed the walk.
/// * `templates` - The document's `<DataTypeTemplates>` element, if any.
pub fn resolve_type_closure(ied: &Element, templates: Option<&Element>) -> TypeClosure {
    // 1. Seed: every logical node in the IED subtree names an LNodeType.
    let mut lnode_types = BTreeSet::new();
    for node in ied.descendants() {
        if node.tag != "LN0" && node.tag != "LN" {
            continue;
        }
        if let Some(ln_type) = node.attr("lnType") {
            lnode_types.insert(ln_type.to_string());
        }
    }

    let mut closure = TypeClosure {
        lnode_types,
        do_types: BTreeSet::new(),
        da_types: BTreeSet::new(),
    };
    if templates.is_none() {
        // No library to resolve against; the seeds alone make up the
        // closure.
        return closure;
    }
    let index = TemplateIndex::new(templates);

    // 2. Chase DO references into the DOType graph, collecting the DA
    // references encountered along the way.
    let mut pending_da: BTreeSet<String> = BTreeSet::new();
    for ln_type in &closure.lnode_types {
        let Some(definition) = index.lnode_types.get(ln_type.as_str()) else {
            warn!("LNodeType \"{}\" is referenced but not defined; skipping", ln_type);
            continue;
        };
        for reference in definition.child_elements() {
            if reference.tag != "DO" {
                continue;
            }
            if let Some(do_type) = reference.attr("type") {
                visit_do_type(do_type, &index, &mut closure.do_types, &mut pending_da);
            }
        }
    }

    // 3. Chase the collected DA references through the DAType graph.
    for da_type in &pending_da {
        visit_da_type(da_type, &index, &mut closure.da_types);
    }

    closure
}

/// Marks a `DOType` id as reachable, collects its `DA` references for the
/// second phase and recurses into nested `SDO` references. Re-visits are
/// no-ops, which also bounds the walk on cyclic definitions.
fn visit_do_type(
    id: &str,
    index: &TemplateIndex<'_>,
    do_types: &mut BTreeSet<String>,
    pending_da: &mut BTreeSet<String>,
) {
    if !do_types.insert(id.to_string()) {
        return;
    }
    let Some(definition) = index.do_types.get(id) else {
        warn!("DOType \"{}\" is referenced but not defined; skipping", id);
        return;
    };
    for reference in definition.child_elements() {
        match reference.tag.as_str() {
            "DA" => {
                if let Some(da_type) = reference.attr("type") {
                    pending_da.insert(da_type.to_string());
                }
            }
            "SDO" => {
                if let Some(sdo_type) = reference.attr("type") {
                    visit_do_type(sdo_type, index, do_types, pending_da);
                }
            }
            _ => {}
        }
    }
}

/// Marks a `DAType` id as reachable and recurses into its `BDA`
/// references. `DA`/`BDA` type attributes legitimately name EnumType ids;
/// those are not part of the DAType walk.
fn visit_da_type(id: &str, index: &TemplateIndex<'_>, da_types: &mut BTreeSet<String>) {
    if index.enum_types.contains(id) {
        return;
    }
    if !da_types.insert(id.to_string()) {
        return;
    }
    let Some(definition) = index.da_types.get(id) else {
        warn!("DAType \"{}\" is referenced but not defined; skipping", id);
        return;
    };
    for reference in definition.child_elements() {
        if reference.tag != "BDA" {
            continue;
        }
        if let Some(bda_type) = reference.attr("type") {
            visit_da_type(bda_type, index, da_types);
        }
    }
}

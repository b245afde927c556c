// src/lib.rs

#![no_std]
#![doc = "Extracts single-IED configuration files from IEC 61850 SCL documents."]
#![doc = ""]
#![doc = "This `no_std + alloc` library takes a full substation description (SCD,"]
#![doc = "ICD, ...) and produces a standalone, canonically formatted document"]
#![doc = "for one IED, suitable for saving as `<ied-name>.cid`."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `load_scl_from_str`: Parsing SCL text into an ordered tree."]
#![doc = "- `extract_ied`: Reducing Communication and DataTypeTemplates to one IED."]
#![doc = "- `save_scl_to_string`: Deterministic canonical serialisation."]
#![doc = "- `extract_ied_to_string`: The three steps in one call."]

extern crate alloc;

// --- Crate Modules ---

mod closure;
mod error;
mod extractor;
mod filter;
mod formatter;
mod parser;
mod tree;

// --- Public API Re-exports ---

pub use closure::{resolve_type_closure, TypeClosure};
pub use error::SclError;
pub use extractor::{extract_ied, extract_ied_to_string};
pub use filter::{filter_communication, filter_templates};
pub use formatter::{format_scl_str, save_scl_to_string};
pub use parser::load_scl_from_str;
pub use tree::{Attribute, Element, Node, SclDocument};

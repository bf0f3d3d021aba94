//! Shallow-merge patch semantics for partial updates
//!
//! An update payload overwrites documents one top-level field at a time: a
//! nested object in the patch fully replaces the stored nested value, it is
//! not merged per-subfield. The identifier is stripped from every patch so
//! identity can never be reassigned.

use serde_json::{Map, Value};

/// Remove the identifier field from a payload, if present.
pub fn strip_id(fields: &mut Map<String, Value>) {
    fields.remove("_id");
}

/// Apply a patch to a stored document, overwriting top-level fields.
pub fn apply(document: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        document.insert(key, value);
    }
}

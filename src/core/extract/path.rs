//! Tolerant path resolution over bundle JSON
//!
//! Clinical exports are deeply nested and irregularly shaped; a missing
//! segment anywhere must degrade to a null field, never abort a batch. This
//! module resolves dotted/indexed path expressions (`code.coding[0].code`)
//! against a [`serde_json::Value`] under that contract.

use crate::domain::reference::strip_reference_prefixes;
use serde_json::Value;

/// Resolves a path expression against a resource.
///
/// Path segments are separated by dots; array elements are addressed with
/// bracketed integer indices (`address[0].city`). Returns [`Value::Null`]
/// when any segment is absent, the current value is not the right container
/// kind, an index is out of range, or the input is null. The path literal
/// `resourceType` is resolved directly against the root's resource type tag.
///
/// A string result has every known reference prefix stripped, so values
/// pulled from `*.reference` fields are immediately usable as join keys.
///
/// # Examples
///
/// ```
/// use edsan::core::extract::path::resolve;
/// use serde_json::json;
///
/// let resource = json!({"code": {"coding": [{"code": "718-7"}]}});
/// assert_eq!(resolve(&resource, "code.coding[0].code"), json!("718-7"));
/// assert_eq!(resolve(&resource, "code.coding[3].code"), json!(null));
///
/// let resource = json!({"subject": {"reference": "Patient/p1"}});
/// assert_eq!(resolve(&resource, "subject.reference"), json!("p1"));
/// ```
pub fn resolve(resource: &Value, path: &str) -> Value {
    match resolve_raw(resource, path) {
        Value::String(s) => Value::String(strip_reference_prefixes(&s)),
        other => other,
    }
}

/// Resolves a path expression without touching the result.
///
/// Same traversal rules as [`resolve`], but string results are returned
/// verbatim. The built-in extraction rules use this for content fields
/// (document text, labels) where a reference prefix occurring inside the
/// payload must not be rewritten; they canonicalize reference fields
/// explicitly instead.
pub fn resolve_raw(resource: &Value, path: &str) -> Value {
    if path.is_empty() || resource.is_null() {
        return Value::Null;
    }

    // The resource type tag lives at the root regardless of nesting rules.
    if path == "resourceType" {
        return resource.get("resourceType").cloned().unwrap_or(Value::Null);
    }

    // "address[0].city" becomes the segments ["address", "0", "city"]
    let normalized = path.replace('[', ".").replace(']', "");
    let mut current = resource;

    for segment in normalized.split('.').filter(|s| !s.is_empty()) {
        let next = if segment.bytes().all(|b| b.is_ascii_digit()) {
            segment
                .parse::<usize>()
                .ok()
                .and_then(|idx| current.as_array().and_then(|arr| arr.get(idx)))
        } else {
            current.as_object().and_then(|obj| obj.get(segment))
        };

        match next {
            Some(value) => current = value,
            None => return Value::Null,
        }
    }

    current.clone()
}

/// Resolves a path and keeps only non-empty string results.
pub fn resolve_string(resource: &Value, path: &str) -> Option<String> {
    match resolve(resource, path) {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

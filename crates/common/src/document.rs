//! Free-form JSON documents
//!
//! Jobs and bids accept any JSON object. Only a handful of fields are
//! interpreted by the server; everything else is stored and returned as-is.

use serde_json::{Map, Value};

use crate::error::Error;

/// A stored JSON object
pub type Document = Map<String, Value>;

/// Key under which the store-assigned identifier is exposed to clients
pub const ID_FIELD: &str = "_id";

/// Convert a request body into a storable document.
///
/// Only JSON objects are accepted. A client-supplied `_id` is dropped since
/// identifiers are assigned by the store or taken from the request path.
pub fn into_document(value: Value) -> Result<Document, Error> {
    match value {
        Value::Object(mut map) => {
            map.remove(ID_FIELD);
            Ok(map)
        }
        other => Err(Error::Validation(format!(
            "Request body must be a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

/// Read a string at a dotted path, e.g. `["buyer", "email"]`.
pub fn str_at<'a>(doc: &'a Document, path: &[&str]) -> Option<&'a str> {
    let (last, parents) = path.split_last()?;
    let mut current = doc;
    for key in parents {
        current = current.get(*key)?.as_object()?;
    }
    current.get(*last)?.as_str()
}

/// Overwrite top-level fields of `doc` with those of `patch`.
///
/// Returns `true` when at least one field changed.
pub fn merge_top_level(doc: &mut Document, patch: Document) -> bool {
    let mut changed = false;
    for (key, value) in patch {
        if key == ID_FIELD {
            continue;
        }
        if doc.get(&key) != Some(&value) {
            doc.insert(key, value);
            changed = true;
        }
    }
    changed
}

#[mutants::skip] // Only shapes the rejection message
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Identity resolution
//!
//! Computes the stable IRI of an entity from its class metadata and its
//! numeric `id` field.

use serde_json::Value;

use crate::config::HydraConfig;
use crate::metadata::ClassMetadata;
use crate::resource::{FieldValue, HydraResource};
use crate::vocab::ID_FIELD;

/// Placeholder in entity path templates
const ID_PLACEHOLDER: &str = "{id}";

/// Read the numeric identifier of a resource
///
/// Never fails: a missing, unreadable or non-numeric `id` is logged and
/// resolves to `0`.
pub fn compute_id(resource: &dyn HydraResource) -> i64 {
    let class = resource.class_name();

    match resource.field(ID_FIELD) {
        Some(FieldValue::Scalar(value)) => match numeric_id(&value) {
            Some(id) => id,
            None => {
                tracing::warn!(
                    class = %class,
                    value = %value,
                    "identifier is not numeric, using 0"
                );
                0
            }
        },
        Some(other) => {
            tracing::warn!(
                class = %class,
                kind = other.kind(),
                "identifier is not a scalar, using 0"
            );
            0
        }
        None => {
            tracing::warn!(class = %class, "identifier field is unreadable, using 0");
            0
        }
    }
}

/// Only JSON integers are identifiers; "117" is text
fn numeric_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Default path segment for a class: lowercase name plus `s`
///
/// "Event" -> "events"
pub fn pluralize(class_name: &str) -> String {
    format!("{}s", class_name.to_lowercase())
}

/// Path of the collection holding instances of a class
///
/// Uses the declared collection path or `<api>/<plural>/`.
pub fn collection_path(config: &HydraConfig, meta: &ClassMetadata) -> String {
    match meta.collection_path.as_deref() {
        Some(path) if !path.is_empty() => join_path(config.api_path(), path),
        _ => format!("{}/{}/", config.api_path(), pluralize(&meta.name)),
    }
}

/// IRI of one entity
///
/// Uses the declared entity path (with `{id}` substituted, or the id
/// appended) or the collection path followed by the id.
pub fn entity_iri(config: &HydraConfig, meta: &ClassMetadata, id: i64) -> String {
    match meta.entity_path.as_deref() {
        Some(template) if !template.is_empty() => {
            let path = join_path(config.api_path(), template);
            if path.contains(ID_PLACEHOLDER) {
                path.replace(ID_PLACEHOLDER, &id.to_string())
            } else {
                format!("{}{}", path, id)
            }
        }
        _ => format!(
            "{}/{}",
            collection_path(config, meta).trim_end_matches('/'),
            id
        ),
    }
}

/// Append a declared path to the API path, with exactly one slash between
fn join_path(api_path: &str, path: &str) -> String {
    format!("{}/{}", api_path, path.trim_start_matches('/'))
}

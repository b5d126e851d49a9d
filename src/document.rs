//! Entity and collection documents
//!
//! Builds the JSON-LD body returned for a handler result: a full document
//! for one entity, or a Hydra collection of member links.

use serde_json::{Map, Value};

use crate::config::HydraConfig;
use crate::error::HydraError;
use crate::id::{collection_path, compute_id, entity_iri};
use crate::link::{link_object, resolve_link, LinkMode};
use crate::metadata::Catalog;
use crate::resource::{FieldValue, HydraResource};
use crate::vocab::{COLLECTION_SUFFIX, MEMBERS};

/// A handler result handed over by the response interceptor
pub enum Payload<'a> {
    /// A single domain object
    Entity(&'a dyn HydraResource),
    /// An ordered group of domain objects
    Collection(Vec<&'a dyn HydraResource>),
    /// Anything else; passed through untouched
    Plain(String),
}

/// Serializes a single entity with `@context`, `@id` and `@type`
///
/// For example:
///
/// ```text
/// {
///     "@context": "/hydra/event-api/contexts/Event",
///     "@id": "/hydra/event-api/events/117",
///     "@type": "Event",
///     "name": "HOST",
///     "description": "the host",
///     "venue": {"@id": "/hydra/event-api/venues/3", "@type": "http://schema.org/Place"}
/// }
/// ```
///
/// Returns `HydraError::MetadataMissing` when the class has no declaration,
/// telling the caller to fall back to a generic representation.
pub fn build_entity(
    catalog: &Catalog,
    config: &HydraConfig,
    resource: &dyn HydraResource,
) -> Result<Value, HydraError> {
    let class_name = resource.class_name();
    let meta = catalog
        .class_metadata(class_name)
        .ok_or_else(|| HydraError::MetadataMissing {
            class: class_name.to_string(),
        })?;

    let mut doc = Map::new();
    doc.insert(
        "@context".to_string(),
        Value::String(config.context_iri(class_name)),
    );
    doc.insert(
        "@id".to_string(),
        Value::String(entity_iri(config, &meta, compute_id(resource))),
    );
    doc.insert("@type".to_string(), Value::String(class_name.to_string()));

    let fields = catalog.field_metadata(class_name);

    // Scalars first, in declaration order
    for field in fields
        .iter()
        .filter(|f| !f.excluded && !f.is_link() && !f.is_identifier())
    {
        match resource.field(&field.name) {
            Some(FieldValue::Scalar(Value::Null)) => {}
            Some(FieldValue::Scalar(v)) => {
                doc.insert(field.name.clone(), v);
            }
            Some(other) => {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    kind = other.kind(),
                    "plain field holds a link, omitted"
                );
            }
            None => {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    "field is unreadable, omitted"
                );
            }
        }
    }

    // Then one reference entry per link field
    for field in fields.iter().filter(|f| !f.excluded && f.is_link()) {
        let value = match resource.field(&field.name) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    "link field is unreadable, omitted"
                );
                continue;
            }
        };

        match resolve_link(catalog, config, &value, LinkMode::Entity) {
            Some(link) => {
                doc.insert(field.name.clone(), link);
            }
            None => {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    kind = value.kind(),
                    "link field holds a plain value, omitted"
                );
            }
        }
    }

    Ok(Value::Object(doc))
}

/// Serializes a group of entities as a Hydra collection
///
/// An empty group is the bare array `[]`. Otherwise the collection takes its
/// identity from the first item's class and lists every item as a member
/// link, in input order.
pub fn build_collection(
    catalog: &Catalog,
    config: &HydraConfig,
    items: &[&dyn HydraResource],
) -> Value {
    let first = match items.first() {
        Some(first) => *first,
        None => return Value::Array(Vec::new()),
    };

    let class_name = first.class_name();
    let meta = catalog.class_metadata_or_default(class_name);
    let collection_type = format!("{}{}", class_name, COLLECTION_SUFFIX);

    let members: Vec<Value> = items
        .iter()
        .map(|item| link_object(catalog, config, *item, LinkMode::Collection))
        .collect();

    let mut doc = Map::new();
    doc.insert(
        "@context".to_string(),
        Value::String(config.context_iri(&collection_type)),
    );
    doc.insert(
        "@id".to_string(),
        Value::String(collection_path(config, &meta)),
    );
    doc.insert("@type".to_string(), Value::String(collection_type));
    doc.insert(MEMBERS.to_string(), Value::Array(members));

    Value::Object(doc)
}

/// Render a handler result to the response body
///
/// Entities without metadata fall back to their plain representation.
pub fn render(
    catalog: &Catalog,
    config: &HydraConfig,
    payload: Payload<'_>,
) -> Result<String, HydraError> {
    match payload {
        Payload::Collection(items) => to_json_string(&build_collection(catalog, config, &items)),
        Payload::Entity(resource) => match build_entity(catalog, config, resource) {
            Ok(doc) => to_json_string(&doc),
            Err(HydraError::MetadataMissing { class }) => {
                tracing::debug!(class = %class, "no hypermedia metadata, rendering plain value");
                Ok(resource.plain())
            }
            Err(e) => Err(e),
        },
        Payload::Plain(body) => Ok(body),
    }
}

/// Serialize a document compactly
pub fn to_json_string(doc: &Value) -> Result<String, HydraError> {
    Ok(serde_json::to_string(doc)?)
}

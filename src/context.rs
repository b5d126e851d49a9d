//! Context documents
//!
//! Builds the `@context` blocks served for a class, for a collection of a
//! class, and for the API entry point.

use serde_json::{json, Map, Value};

use crate::config::HydraConfig;
use crate::metadata::{Catalog, VocabMapping};
use crate::vocab::{
    namespace_mappings, vocab_term, COLLECTION_SUFFIX, ENTRY_POINT, HYDRA_MEMBER, MEMBERS,
};

/// Context for one class
///
/// Emits the class term, one mapping per vocabulary-mapped field, then one
/// mapping per link field. Undeclared classes still get their schema.org
/// type.
pub fn for_class(catalog: &Catalog, config: &HydraConfig, class_name: &str) -> Value {
    let mut context = Map::new();

    let meta = match catalog.class_metadata(class_name) {
        Some(meta) => meta,
        None => {
            tracing::warn!(class = %class_name, "building context for undeclared class");
            catalog.class_metadata_or_default(class_name)
        }
    };
    context.insert(
        class_name.to_string(),
        Value::String(meta.semantic_type.clone()),
    );

    let fields = catalog.field_metadata(class_name);

    for field in fields {
        let rendered = match &field.mapping {
            Some(VocabMapping::Iri(iri)) => Value::String(iri.clone()),
            Some(VocabMapping::Expanded(pairs)) => Value::Object(
                pairs
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
            None => continue,
        };
        context.insert(field.name.clone(), rendered);
    }

    for field in fields {
        if let Some(relation) = &field.link {
            context.insert(field.name.clone(), Value::String(relation.clone()));
        }
    }

    wrap_context(config, context)
}

/// Context for a collection of `class_name` items
pub fn for_collection(config: &HydraConfig, class_name: &str) -> Value {
    let collection_type = format!("{}{}", class_name, COLLECTION_SUFFIX);

    let mut context = Map::new();
    context.insert(
        collection_type.clone(),
        Value::String(vocab_term(&collection_type)),
    );
    context.insert(MEMBERS.to_string(), Value::String(HYDRA_MEMBER.to_string()));

    wrap_context(config, context)
}

/// Context for the entry point, with one IRI-valued property per link
pub fn for_entry_point<S: AsRef<str>>(config: &HydraConfig, links: &[S]) -> Value {
    let mut context = Map::new();
    context.insert(ENTRY_POINT.to_string(), Value::String(vocab_term(ENTRY_POINT)));

    for link in links {
        let link = link.as_ref();
        context.insert(
            link.to_string(),
            json!({
                "@id": vocab_term(&format!("{}/{}", ENTRY_POINT, link)),
                "@type": "@id"
            }),
        );
    }

    wrap_context(config, context)
}

/// Append the namespace prefixes and wrap in `{"@context": ...}`
fn wrap_context(config: &HydraConfig, mut context: Map<String, Value>) -> Value {
    for (prefix, iri) in namespace_mappings(config.vocab_address()) {
        context.insert(prefix, iri);
    }

    let mut wrapper = Map::new();
    wrapper.insert("@context".to_string(), Value::Object(context));
    Value::Object(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{ClassDescriptor, FieldDescriptor};

    fn config() -> HydraConfig {
        HydraConfig::new("http://example.org/api", "http://example.org/api/vocab").unwrap()
    }

    fn keys(doc: &Value) -> Vec<String> {
        doc["@context"].as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_for_class() {
        let catalog = Catalog::new().with(
            ClassDescriptor::new("Event")
                .semantic_type("http://schema.org/Event")
                .field(FieldDescriptor::new("id"))
                .field(FieldDescriptor::link("venue", "http://schema.org/location"))
                .field(FieldDescriptor::new("name").vocab("http://schema.org/name"))
                .field(
                    FieldDescriptor::new("startDate").vocab_keyed(
                        ["@id", "@type"],
                        ["http://schema.org/startDate", "xsd:dateTime"],
                    ),
                ),
        );

        let doc = for_class(&catalog, &config(), "Event");
        let ctx = &doc["@context"];

        assert_eq!(ctx["Event"], json!("http://schema.org/Event"));
        assert_eq!(ctx["name"], json!("http://schema.org/name"));
        assert_eq!(
            ctx["startDate"],
            json!({"@id": "http://schema.org/startDate", "@type": "xsd:dateTime"})
        );
        assert_eq!(ctx["venue"], json!("http://schema.org/location"));
        assert_eq!(ctx["hydra"], json!("http://www.w3.org/ns/hydra/core#"));
        assert_eq!(ctx["vocab"], json!("http://example.org/api/vocab#"));

        assert_eq!(
            keys(&doc),
            vec!["Event", "name", "startDate", "venue", "hydra", "vocab"]
        );
    }

    #[test]
    fn test_for_class_skips_malformed_field() {
        let catalog = Catalog::new().with(
            ClassDescriptor::new("Event")
                .field(FieldDescriptor::new("bad").vocab_keyed(["a", "b"], ["x"]))
                .field(FieldDescriptor::new("name").vocab("http://schema.org/name")),
        );

        let doc = for_class(&catalog, &config(), "Event");
        assert!(doc["@context"].get("bad").is_none());
        assert_eq!(doc["@context"]["Event"], json!("http://schema.org/Event"));
        assert_eq!(doc["@context"]["name"], json!("http://schema.org/name"));
    }

    #[test]
    fn test_for_undeclared_class() {
        let doc = for_class(&Catalog::new(), &config(), "Venue");
        assert_eq!(doc["@context"]["Venue"], json!("http://schema.org/Venue"));
        assert_eq!(keys(&doc), vec!["Venue", "hydra", "vocab"]);
    }

    #[test]
    fn test_for_collection() {
        let doc = for_collection(&config(), "Event");
        assert_eq!(
            doc,
            json!({
                "@context": {
                    "EventCollection": "vocab:EventCollection",
                    "members": "http://www.w3.org/ns/hydra/core#member",
                    "hydra": "http://www.w3.org/ns/hydra/core#",
                    "vocab": "http://example.org/api/vocab#"
                }
            })
        );
        assert_eq!(keys(&doc), vec!["EventCollection", "members", "hydra", "vocab"]);
    }

    #[test]
    fn test_for_entry_point() {
        let doc = for_entry_point(&config(), &["events", "venues"]);
        assert_eq!(keys(&doc), vec!["EntryPoint", "events", "venues", "hydra", "vocab"]);
        assert_eq!(doc["@context"]["EntryPoint"], json!("vocab:EntryPoint"));
        assert_eq!(
            doc["@context"]["venues"],
            json!({"@id": "vocab:EntryPoint/venues", "@type": "@id"})
        );
    }
}

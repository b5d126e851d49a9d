//! Vocabulary definitions for Hydra documents
//!
//! Namespaces and fixed terms shared by the document, context and
//! vocabulary builders.

use serde_json::{Map, Value};

/// Hydra core namespace
pub const HYDRA_NS: &str = "http://www.w3.org/ns/hydra/core#";

/// Hydra `member` property, used for collection members
pub const HYDRA_MEMBER: &str = "http://www.w3.org/ns/hydra/core#member";

/// Hydra `apiDocumentation` link relation
pub const HYDRA_API_DOCUMENTATION: &str = "http://www.w3.org/ns/hydra/core#apiDocumentation";

/// Fallback vocabulary for classes without a declared semantic type
pub const SCHEMA_ORG_NS: &str = "http://schema.org/";

/// Prefix under which the `hydra` namespace is exposed in contexts
pub const HYDRA_PREFIX: &str = "hydra";

/// Prefix under which the API vocabulary is exposed in contexts
pub const VOCAB_PREFIX: &str = "vocab";

/// Property holding collection members
pub const MEMBERS: &str = "members";

/// Suffix appended to a class name to name its collection type
pub const COLLECTION_SUFFIX: &str = "Collection";

/// Name of the entry point class
pub const ENTRY_POINT: &str = "EntryPoint";

/// Conventional name of the identifier field
pub const ID_FIELD: &str = "id";

/// Media type of every document produced by this crate
pub const JSONLD_MEDIA_TYPE: &str = "application/ld+json";

/// Name of the root fragment of the API documentation
pub const ROOT_FRAGMENT: &str = "vocab.json";

/// Placeholder in the root fragment replaced by the API address
pub const API_ADDR_TOKEN: &str = "API_ADDR";

/// Placeholder in the root fragment replaced by the vocabulary address
pub const VOCAB_ADDR_TOKEN: &str = "VOCAB_ADDR";

/// Property of the API documentation listing supported classes
pub const SUPPORTED_CLASS: &str = "supportedClass";

/// Default semantic type for a class without a declaration
pub fn schema_org_type(class_name: &str) -> String {
    format!("{}{}", SCHEMA_ORG_NS, class_name)
}

/// Compact `vocab:` term for a name
pub fn vocab_term(name: &str) -> String {
    format!("{}:{}", VOCAB_PREFIX, name)
}

/// Namespace mappings appended to every generated context
pub fn namespace_mappings(vocab_address: &str) -> Map<String, Value> {
    let mut mappings = Map::new();
    mappings.insert(HYDRA_PREFIX.to_string(), Value::String(HYDRA_NS.to_string()));
    mappings.insert(
        VOCAB_PREFIX.to_string(),
        Value::String(format!("{}#", vocab_address)),
    );
    mappings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_org_type() {
        assert_eq!(schema_org_type("Event"), "http://schema.org/Event");
    }

    #[test]
    fn test_namespace_mappings() {
        let ns = namespace_mappings("http://example.org/api/vocab");
        assert_eq!(ns.get("hydra"), Some(&Value::String(HYDRA_NS.to_string())));
        assert_eq!(
            ns.get("vocab"),
            Some(&Value::String("http://example.org/api/vocab#".to_string()))
        );
    }
}

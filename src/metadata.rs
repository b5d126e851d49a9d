//! Metadata catalog
//!
//! Static per-type declarations replace runtime annotations: each domain
//! type describes itself once with a `ClassDescriptor`, and the `Catalog`
//! validates those declarations into `ClassMetadata` and ordered
//! `FieldMetadata` lists that the builders read.

use std::collections::HashMap;
use std::sync::Arc;

use crate::vocab::{schema_org_type, ID_FIELD};

/// Declaration of one field, as written by the domain type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    vocab_values: Vec<String>,
    vocab_keys: Vec<String>,
    link: Option<String>,
    include_in_collection: bool,
    excluded: bool,
}

impl FieldDescriptor {
    /// A plain field, serialized with its scalar value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vocab_values: Vec::new(),
            vocab_keys: Vec::new(),
            link: None,
            include_in_collection: false,
            excluded: false,
        }
    }

    /// A field referencing other entities through `relation`
    pub fn link(name: impl Into<String>, relation: impl Into<String>) -> Self {
        let mut field = Self::new(name);
        field.link = Some(relation.into());
        field
    }

    /// Map the field to a single vocabulary IRI
    pub fn vocab(mut self, iri: impl Into<String>) -> Self {
        self.vocab_values = vec![iri.into()];
        self.vocab_keys.clear();
        self
    }

    /// Map the field to several keyed values, e.g. `@id` and `@type`
    pub fn vocab_keyed<K, V>(mut self, keys: K, values: V) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        self.vocab_keys = keys.into_iter().map(Into::into).collect();
        self.vocab_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Inline this field into link objects built for collection members
    pub fn in_collection(mut self) -> Self {
        self.include_in_collection = true;
        self
    }

    /// Never serialize this field
    pub fn excluded(mut self) -> Self {
        self.excluded = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a vocabulary mapping was declared at all
    fn has_vocab(&self) -> bool {
        !self.vocab_values.is_empty() || !self.vocab_keys.is_empty()
    }
}

/// Declaration of one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    name: String,
    semantic_type: Option<String>,
    collection_path: Option<String>,
    entity_path: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            semantic_type: None,
            collection_path: None,
            entity_path: None,
            fields: Vec::new(),
        }
    }

    /// Semantic type IRI; defaults to `http://schema.org/<Name>`
    pub fn semantic_type(mut self, iri: impl Into<String>) -> Self {
        self.semantic_type = Some(iri.into());
        self
    }

    /// Collection path relative to the API path, e.g. `/people/`
    pub fn collection_path(mut self, path: impl Into<String>) -> Self {
        self.collection_path = Some(path.into());
        self
    }

    /// Entity path template relative to the API path
    ///
    /// `{id}` is replaced by the identifier; without it the identifier is
    /// appended.
    pub fn entity_path(mut self, path: impl Into<String>) -> Self {
        self.entity_path = Some(path.into());
        self
    }

    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Resolved class-level metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMetadata {
    pub name: String,
    /// Always resolved: declared IRI or the schema.org fallback
    pub semantic_type: String,
    pub collection_path: Option<String>,
    pub entity_path: Option<String>,
}

impl ClassMetadata {
    /// Metadata for a class nobody declared
    pub fn fallback(name: &str) -> Self {
        Self {
            name: name.to_string(),
            semantic_type: schema_org_type(name),
            collection_path: None,
            entity_path: None,
        }
    }
}

/// Vocabulary mapping of a field inside a context document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabMapping {
    /// `"field": "<iri>"`
    Iri(String),
    /// `"field": { key: value, ... }`
    Expanded(Vec<(String, String)>),
}

/// Resolved field-level metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    pub name: String,
    pub mapping: Option<VocabMapping>,
    /// Target relation IRI when the field links to other entities
    pub link: Option<String>,
    pub include_in_collection: bool,
    pub excluded: bool,
}

impl FieldMetadata {
    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }

    /// Whether the field is the identifier, carried by `@id`
    pub fn is_identifier(&self) -> bool {
        self.name == ID_FIELD
    }
}

/// Why a vocabulary declaration was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
enum MappingError {
    NoValues,
    Arity { keys: usize, values: usize },
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::NoValues => write!(f, "no mapping values declared"),
            MappingError::Arity { keys, values } => {
                write!(f, "{} keys declared for {} values", keys, values)
            }
        }
    }
}

/// Turn the raw key/value lists of a descriptor into a mapping
fn resolve_mapping(keys: &[String], values: &[String]) -> Result<VocabMapping, MappingError> {
    if values.is_empty() {
        return Err(MappingError::NoValues);
    }

    if keys.is_empty() && values.len() == 1 {
        return Ok(VocabMapping::Iri(values[0].clone()));
    }

    if keys.len() != values.len() {
        return Err(MappingError::Arity {
            keys: keys.len(),
            values: values.len(),
        });
    }

    Ok(VocabMapping::Expanded(
        keys.iter().cloned().zip(values.iter().cloned()).collect(),
    ))
}

#[derive(Debug)]
struct CatalogEntry {
    class: Arc<ClassMetadata>,
    fields: Vec<FieldMetadata>,
}

/// Registry of hypermedia declarations, keyed by class name
///
/// Built at startup and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration
    pub fn with(mut self, descriptor: ClassDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Validate and register a class declaration
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(&mut self, descriptor: ClassDescriptor) {
        let class_name = descriptor.name;
        let mut fields = Vec::with_capacity(descriptor.fields.len());

        for field in descriptor.fields {
            let mapping = if field.has_vocab() {
                match resolve_mapping(&field.vocab_keys, &field.vocab_values) {
                    Ok(mapping) => Some(mapping),
                    Err(e) => {
                        tracing::warn!(
                            class = %class_name,
                            field = %field.name,
                            error = %e,
                            "skipping malformed vocabulary mapping"
                        );
                        None
                    }
                }
            } else {
                None
            };

            if fields.iter().any(|f: &FieldMetadata| f.name == field.name) {
                tracing::warn!(
                    class = %class_name,
                    field = %field.name,
                    "skipping duplicate field declaration"
                );
                continue;
            }

            fields.push(FieldMetadata {
                name: field.name,
                mapping,
                link: field.link,
                include_in_collection: field.include_in_collection,
                excluded: field.excluded,
            });
        }

        let class = ClassMetadata {
            semantic_type: descriptor
                .semantic_type
                .unwrap_or_else(|| schema_org_type(&class_name)),
            name: class_name.clone(),
            collection_path: descriptor.collection_path,
            entity_path: descriptor.entity_path,
        };

        tracing::debug!(class = %class_name, fields = fields.len(), "registered class");

        self.entries.insert(
            class_name,
            CatalogEntry {
                class: Arc::new(class),
                fields,
            },
        );
    }

    /// Class metadata, or `None` when the class carries no declaration
    pub fn class_metadata(&self, class_name: &str) -> Option<Arc<ClassMetadata>> {
        self.entries.get(class_name).map(|e| Arc::clone(&e.class))
    }

    /// Class metadata with the schema.org fallback for undeclared classes
    pub fn class_metadata_or_default(&self, class_name: &str) -> Arc<ClassMetadata> {
        self.class_metadata(class_name)
            .unwrap_or_else(|| Arc::new(ClassMetadata::fallback(class_name)))
    }

    /// Field metadata in declaration order; empty for undeclared classes
    pub fn field_metadata(&self, class_name: &str) -> &[FieldMetadata] {
        self.entries
            .get(class_name)
            .map(|e| e.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.entries.contains_key(class_name)
    }

    /// Names of all registered classes, sorted
    pub fn class_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

//! Entry points for response interceptors
//!
//! `Hydra` bundles the configuration, the metadata catalog and the API
//! documentation so a host can build it once at startup and share it.

use serde_json::Value;

use crate::apidoc::ApiDocumentation;
use crate::config::HydraConfig;
use crate::context;
use crate::document::{self, Payload};
use crate::error::HydraError;
use crate::loader::FragmentSource;
use crate::metadata::Catalog;
use crate::resource::HydraResource;

#[derive(Debug)]
pub struct Hydra {
    config: HydraConfig,
    catalog: Catalog,
    docs: ApiDocumentation,
}

impl Hydra {
    pub fn new(
        config: HydraConfig,
        catalog: Catalog,
        fragments: impl FragmentSource + 'static,
    ) -> Self {
        let docs = ApiDocumentation::new(&config, fragments);
        Self {
            config,
            catalog,
            docs,
        }
    }

    pub fn config(&self) -> &HydraConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Full document for one entity
    pub fn entity_document(&self, resource: &dyn HydraResource) -> Result<String, HydraError> {
        let doc = document::build_entity(&self.catalog, &self.config, resource)?;
        document::to_json_string(&doc)
    }

    /// Collection document, or `[]` for no items
    pub fn collection_document(
        &self,
        items: &[&dyn HydraResource],
    ) -> Result<String, HydraError> {
        document::to_json_string(&document::build_collection(
            &self.catalog,
            &self.config,
            items,
        ))
    }

    /// Body for an arbitrary handler result
    pub fn render(&self, payload: Payload<'_>) -> Result<String, HydraError> {
        document::render(&self.catalog, &self.config, payload)
    }

    pub fn context_for_class(&self, class_name: &str) -> Value {
        context::for_class(&self.catalog, &self.config, class_name)
    }

    pub fn context_for_collection(&self, class_name: &str) -> Value {
        context::for_collection(&self.config, class_name)
    }

    pub fn context_for_entry_point<S: AsRef<str>>(&self, links: &[S]) -> Value {
        context::for_entry_point(&self.config, links)
    }

    /// The merged API documentation, built once per `Hydra`
    pub fn vocabulary_document(&self) -> Result<&str, HydraError> {
        match self.docs.build() {
            "" => Err(HydraError::VocabularyUnavailable),
            doc => Ok(doc),
        }
    }

    /// `Link` header value advertising the API documentation
    pub fn api_documentation_link(&self) -> String {
        self.config.api_documentation_link()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticSource;
    use crate::metadata::ClassDescriptor;

    fn hydra(fragments: StaticSource) -> Hydra {
        let config =
            HydraConfig::new("http://example.org/api", "http://example.org/api/vocab").unwrap();
        Hydra::new(
            config,
            Catalog::new().with(ClassDescriptor::new("Event")),
            fragments,
        )
    }

    #[test]
    fn test_vocabulary_unavailable() {
        let hydra = hydra(StaticSource::new());
        assert!(matches!(
            hydra.vocabulary_document(),
            Err(HydraError::VocabularyUnavailable)
        ));
    }

    #[test]
    fn test_vocabulary_available() {
        let hydra = hydra(StaticSource::new().with("vocab.json", "{\"@id\": \"VOCAB_ADDR\"}"));
        assert_eq!(
            hydra.vocabulary_document().unwrap(),
            "{\"@id\":\"http://example.org/api/vocab\",\"supportedClass\":[]}"
        );
    }

    #[test]
    fn test_context_shortcuts() {
        let hydra = hydra(StaticSource::new());
        assert_eq!(
            hydra.context_for_class("Event")["@context"]["Event"],
            "http://schema.org/Event"
        );
        assert!(hydra.context_for_collection("Event")["@context"]
            .get("EventCollection")
            .is_some());
        assert!(hydra.context_for_entry_point(&["events"])["@context"]
            .get("events")
            .is_some());
    }
}

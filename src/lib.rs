//! Hydra JSON-LD Document Synthesis
//!
//! This library augments plain server responses with JSON-LD / Hydra
//! hypermedia metadata. Given a domain object, a group of them, or a class
//! name, it synthesizes documents carrying identity (`@id`), semantic
//! typing (`@type`), vocabulary mappings (`@context`) and links between
//! entities.
//!
//! # Overview
//!
//! Domain types describe themselves once, at startup, with a
//! [`ClassDescriptor`] and expose their field values through
//! [`HydraResource`]. From there:
//!
//! 1. Entity documents carry every plain field plus a reference object per
//!    link field; related entities are never embedded
//! 2. Collection documents list their items as `members` links, inlining
//!    the fields flagged for collection previews
//! 3. Context documents map class and field names to vocabulary IRIs
//! 4. The API documentation is merged from JSON fragments once and cached
//!
//! Request interception is left to the host: an interceptor calls
//! [`Hydra`] with a handler result and forwards the returned document.
//!
//! # Usage
//!
//! ```ignore
//! use hydra_jsonld::{
//!     Catalog, ClassDescriptor, DirectorySource, FieldDescriptor, Hydra, HydraConfig,
//! };
//!
//! let config = HydraConfig::new(
//!     "http://localhost:8080/hydra/event-api",
//!     "http://localhost:8080/hydra/event-api/vocab",
//! )?;
//! let catalog = Catalog::new().with(
//!     ClassDescriptor::new("Event")
//!         .semantic_type("http://schema.org/Event")
//!         .field(FieldDescriptor::new("name").vocab("http://schema.org/name").in_collection())
//!         .field(FieldDescriptor::link("venue", "http://schema.org/location")),
//! );
//! let hydra = Hydra::new(config, catalog, DirectorySource::new("public/vocab"));
//!
//! let body = hydra.entity_document(&event)?;
//! ```

pub mod apidoc;
pub mod config;
pub mod context;
pub mod document;
pub mod error;
pub mod hydra;
pub mod id;
pub mod link;
pub mod loader;
pub mod metadata;
pub mod resource;
pub mod vocab;

// Re-export main types for convenience
pub use crate::apidoc::ApiDocumentation;
pub use crate::config::{HydraConfig, HydraSettings};
pub use crate::document::{build_collection, build_entity, render, to_json_string, Payload};
pub use crate::error::HydraError;
pub use crate::hydra::Hydra;
pub use crate::link::LinkMode;
pub use crate::loader::{DirectorySource, FragmentSource, StaticSource};
pub use crate::metadata::{
    Catalog, ClassDescriptor, ClassMetadata, FieldDescriptor, FieldMetadata, VocabMapping,
};
pub use crate::resource::{FieldValue, HydraResource};
pub use crate::vocab::{HYDRA_NS, JSONLD_MEDIA_TYPE, SCHEMA_ORG_NS};

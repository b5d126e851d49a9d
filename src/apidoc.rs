//! API documentation assembly
//!
//! Merges the root fragment and the per-class fragments of a
//! `FragmentSource` into one Hydra `ApiDocumentation`. The merged document is
//! built on first use and cached for the lifetime of the value.

use std::sync::OnceLock;

use serde_json::Value;

use crate::config::HydraConfig;
use crate::error::HydraError;
use crate::loader::FragmentSource;
use crate::vocab::{API_ADDR_TOKEN, ROOT_FRAGMENT, SUPPORTED_CLASS, VOCAB_ADDR_TOKEN};

pub struct ApiDocumentation {
    source: Box<dyn FragmentSource>,
    api_address: String,
    vocab_address: String,
    cache: OnceLock<String>,
}

impl ApiDocumentation {
    pub fn new(config: &HydraConfig, source: impl FragmentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            api_address: config.api_address().to_string(),
            vocab_address: config.vocab_address().to_string(),
            cache: OnceLock::new(),
        }
    }

    /// The merged document
    ///
    /// Built once; later calls return the cached text even if the fragments
    /// have changed or disappeared since. Empty when the root fragment could
    /// not be read or parsed.
    pub fn build(&self) -> &str {
        self.cache.get_or_init(|| self.assemble())
    }

    /// Whether the document was built successfully
    pub fn is_available(&self) -> bool {
        !self.build().is_empty()
    }

    fn assemble(&self) -> String {
        tracing::info!("building API documentation");

        let merged = match self.merge() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(error = %e, "failed to build API documentation");
                return String::new();
            }
        };

        match serde_json::to_string(&merged) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize API documentation");
                String::new()
            }
        }
    }

    fn merge(&self) -> Result<Value, HydraError> {
        let raw = self.source.read(ROOT_FRAGMENT)?;
        let text = raw
            .replace(API_ADDR_TOKEN, &self.api_address)
            .replace(VOCAB_ADDR_TOKEN, &self.vocab_address);

        let mut root: Value =
            serde_json::from_str(&text).map_err(|source| HydraError::InvalidFragment {
                name: ROOT_FRAGMENT.to_string(),
                source,
            })?;

        let root_obj = root.as_object_mut().ok_or_else(|| HydraError::ResourceRead {
            name: ROOT_FRAGMENT.to_string(),
            reason: "root fragment is not a JSON object".to_string(),
        })?;

        let supported = root_obj
            .entry(SUPPORTED_CLASS)
            .or_insert_with(|| Value::Array(Vec::new()));
        if !supported.is_array() {
            tracing::warn!("root {} is not an array, replacing it", SUPPORTED_CLASS);
            *supported = Value::Array(Vec::new());
        }

        let fragments = self.load_fragments();
        tracing::info!(fragments = fragments.len(), "merging class fragments");

        if let Value::Array(classes) = supported {
            classes.extend(fragments);
        }

        Ok(root)
    }

    /// Parse every fragment other than the root, in name order
    ///
    /// A fragment that cannot be read or parsed is skipped on its own.
    fn load_fragments(&self) -> Vec<Value> {
        let mut names = match self.source.list() {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(error = %e, "cannot list class fragments");
                return Vec::new();
            }
        };
        names.retain(|n| n != ROOT_FRAGMENT);
        names.sort();

        let mut fragments = Vec::with_capacity(names.len());
        for name in names {
            match self.load_fragment(&name) {
                Ok(fragment) => fragments.push(fragment),
                Err(e) => {
                    tracing::warn!(fragment = %name, error = %e, "skipping class fragment");
                }
            }
        }
        fragments
    }

    fn load_fragment(&self, name: &str) -> Result<Value, HydraError> {
        let content = self.source.read(name)?;
        serde_json::from_str(&content).map_err(|source| HydraError::InvalidFragment {
            name: name.to_string(),
            source,
        })
    }
}

impl std::fmt::Debug for ApiDocumentation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiDocumentation")
            .field("api_address", &self.api_address)
            .field("vocab_address", &self.vocab_address)
            .field("built", &self.cache.get().is_some())
            .finish()
    }
}

//! Immutable address configuration
//!
//! Every IRI the builders emit is derived from one `HydraConfig`, constructed
//! once by the host and passed by reference into each builder.

use serde::Deserialize;
use url::Url;

use crate::error::HydraError;
use crate::vocab::HYDRA_API_DOCUMENTATION;

/// Raw settings as a host would deserialize them
#[derive(Debug, Clone, Deserialize)]
pub struct HydraSettings {
    /// Absolute address of the API root, e.g. `http://localhost:8080/hydra/api`
    pub api_address: String,
    /// Absolute address of the API documentation
    pub vocab_address: String,
    /// Path prefix used for entity and context IRIs (defaults to the path of
    /// `api_address`)
    #[serde(default)]
    pub api_path: Option<String>,
    /// Path prefix under which the host serves the API documentation
    /// (defaults to the path of `vocab_address`)
    #[serde(default)]
    pub vocab_path: Option<String>,
}

/// Validated, immutable addresses used for IRI construction
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "HydraSettings")]
pub struct HydraConfig {
    api_address: String,
    vocab_address: String,
    api_path: String,
    vocab_path: String,
}

impl HydraConfig {
    /// Build a configuration from two absolute addresses
    ///
    /// Path prefixes are taken from the addresses' paths.
    pub fn new(
        api_address: impl Into<String>,
        vocab_address: impl Into<String>,
    ) -> Result<Self, HydraError> {
        Self::try_from(HydraSettings {
            api_address: api_address.into(),
            vocab_address: vocab_address.into(),
            api_path: None,
            vocab_path: None,
        })
    }

    /// Override the path prefix used for entity, collection and context IRIs
    pub fn with_api_path(mut self, api_path: impl Into<String>) -> Self {
        self.api_path = normalize_path(&api_path.into());
        self
    }

    /// Override the path prefix of the API documentation
    pub fn with_vocab_path(mut self, vocab_path: impl Into<String>) -> Self {
        self.vocab_path = normalize_path(&vocab_path.into());
        self
    }

    pub fn api_address(&self) -> &str {
        &self.api_address
    }

    pub fn vocab_address(&self) -> &str {
        &self.vocab_address
    }

    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Route of the API documentation, for the host's router
    ///
    /// The builders emit absolute vocabulary IRIs and never read this.
    pub fn vocab_path(&self) -> &str {
        &self.vocab_path
    }

    /// IRI of the context resource for a name, e.g. `<api>/contexts/Event`
    pub fn context_iri(&self, name: &str) -> String {
        format!("{}/contexts/{}", self.api_path, name)
    }

    /// Value of the `Link` header pointing clients at the API documentation
    pub fn api_documentation_link(&self) -> String {
        format!(
            "<{}>; rel=\"{}\"",
            self.vocab_address, HYDRA_API_DOCUMENTATION
        )
    }
}

impl TryFrom<HydraSettings> for HydraConfig {
    type Error = HydraError;

    fn try_from(settings: HydraSettings) -> Result<Self, Self::Error> {
        let api = parse_address("api_address", &settings.api_address)?;
        let vocab = parse_address("vocab_address", &settings.vocab_address)?;

        let api_path = match settings.api_path {
            Some(p) => normalize_path(&p),
            None => normalize_path(api.path()),
        };
        let vocab_path = match settings.vocab_path {
            Some(p) => normalize_path(&p),
            None => normalize_path(vocab.path()),
        };

        Ok(Self {
            api_address: api.as_str().trim_end_matches('/').to_string(),
            vocab_address: vocab.as_str().trim_end_matches('/').to_string(),
            api_path,
            vocab_path,
        })
    }
}

/// Parse an address and require it to be absolute
fn parse_address(field: &'static str, value: &str) -> Result<Url, HydraError> {
    let url = Url::parse(value).map_err(|e| HydraError::InvalidAddress {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(HydraError::InvalidAddress {
            field,
            value: value.to_string(),
            reason: "address must be hierarchical".to_string(),
        });
    }

    Ok(url)
}

/// "/api/" -> "/api", "api" -> "/api", "/" -> ""
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derived_from_addresses() {
        let config = HydraConfig::new(
            "http://localhost:8080/hydra/event-api/",
            "http://localhost:8080/hydra/event-api/vocab",
        )
        .unwrap();

        assert_eq!(config.api_address(), "http://localhost:8080/hydra/event-api");
        assert_eq!(config.api_path(), "/hydra/event-api");
        assert_eq!(config.vocab_path(), "/hydra/event-api/vocab");
        assert_eq!(
            config.context_iri("Event"),
            "/hydra/event-api/contexts/Event"
        );
    }

    #[test]
    fn test_addresses_stored_in_parsed_form() {
        let config = HydraConfig::new(
            "http://example.org/a\"b/",
            "HTTP://Example.org/vocab",
        )
        .unwrap();
        assert_eq!(config.api_address(), "http://example.org/a%22b");
        assert_eq!(config.vocab_address(), "http://example.org/vocab");
    }

    #[test]
    fn test_root_address_has_empty_path() {
        let config =
            HydraConfig::new("http://example.org", "http://example.org/vocab").unwrap();
        assert_eq!(config.api_path(), "");
        assert_eq!(config.context_iri("Event"), "/contexts/Event");
    }

    #[test]
    fn test_path_overrides() {
        let config = HydraConfig::new("http://example.org/api", "http://example.org/vocab")
            .unwrap()
            .with_api_path("v2/")
            .with_vocab_path("/docs/");
        assert_eq!(config.api_path(), "/v2");
        assert_eq!(config.vocab_path(), "/docs");
    }

    #[test]
    fn test_relative_address_rejected() {
        let result = HydraConfig::new("/hydra/api", "http://example.org/vocab");
        assert!(matches!(
            result,
            Err(HydraError::InvalidAddress {
                field: "api_address",
                ..
            })
        ));

        let result = HydraConfig::new("http://example.org/api", "mailto:docs@example.org");
        assert!(matches!(
            result,
            Err(HydraError::InvalidAddress {
                field: "vocab_address",
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_settings() {
        let config: HydraConfig = serde_json::from_value(serde_json::json!({
            "api_address": "http://example.org/api",
            "vocab_address": "http://example.org/api/vocab",
            "api_path": "/public"
        }))
        .unwrap();

        assert_eq!(config.api_path(), "/public");
        assert_eq!(config.vocab_path(), "/api/vocab");
    }

    #[test]
    fn test_api_documentation_link() {
        let config =
            HydraConfig::new("http://example.org/api", "http://example.org/api/vocab").unwrap();
        assert_eq!(
            config.api_documentation_link(),
            "<http://example.org/api/vocab>; \
             rel=\"http://www.w3.org/ns/hydra/core#apiDocumentation\""
        );
    }
}

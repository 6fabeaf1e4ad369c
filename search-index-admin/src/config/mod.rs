//! Environment configuration and dependency wiring for the admin tool.

use std::env;

use search_index_gateway::config::DEFAULT_INDEX_NAME;
use search_index_gateway::opensearch::{DEFAULT_OPENSEARCH_URL, DEFAULT_TYPE_FIELD};
use search_index_gateway::{
    EngineClient, GatewayConfig, MockEngineClient, OpenSearchConfig, OpenSearchEngineClient,
    SearchIndexGateway, TypeMapping,
};
use tracing::{info, warn};

use crate::AdminError;

/// Which engine client the gateway is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    /// Send requests to OpenSearch.
    OpenSearch,
    /// Log requests instead of sending them.
    Mock,
}

impl EngineKind {
    /// Parse the engine kind.
    ///
    /// Valid values: "opensearch" or "mock" (case-insensitive).
    /// Defaults to "opensearch" if not set or invalid.
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "opensearch".to_string())
            .to_lowercase()
            .as_str()
        {
            "opensearch" => Self::OpenSearch,
            "mock" | "dry-run" | "dry_run" => Self::Mock,
            _ => {
                warn!("Invalid SEARCH_ENGINE, defaulting to 'opensearch'");
                Self::OpenSearch
            }
        }
    }
}

/// Settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    pub opensearch_url: String,
    pub index_name: String,
    pub type_mapping: TypeMapping,
    pub engine: EngineKind,
}

impl AdminConfig {
    /// Read configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX_NAME`: Index every command targets (default: searchables)
    /// - `SEARCH_TYPE_FIELD`: Document field holding the searchable type (default: searchable_type)
    /// - `SEARCH_ENGINE`: "opensearch" or "mock" (default: opensearch)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let opensearch_url =
            lookup("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let index_name =
            lookup("SEARCH_INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string());
        let type_field =
            lookup("SEARCH_TYPE_FIELD").unwrap_or_else(|| DEFAULT_TYPE_FIELD.to_string());

        Self {
            opensearch_url,
            index_name,
            type_mapping: TypeMapping::new(type_field),
            engine: EngineKind::parse(lookup("SEARCH_ENGINE")),
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Gateway wired to the configured engine.
    pub gateway: SearchIndexGateway<Box<dyn EngineClient>>,
}

impl Dependencies {
    /// Build the engine client and gateway described by `config`.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AdminError)` - If the OpenSearch client cannot be created
    pub fn new(config: &AdminConfig) -> Result<Self, AdminError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index_name = %config.index_name,
            type_field = %config.type_mapping.field(),
            engine = ?config.engine,
            "Initializing dependencies"
        );

        let client: Box<dyn EngineClient> = match config.engine {
            EngineKind::OpenSearch => {
                let opensearch_config = OpenSearchConfig::new(config.opensearch_url.clone())
                    .with_type_mapping(config.type_mapping.clone());
                let client = OpenSearchEngineClient::new(opensearch_config).map_err(|e| {
                    AdminError::config(format!("Failed to create OpenSearch client: {}", e))
                })?;
                Box::new(client)
            }
            EngineKind::Mock => Box::new(MockEngineClient::new().with_call_logging()),
        };

        let gateway = SearchIndexGateway::with_config(
            client,
            GatewayConfig::with_index_name(config.index_name.clone()),
        );

        Ok(Self { gateway })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AdminConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AdminConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.opensearch_url, "http://localhost:9200");
        assert_eq!(config.index_name, "searchables");
        assert_eq!(config.type_mapping, TypeMapping::default());
        assert_eq!(config.engine, EngineKind::OpenSearch);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("OPENSEARCH_URL", "http://search:9200"),
            ("SEARCH_INDEX_NAME", "products"),
            ("SEARCH_TYPE_FIELD", "kind"),
            ("SEARCH_ENGINE", "MOCK"),
        ]);
        assert_eq!(config.opensearch_url, "http://search:9200");
        assert_eq!(config.index_name, "products");
        assert_eq!(config.type_mapping, TypeMapping::new("kind"));
        assert_eq!(config.engine, EngineKind::Mock);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("SEARCH_ENGINE", "solr")]);
        assert_eq!(config.engine, EngineKind::OpenSearch);
    }

    #[test]
    fn test_dependencies_use_configured_index() {
        let config = config_from(&[("SEARCH_INDEX_NAME", "products"), ("SEARCH_ENGINE", "mock")]);
        let deps = Dependencies::new(&config).unwrap();
        assert_eq!(deps.gateway.index_name(), "products");
    }

    #[test]
    fn test_dependencies_reject_bad_url() {
        let config = config_from(&[("OPENSEARCH_URL", "::not a url::")]);
        let result = Dependencies::new(&config);
        assert!(matches!(result, Err(AdminError::ConfigError(_))));
    }
}

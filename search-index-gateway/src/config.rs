//! Configuration types for the SearchIndexGateway.

/// Default index targeted when no name is configured.
pub const DEFAULT_INDEX_NAME: &str = "searchables";

/// Configuration for the SearchIndexGateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Index every operation of the gateway targets until changed.
    pub index_name: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            index_name: DEFAULT_INDEX_NAME.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create a config targeting the given index.
    pub fn with_index_name(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
        }
    }
}

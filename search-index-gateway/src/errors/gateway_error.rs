//! Gateway error types.

use thiserror::Error;

use crate::errors::EngineError;

/// Errors returned by [`SearchIndexGateway`](crate::gateway::SearchIndexGateway).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    /// Dynamic input is not a searchable. Raised before any call reaches the
    /// engine.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error from the engine client, passed through unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl GatewayError {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_is_transparent() {
        let engine = EngineError::status(404, "index_not_found_exception");
        let err: GatewayError = engine.clone().into();

        assert_eq!(err.to_string(), engine.to_string());
        assert_eq!(err, GatewayError::Engine(engine));
    }

    #[test]
    fn test_invalid_input_message() {
        let err = GatewayError::invalid_input("Element 2 is not a searchable");
        assert_eq!(err.to_string(), "Invalid input: Element 2 is not a searchable");
    }
}

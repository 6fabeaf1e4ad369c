//! OpenSearch implementation of the engine client.
//!
//! This module provides a concrete implementation of `EngineClient`
//! using OpenSearch as the backend.

mod client;
mod index_config;

pub use client::OpenSearchEngineClient;
pub use index_config::{OpenSearchConfig, TypeMapping, DEFAULT_OPENSEARCH_URL, DEFAULT_TYPE_FIELD};

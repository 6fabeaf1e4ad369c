//! # Search Index Gateway
//!
//! This crate forwards index, delete, clear and search operations from any
//! [`Searchable`] domain object onto a search engine client. It owns the
//! target index name and builds the interleaved bulk payload for batched
//! upserts; everything else is left to the engine.
//!
//! It includes definitions for errors, the engine client interface, a
//! concrete implementation for OpenSearch and an in-memory mock engine.

pub mod config;
pub mod errors;
pub mod gateway;
pub mod interfaces;
pub mod mock;
pub mod opensearch;
pub mod searchable;
pub mod types;

pub use config::GatewayConfig;
pub use errors::{EngineError, GatewayError};
pub use gateway::SearchIndexGateway;
pub use interfaces::EngineClient;
pub use mock::{EngineCall, MockEngineClient};
pub use crate::opensearch::{OpenSearchConfig, OpenSearchEngineClient, TypeMapping};
pub use searchable::{Searchable, SearchableDocument, SearchableId};
pub use types::{
    ActionDescriptor, BulkOperation, BulkRequest, DeleteDocumentRequest, IndexDocumentRequest,
    SearchRequest, UpsertSubject,
};

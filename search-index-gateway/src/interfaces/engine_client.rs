//! Search engine client trait definition.
//!
//! This module defines the narrow capability the gateway needs from a search
//! engine, allowing for different backend implementations (OpenSearch, mock, etc.).

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::EngineError;
use crate::types::{BulkRequest, DeleteDocumentRequest, IndexDocumentRequest, SearchRequest};

/// Abstract interface for search engine operations.
///
/// Implementations perform the actual network calls. They own transport,
/// retries and timeouts; the gateway adds none of its own.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// Index a single document, replacing any document with the same id.
    async fn index(&self, request: IndexDocumentRequest) -> Result<(), EngineError>;

    /// Send a batch of upserts in one call.
    ///
    /// An empty request is still sent; how the engine answers is up to it.
    async fn bulk(&self, request: BulkRequest) -> Result<(), EngineError>;

    /// Delete a single document.
    ///
    /// Whether a missing document is an error is decided by the implementation.
    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), EngineError>;

    /// Delete a whole index with every document in it.
    async fn delete_index(&self, index_name: &str) -> Result<(), EngineError>;

    /// Execute a raw query and return the engine's response body as-is.
    async fn search(&self, query: SearchRequest) -> Result<Value, EngineError>;
}

#[async_trait]
impl<T: EngineClient + ?Sized> EngineClient for Box<T> {
    async fn index(&self, request: IndexDocumentRequest) -> Result<(), EngineError> {
        (**self).index(request).await
    }

    async fn bulk(&self, request: BulkRequest) -> Result<(), EngineError> {
        (**self).bulk(request).await
    }

    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), EngineError> {
        (**self).delete(request).await
    }

    async fn delete_index(&self, index_name: &str) -> Result<(), EngineError> {
        (**self).delete_index(index_name).await
    }

    async fn search(&self, query: SearchRequest) -> Result<Value, EngineError> {
        (**self).search(query).await
    }
}

#[async_trait]
impl<T: EngineClient + ?Sized> EngineClient for Arc<T> {
    async fn index(&self, request: IndexDocumentRequest) -> Result<(), EngineError> {
        (**self).index(request).await
    }

    async fn bulk(&self, request: BulkRequest) -> Result<(), EngineError> {
        (**self).bulk(request).await
    }

    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), EngineError> {
        (**self).delete(request).await
    }

    async fn delete_index(&self, index_name: &str) -> Result<(), EngineError> {
        (**self).delete_index(index_name).await
    }

    async fn search(&self, query: SearchRequest) -> Result<Value, EngineError> {
        (**self).search(query).await
    }
}

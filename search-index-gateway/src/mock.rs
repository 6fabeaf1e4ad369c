//! Mock engine client for testing and dry runs.
//!
//! The `MockEngineClient` records every call it receives instead of talking
//! to a search engine, allowing tests to assert on the exact requests the
//! gateway produced.
//!
//! # Example
//!
//! ```ignore
//! use search_index_gateway::{EngineCall, MockEngineClient, SearchIndexGateway};
//!
//! let gateway = SearchIndexGateway::new(MockEngineClient::new()).with_index_name("products");
//! gateway.clear_index().await?;
//!
//! assert_eq!(
//!     gateway.client().calls().await,
//!     vec![EngineCall::DeleteIndex("products".to_string())]
//! );
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::EngineError;
use crate::interfaces::EngineClient;
use crate::types::{BulkRequest, DeleteDocumentRequest, IndexDocumentRequest, SearchRequest};

/// A call received by [`MockEngineClient`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", content = "request", rename_all = "snake_case")]
pub enum EngineCall {
    Index(IndexDocumentRequest),
    Bulk(BulkRequest),
    Delete(DeleteDocumentRequest),
    DeleteIndex(String),
    Search(SearchRequest),
}

/// Engine client that records calls and answers from fixed data.
pub struct MockEngineClient {
    calls: Mutex<Vec<EngineCall>>,
    search_response: Value,
    failure: Option<EngineError>,
    log_calls: bool,
}

impl Default for MockEngineClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngineClient {
    /// A client that accepts every call and answers searches with no hits.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            search_response: json!({ "hits": { "total": { "value": 0 }, "hits": [] } }),
            failure: None,
            log_calls: false,
        }
    }

    /// A client that records every call and then fails it with `error`.
    pub fn failing_with(error: EngineError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Answer every search with `response`.
    pub fn with_search_response(mut self, response: Value) -> Self {
        self.search_response = response;
        self
    }

    /// Log each received call as JSON at info level.
    pub fn with_call_logging(mut self) -> Self {
        self.log_calls = true;
        self
    }

    /// All calls received so far, in order.
    pub async fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    async fn record(&self, call: EngineCall) -> Result<(), EngineError> {
        if self.log_calls {
            let payload = serde_json::to_string(&call)
                .map_err(|e| EngineError::serialization(e.to_string()))?;
            info!(call = %payload, "Mock engine received call");
        }

        self.calls.lock().await.push(call);

        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl EngineClient for MockEngineClient {
    async fn index(&self, request: IndexDocumentRequest) -> Result<(), EngineError> {
        self.record(EngineCall::Index(request)).await
    }

    async fn bulk(&self, request: BulkRequest) -> Result<(), EngineError> {
        self.record(EngineCall::Bulk(request)).await
    }

    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), EngineError> {
        self.record(EngineCall::Delete(request)).await
    }

    async fn delete_index(&self, index_name: &str) -> Result<(), EngineError> {
        self.record(EngineCall::DeleteIndex(index_name.to_string()))
            .await
    }

    async fn search(&self, query: SearchRequest) -> Result<Value, EngineError> {
        self.record(EngineCall::Search(query)).await?;
        Ok(self.search_response.clone())
    }
}

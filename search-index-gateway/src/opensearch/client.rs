//! OpenSearch engine client implementation.
//!
//! This module provides the concrete implementation of `EngineClient`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::IndicesDeleteParts,
    BulkParts, DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::EngineError;
use crate::interfaces::EngineClient;
use crate::opensearch::index_config::{OpenSearchConfig, TypeMapping};
use crate::types::{BulkRequest, DeleteDocumentRequest, IndexDocumentRequest, SearchRequest};

/// OpenSearch engine client.
///
/// Translates gateway requests onto the OpenSearch document, bulk, index and
/// search APIs. The searchable type is placed according to the configured
/// [`TypeMapping`], since OpenSearch rejects `_type` in requests.
///
/// Non-success HTTP statuses are returned as [`EngineError::Status`],
/// including 404 on delete. A bulk response that reports item failures is
/// returned as [`EngineError::BulkIndexError`].
///
/// # Example
///
/// ```ignore
/// use search_index_gateway::{OpenSearchConfig, OpenSearchEngineClient, TypeMapping};
///
/// let config = OpenSearchConfig::new("http://localhost:9200")
///     .with_type_mapping(TypeMapping::new("kind"));
/// let client = OpenSearchEngineClient::new(config)?;
/// ```
pub struct OpenSearchEngineClient {
    client: OpenSearch,
    type_mapping: TypeMapping,
}

impl OpenSearchEngineClient {
    /// Create a new client connected to the configured URL.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchEngineClient)` - A new client instance
    /// * `Err(EngineError)` - If the URL is invalid or transport setup fails
    pub fn new(config: OpenSearchConfig) -> Result<Self, EngineError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| EngineError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| EngineError::connection(e.to_string()))?;

        info!(
            url = %config.url,
            type_field = %config.type_mapping.field(),
            "Created OpenSearch engine client"
        );

        Ok(Self::from_transport(
            OpenSearch::new(transport),
            config.type_mapping,
        ))
    }

    /// Wrap an already configured OpenSearch client.
    pub fn from_transport(client: OpenSearch, type_mapping: TypeMapping) -> Self {
        Self {
            client,
            type_mapping,
        }
    }

    pub fn type_mapping(&self) -> &TypeMapping {
        &self.type_mapping
    }

    /// Document id and stored body of a single document upsert.
    fn index_document(&self, request: IndexDocumentRequest) -> (String, Value) {
        let doc_id = self
            .type_mapping
            .document_id(&request.searchable_type, &request.id);
        let document = self
            .type_mapping
            .document_body(&request.searchable_type, request.body);
        (doc_id, document)
    }

    fn delete_document_id(&self, request: &DeleteDocumentRequest) -> String {
        self.type_mapping
            .document_id(&request.searchable_type, &request.id)
    }

    /// Build the NDJSON lines of a bulk body.
    ///
    /// Each action line is immediately followed by its document. `_type` is
    /// dropped from the action and carried by the type mapping instead.
    fn bulk_lines(&self, request: BulkRequest) -> Vec<Value> {
        let mut lines = Vec::with_capacity(request.len() * 2);
        for operation in request.operations {
            let descriptor = operation.descriptor;
            let doc_id = self
                .type_mapping
                .document_id(&descriptor.searchable_type, &descriptor.id);

            lines.push(json!({
                "index": {
                    "_index": descriptor.index,
                    "_id": doc_id,
                }
            }));
            lines.push(
                self.type_mapping
                    .document_body(&descriptor.searchable_type, operation.document),
            );
        }
        lines
    }

    /// Turn a non-success response into an error carrying status and body.
    async fn ensure_success(
        response: Response,
        operation: &str,
    ) -> Result<Response, EngineError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, operation, "Request failed");
        Err(EngineError::status(status.as_u16(), error_body))
    }
}

/// Count the items of a bulk response that carry an error.
fn count_failed_items(response_body: &Value) -> usize {
    response_body
        .get("items")
        .and_then(|items| items.as_array())
        .map(|items| {
            items
                .iter()
                .filter(|item| {
                    item.as_object()
                        .map(|actions| actions.values().any(|r| r.get("error").is_some()))
                        .unwrap_or(false)
                })
                .count()
        })
        .unwrap_or(0)
}

/// A `null` query body is left out of the request instead of sent literally.
fn search_body(body: Value) -> Option<Value> {
    if body.is_null() {
        None
    } else {
        Some(body)
    }
}

#[async_trait]
impl EngineClient for OpenSearchEngineClient {
    async fn index(&self, request: IndexDocumentRequest) -> Result<(), EngineError> {
        let index = request.index.clone();
        let (doc_id, document) = self.index_document(request);

        let response = self
            .client
            .index(IndexParts::IndexId(&index, &doc_id))
            .body(document)
            .send()
            .await
            .map_err(|e| EngineError::index(e.to_string()))?;
        Self::ensure_success(response, "index").await?;

        debug!(index = %index, doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    async fn bulk(&self, request: BulkRequest) -> Result<(), EngineError> {
        let total = request.len();
        let body: Vec<JsonBody<Value>> = self
            .bulk_lines(request)
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::None)
            .body(body)
            .send()
            .await
            .map_err(|e| EngineError::bulk_index(e.to_string()))?;
        let response = Self::ensure_success(response, "bulk").await?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| EngineError::parse(e.to_string()))?;

        if response_body
            .get("errors")
            .and_then(|e| e.as_bool())
            .unwrap_or(false)
        {
            let failed = count_failed_items(&response_body);
            error!(failed, total, "Bulk request reported item failures");
            return Err(EngineError::bulk_index(format!(
                "{} of {} bulk items failed",
                failed, total
            )));
        }

        debug!(total, "Bulk request completed");
        Ok(())
    }

    async fn delete(&self, request: DeleteDocumentRequest) -> Result<(), EngineError> {
        let doc_id = self.delete_document_id(&request);

        let response = self
            .client
            .delete(DeleteParts::IndexId(&request.index, &doc_id))
            .send()
            .await
            .map_err(|e| EngineError::delete(e.to_string()))?;
        Self::ensure_success(response, "delete").await?;

        debug!(index = %request.index, doc_id = %doc_id, "Document deleted");
        Ok(())
    }

    async fn delete_index(&self, index_name: &str) -> Result<(), EngineError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index_name]))
            .send()
            .await
            .map_err(|e| EngineError::index_deletion(e.to_string()))?;
        Self::ensure_success(response, "delete_index").await?;

        info!(index = %index_name, "Index deleted");
        Ok(())
    }

    async fn search(&self, query: SearchRequest) -> Result<Value, EngineError> {
        let indices: Vec<&str> = query.indices.iter().map(String::as_str).collect();
        let parts = if indices.is_empty() {
            SearchParts::None
        } else {
            SearchParts::Index(indices.as_slice())
        };

        let search = self.client.search(parts);
        let response = match search_body(query.body) {
            Some(body) => search.body(body).send().await,
            None => search.send().await,
        }
        .map_err(|e| EngineError::search(e.to_string()))?;
        let response = Self::ensure_success(response, "search").await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| EngineError::parse(e.to_string()))
    }
}

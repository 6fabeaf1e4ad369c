//! Search index gateway implementation.
//!
//! This module provides the adapter application code uses to put searchable
//! objects into a search index, remove them, clear the index and run raw
//! queries against it.
//!
//! # Note on Upserts
//!
//! There is no separate `create` function. Indexing a document whose id already
//! exists replaces it, so `upsert_one` and `upsert_many` cover both cases.

use serde_json::Value;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::errors::GatewayError;
use crate::interfaces::EngineClient;
use crate::searchable::{Searchable, SearchableId};
use crate::types::{
    ActionDescriptor, BulkOperation, BulkRequest, DeleteDocumentRequest, IndexDocumentRequest,
    SearchRequest, UpsertSubject,
};

/// Adapter between [`Searchable`] objects and an [`EngineClient`].
///
/// Every operation targets the gateway's index name. Changing it requires
/// `&mut self`, so a gateway shared between tasks needs the caller's own
/// synchronisation; one gateway per index avoids that entirely.
///
/// Types and ids are forwarded as given; engine errors are returned unchanged
/// inside [`GatewayError::Engine`]. Dynamic input that is not a searchable is
/// rejected by [`UpsertSubject::from_json`] before a gateway call is made.
///
/// # Example
///
/// ```no_run
/// use search_index_gateway::{
///     OpenSearchConfig, OpenSearchEngineClient, SearchIndexGateway, SearchableDocument,
/// };
/// use serde_json::{json, Map};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = OpenSearchEngineClient::new(OpenSearchConfig::new("http://localhost:9200"))?;
/// let gateway = SearchIndexGateway::new(client).with_index_name("products");
///
/// let mut body = Map::new();
/// body.insert("name".to_string(), json!("Widget"));
/// gateway
///     .upsert_one(&SearchableDocument::new(1, "product", body))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct SearchIndexGateway<C> {
    client: C,
    index_name: String,
}

impl<C: EngineClient> SearchIndexGateway<C> {
    /// Create a gateway with the default configuration.
    pub fn new(client: C) -> Self {
        Self::with_config(client, GatewayConfig::default())
    }

    /// Create a gateway with a custom configuration.
    pub fn with_config(client: C, config: GatewayConfig) -> Self {
        Self {
            client,
            index_name: config.index_name,
        }
    }

    /// Builder form of [`set_index_name`](Self::set_index_name).
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Set the index targeted by all subsequent operations.
    ///
    /// The name is not validated; the engine rejects bad names when used.
    pub fn set_index_name(&mut self, index_name: impl Into<String>) -> &mut Self {
        self.index_name = index_name.into();
        self
    }

    /// The index currently targeted.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Add or update one searchable or a sequence of them.
    ///
    /// Dispatches to [`upsert_one`](Self::upsert_one) or
    /// [`upsert_many`](Self::upsert_many).
    pub async fn upsert_to_index<S: Searchable>(
        &self,
        subject: UpsertSubject<S>,
    ) -> Result<(), GatewayError> {
        match subject {
            UpsertSubject::Single(item) => self.upsert_one(&item).await,
            UpsertSubject::Many(items) => self.upsert_many(&items).await,
        }
    }

    /// Index a single searchable with one index call.
    pub async fn upsert_one<S: Searchable + ?Sized>(
        &self,
        subject: &S,
    ) -> Result<(), GatewayError> {
        let request = IndexDocumentRequest {
            index: self.index_name.clone(),
            searchable_type: subject.searchable_type(),
            id: subject.searchable_id(),
            body: subject.searchable_body(),
        };

        debug!(
            index = %request.index,
            searchable_type = %request.searchable_type,
            id = %request.id,
            "Upserting document"
        );

        self.client.index(request).await?;
        Ok(())
    }

    /// Index a sequence of searchables with exactly one bulk call.
    ///
    /// The whole batch is built before anything is sent. An empty slice still
    /// sends an empty bulk request. A single element is sent as a one-entry
    /// batch, not through the single document path.
    pub async fn upsert_many<S: Searchable>(&self, subjects: &[S]) -> Result<(), GatewayError> {
        let operations = subjects
            .iter()
            .map(|subject| BulkOperation {
                descriptor: ActionDescriptor {
                    id: subject.searchable_id(),
                    index: self.index_name.clone(),
                    searchable_type: subject.searchable_type(),
                },
                document: subject.searchable_body(),
            })
            .collect();
        let request = BulkRequest { operations };

        debug!(
            index = %self.index_name,
            operations = request.len(),
            "Sending bulk upsert"
        );

        self.client.bulk(request).await?;
        Ok(())
    }

    /// Remove the given searchable from the index.
    pub async fn remove_from_index<S: Searchable + ?Sized>(
        &self,
        subject: &S,
    ) -> Result<(), GatewayError> {
        self.delete_document(subject.searchable_type(), subject.searchable_id())
            .await
    }

    /// Remove a document by type and id without materializing a searchable.
    pub async fn remove_from_index_by_type_and_id(
        &self,
        searchable_type: &str,
        id: impl Into<SearchableId>,
    ) -> Result<(), GatewayError> {
        self.delete_document(searchable_type.to_string(), id.into())
            .await
    }

    /// Delete the whole index named by the current index name.
    ///
    /// Irreversible. Callers are responsible for guarding this.
    pub async fn clear_index(&self) -> Result<(), GatewayError> {
        debug!(index = %self.index_name, "Clearing index");
        self.client.delete_index(&self.index_name).await?;
        Ok(())
    }

    /// Run a raw query and return the engine's response untouched.
    pub async fn get_results(&self, query: SearchRequest) -> Result<Value, GatewayError> {
        Ok(self.client.search(query).await?)
    }

    /// The underlying client, for operations the gateway does not wrap.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Consume the gateway and return the underlying client.
    pub fn into_client(self) -> C {
        self.client
    }

    async fn delete_document(
        &self,
        searchable_type: String,
        id: SearchableId,
    ) -> Result<(), GatewayError> {
        let request = DeleteDocumentRequest {
            index: self.index_name.clone(),
            searchable_type,
            id,
        };

        debug!(
            index = %request.index,
            searchable_type = %request.searchable_type,
            id = %request.id,
            "Removing document"
        );

        self.client.delete(request).await?;
        Ok(())
    }
}

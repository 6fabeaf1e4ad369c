//! Request types exchanged between the gateway and an engine client.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::errors::GatewayError;
use crate::searchable::{Searchable, SearchableDocument, SearchableId};

/// Request to index (create or replace) a single document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocumentRequest {
    pub index: String,
    #[serde(rename = "type")]
    pub searchable_type: String,
    pub id: SearchableId,
    pub body: Map<String, Value>,
}

/// Request to delete a single document by type and id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteDocumentRequest {
    pub index: String,
    #[serde(rename = "type")]
    pub searchable_type: String,
    pub id: SearchableId,
}

/// Coordinates of one bulk action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionDescriptor {
    #[serde(rename = "_id")]
    pub id: SearchableId,
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type")]
    pub searchable_type: String,
}

impl ActionDescriptor {
    /// The descriptor line as sent in a bulk body: `{"index": {...}}`.
    pub fn to_value(&self) -> Value {
        json!({ "index": self })
    }
}

/// One upsert inside a bulk request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkOperation {
    pub descriptor: ActionDescriptor,
    pub document: Map<String, Value>,
}

/// An ordered batch of upserts sent as a single bulk call.
///
/// Operations keep the order of the input sequence. Each descriptor is
/// immediately followed by its own document on the wire; the bulk protocol
/// rejects any other arrangement.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkRequest {
    pub operations: Vec<BulkOperation>,
}

impl BulkRequest {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Flatten into the interleaved `[descriptor, document, ...]` body, 2N entries.
    pub fn to_payload(&self) -> Vec<Value> {
        let mut body = Vec::with_capacity(self.operations.len() * 2);
        for operation in &self.operations {
            body.push(operation.descriptor.to_value());
            body.push(Value::Object(operation.document.clone()));
        }
        body
    }
}

/// A raw query passed to the engine's search endpoint.
///
/// The gateway forwards it unmodified, so `indices` is not filled in from
/// the gateway's index name. An empty list searches every index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub indices: Vec<String>,
    #[serde(default)]
    pub body: Value,
}

impl SearchRequest {
    pub fn new(body: Value) -> Self {
        Self {
            indices: Vec::new(),
            body,
        }
    }

    /// Restrict the query to one more index.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.indices.push(index.into());
        self
    }
}

/// What to upsert: one searchable or a sequence handled as one batch.
#[derive(Debug, Clone)]
pub enum UpsertSubject<S> {
    Single(S),
    Many(Vec<S>),
}

impl UpsertSubject<SearchableDocument> {
    /// Build a subject from dynamic JSON input.
    ///
    /// An object becomes [`UpsertSubject::Single`] and an array of objects
    /// becomes [`UpsertSubject::Many`]. Each object must have the shape of a
    /// [`SearchableDocument`]. Any other value, or any malformed element,
    /// rejects the whole input.
    pub fn from_json(value: Value) -> Result<Self, GatewayError> {
        match value {
            Value::Object(_) => serde_json::from_value(value)
                .map(UpsertSubject::Single)
                .map_err(|e| {
                    GatewayError::invalid_input(format!("Subject is not a searchable: {}", e))
                }),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(position, item)| {
                    serde_json::from_value(item).map_err(|e| {
                        GatewayError::invalid_input(format!(
                            "Element {} is not a searchable: {}",
                            position, e
                        ))
                    })
                })
                .collect::<Result<Vec<SearchableDocument>, _>>()
                .map(UpsertSubject::Many),
            other => Err(GatewayError::invalid_input(format!(
                "Subject must be a searchable or array of searchables, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<S: Searchable> UpsertSubject<S> {
    /// Number of searchables carried by the subject.
    pub fn len(&self) -> usize {
        match self {
            UpsertSubject::Single(_) => 1,
            UpsertSubject::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Searchable> From<Vec<S>> for UpsertSubject<S> {
    fn from(items: Vec<S>) -> Self {
        UpsertSubject::Many(items)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str) -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!(name));
        body
    }

    fn operation(id: i64, name: &str) -> BulkOperation {
        BulkOperation {
            descriptor: ActionDescriptor {
                id: SearchableId::Int(id),
                index: "products".to_string(),
                searchable_type: "product".to_string(),
            },
            document: body(name),
        }
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let descriptor = operation(1, "Widget").descriptor;
        assert_eq!(
            descriptor.to_value(),
            json!({"index": {"_id": 1, "_index": "products", "_type": "product"}})
        );
    }

    #[test]
    fn test_payload_interleaves_descriptor_and_document() {
        let request = BulkRequest {
            operations: vec![operation(1, "Widget"), operation(2, "Gadget")],
        };

        assert_eq!(
            request.to_payload(),
            vec![
                json!({"index": {"_id": 1, "_index": "products", "_type": "product"}}),
                json!({"name": "Widget"}),
                json!({"index": {"_id": 2, "_index": "products", "_type": "product"}}),
                json!({"name": "Gadget"}),
            ]
        );
    }

    #[test]
    fn test_empty_payload() {
        let request = BulkRequest::default();
        assert!(request.is_empty());
        assert!(request.to_payload().is_empty());
    }

    #[test]
    fn test_index_request_serializes_with_type_key() {
        let request = IndexDocumentRequest {
            index: "products".to_string(),
            searchable_type: "product".to_string(),
            id: SearchableId::Int(1),
            body: body("Widget"),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"index": "products", "type": "product", "id": 1, "body": {"name": "Widget"}})
        );
    }

    #[test]
    fn test_subject_from_json_object() {
        let subject =
            UpsertSubject::from_json(json!({"id": 1, "type": "product", "body": {}})).unwrap();
        assert!(matches!(subject, UpsertSubject::Single(_)));
        assert_eq!(subject.len(), 1);
    }

    #[test]
    fn test_subject_from_json_array() {
        let subject = UpsertSubject::from_json(json!([
            {"id": 1, "type": "product", "body": {"name": "Widget"}},
            {"id": "b", "type": "tag"}
        ]))
        .unwrap();
        assert_eq!(subject.len(), 2);
    }

    #[test]
    fn test_subject_from_json_empty_array() {
        let subject = UpsertSubject::from_json(json!([])).unwrap();
        assert!(subject.is_empty());
    }

    #[test]
    fn test_subject_from_json_rejects_scalars() {
        for value in [json!(null), json!(3), json!("doc"), json!(true)] {
            let result = UpsertSubject::from_json(value);
            assert!(matches!(result, Err(GatewayError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_subject_from_json_rejects_bad_element() {
        let result = UpsertSubject::from_json(json!([
            {"id": 1, "type": "product", "body": {}},
            "not a searchable"
        ]));
        match result {
            Err(GatewayError::InvalidInput(msg)) => assert!(msg.starts_with("Element 1")),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_search_request_builder() {
        let request =
            SearchRequest::new(json!({"query": {"match_all": {}}})).with_index("products");
        assert_eq!(request.indices, vec!["products".to_string()]);
    }
}

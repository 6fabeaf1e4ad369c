//! OpenSearch connection and type mapping configuration.
//!
//! OpenSearch has no mapping types, so the opaque searchable type has to live
//! somewhere else. [`TypeMapping`] decides where.

use serde_json::{json, Map, Value};

use crate::searchable::SearchableId;

/// Document field the searchable type is written to by default.
pub const DEFAULT_TYPE_FIELD: &str = "searchable_type";

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Separates the type from the id in a document id.
const ID_SEPARATOR: char = ':';
const ID_ESCAPE: char = '\\';

/// How a searchable type is represented in an index without mapping types.
///
/// The type is written into the stored document under [`field`](Self::field)
/// so queries can filter on it, and it is part of the document id, so two
/// searchables of different types never share a document. The id has the
/// form `{type}:{id}`, with `\` and `:` in the type escaped by a `\`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    field: String,
}

impl Default for TypeMapping {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE_FIELD)
    }
}

impl TypeMapping {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// The document field holding the type.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The OpenSearch `_id` for a searchable.
    pub fn document_id(&self, searchable_type: &str, id: &SearchableId) -> String {
        let mut doc_id = String::with_capacity(searchable_type.len() + 8);
        for c in searchable_type.chars() {
            if c == ID_SEPARATOR || c == ID_ESCAPE {
                doc_id.push(ID_ESCAPE);
            }
            doc_id.push(c);
        }
        doc_id.push(ID_SEPARATOR);
        doc_id.push_str(&id.to_string());
        doc_id
    }

    /// The stored document: the searchable body plus the type field.
    ///
    /// The type field overwrites a body field of the same name.
    pub fn document_body(&self, searchable_type: &str, mut body: Map<String, Value>) -> Value {
        body.insert(self.field.clone(), json!(searchable_type));
        Value::Object(body)
    }
}

/// Configuration for [`OpenSearchEngineClient`](super::OpenSearchEngineClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSearchConfig {
    /// The OpenSearch server URL (e.g., "http://localhost:9200").
    pub url: String,
    pub type_mapping: TypeMapping,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OPENSEARCH_URL)
    }
}

impl OpenSearchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            type_mapping: TypeMapping::default(),
        }
    }

    pub fn with_type_mapping(mut self, type_mapping: TypeMapping) -> Self {
        self.type_mapping = type_mapping;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Map<String, Value> {
        let mut body = Map::new();
        body.insert("name".to_string(), json!("Widget"));
        body
    }

    #[test]
    fn test_default_mapping() {
        assert_eq!(TypeMapping::default().field(), "searchable_type");
    }

    #[test]
    fn test_document_id_includes_type() {
        let mapping = TypeMapping::default();
        assert_eq!(mapping.document_id("product", &SearchableId::Int(1)), "product:1");
        assert_eq!(
            mapping.document_id("product", &SearchableId::from("sku-1")),
            "product:sku-1"
        );
    }

    #[test]
    fn test_same_id_different_types_get_different_documents() {
        let mapping = TypeMapping::default();
        assert_ne!(
            mapping.document_id("product", &SearchableId::Int(1)),
            mapping.document_id("tag", &SearchableId::Int(1))
        );
    }

    #[test]
    fn test_document_id_is_unambiguous() {
        let mapping = TypeMapping::default();
        let pairs = [
            (("a_b", "c"), ("a", "b_c")),
            (("a:b", "c"), ("a", "b:c")),
            (("a\\", "b"), ("a", "\\b")),
            (("a\\:b", "c"), ("a\\", "b:c")),
        ];

        for ((left_type, left_id), (right_type, right_id)) in pairs {
            assert_ne!(
                mapping.document_id(left_type, &SearchableId::from(left_id)),
                mapping.document_id(right_type, &SearchableId::from(right_id)),
                "({}, {}) and ({}, {})",
                left_type,
                left_id,
                right_type,
                right_id
            );
        }
    }

    #[test]
    fn test_document_id_escapes_type() {
        let mapping = TypeMapping::default();
        assert_eq!(
            mapping.document_id("ns:item", &SearchableId::from("x:1")),
            "ns\\:item:x:1"
        );
    }

    #[test]
    fn test_document_body_adds_type_field() {
        let mapping = TypeMapping::new("kind");
        assert_eq!(
            mapping.document_body("product", body()),
            json!({"name": "Widget", "kind": "product"})
        );
    }

    #[test]
    fn test_type_field_overwrites_body_field() {
        let mut body = body();
        body.insert("searchable_type".to_string(), json!("stale"));
        let doc = TypeMapping::default().document_body("product", body);
        assert_eq!(doc["searchable_type"], json!("product"));
    }

    #[test]
    fn test_config_defaults() {
        let config = OpenSearchConfig::default();
        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.type_mapping, TypeMapping::default());
    }
}

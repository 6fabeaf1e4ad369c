//! The capability a domain object implements to be indexed.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier of a searchable object within its type.
///
/// Serialized untagged, so an integer id stays a JSON number and a string id
/// stays a JSON string in every payload sent to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchableId {
    Int(i64),
    Str(String),
}

impl fmt::Display for SearchableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchableId::Int(id) => write!(f, "{}", id),
            SearchableId::Str(id) => f.write_str(id),
        }
    }
}

/// Parses canonical integers as [`SearchableId::Int`] and everything else as
/// a string id. `"007"` or `"+5"` stay strings, so the id displays as given.
impl FromStr for SearchableId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) if id.to_string() == s => Ok(SearchableId::Int(id)),
            _ => Ok(SearchableId::Str(s.to_string())),
        }
    }
}

impl From<i64> for SearchableId {
    fn from(id: i64) -> Self {
        SearchableId::Int(id)
    }
}

impl From<i32> for SearchableId {
    fn from(id: i32) -> Self {
        SearchableId::Int(id.into())
    }
}

impl From<u32> for SearchableId {
    fn from(id: u32) -> Self {
        SearchableId::Int(id.into())
    }
}

impl From<&str> for SearchableId {
    fn from(id: &str) -> Self {
        SearchableId::Str(id.to_string())
    }
}

impl From<String> for SearchableId {
    fn from(id: String) -> Self {
        SearchableId::Str(id)
    }
}

impl From<Uuid> for SearchableId {
    fn from(id: Uuid) -> Self {
        SearchableId::Str(id.to_string())
    }
}

/// Read-only surface a domain object exposes to be indexed.
///
/// All three accessors must be pure and infallible: the gateway may call
/// them more than once per operation and never mutates the object.
///
/// The type is opaque to the gateway. Older engines used it as a mapping
/// type inside an index; engines without mapping types (OpenSearch 2.x)
/// store it as a document-kind attribute instead, see
/// [`TypeMapping`](crate::opensearch::TypeMapping).
///
/// # Example
///
/// ```
/// use search_index_gateway::{Searchable, SearchableId};
/// use serde_json::{json, Map, Value};
///
/// struct Product {
///     id: i64,
///     name: String,
/// }
///
/// impl Searchable for Product {
///     fn searchable_id(&self) -> SearchableId {
///         self.id.into()
///     }
///
///     fn searchable_type(&self) -> String {
///         "product".to_string()
///     }
///
///     fn searchable_body(&self) -> Map<String, Value> {
///         let mut body = Map::new();
///         body.insert("name".to_string(), json!(self.name));
///         body
///     }
/// }
/// ```
pub trait Searchable {
    /// Stable, unique identifier within the object's type.
    fn searchable_id(&self) -> SearchableId;

    /// Logical category used to route the document.
    fn searchable_type(&self) -> String;

    /// Full field set to index.
    fn searchable_body(&self) -> Map<String, Value>;
}

impl<T: Searchable + ?Sized> Searchable for &T {
    fn searchable_id(&self) -> SearchableId {
        (**self).searchable_id()
    }

    fn searchable_type(&self) -> String {
        (**self).searchable_type()
    }

    fn searchable_body(&self) -> Map<String, Value> {
        (**self).searchable_body()
    }
}

impl<T: Searchable + ?Sized> Searchable for Box<T> {
    fn searchable_id(&self) -> SearchableId {
        (**self).searchable_id()
    }

    fn searchable_type(&self) -> String {
        (**self).searchable_type()
    }

    fn searchable_body(&self) -> Map<String, Value> {
        (**self).searchable_body()
    }
}

impl<T: Searchable + ?Sized> Searchable for Arc<T> {
    fn searchable_id(&self) -> SearchableId {
        (**self).searchable_id()
    }

    fn searchable_type(&self) -> String {
        (**self).searchable_type()
    }

    fn searchable_body(&self) -> Map<String, Value> {
        (**self).searchable_body()
    }
}

/// A searchable built from raw coordinates.
///
/// Deserializes from `{"id": ..., "type": ..., "body": {...}}`, which is the
/// shape accepted by [`UpsertSubject::from_json`](crate::types::UpsertSubject::from_json).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableDocument {
    pub id: SearchableId,
    #[serde(rename = "type")]
    pub searchable_type: String,
    #[serde(default)]
    pub body: Map<String, Value>,
}

impl SearchableDocument {
    pub fn new(
        id: impl Into<SearchableId>,
        searchable_type: impl Into<String>,
        body: Map<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            searchable_type: searchable_type.into(),
            body,
        }
    }
}

impl Searchable for SearchableDocument {
    fn searchable_id(&self) -> SearchableId {
        self.id.clone()
    }

    fn searchable_type(&self) -> String {
        self.searchable_type.clone()
    }

    fn searchable_body(&self) -> Map<String, Value> {
        self.body.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_serializes_untagged() {
        assert_eq!(serde_json::to_value(SearchableId::Int(7)).unwrap(), json!(7));
        assert_eq!(
            serde_json::to_value(SearchableId::from("sku-7")).unwrap(),
            json!("sku-7")
        );
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("42".parse::<SearchableId>().unwrap(), SearchableId::Int(42));
        assert_eq!(
            "abc-42".parse::<SearchableId>().unwrap(),
            SearchableId::Str("abc-42".to_string())
        );
    }

    #[test]
    fn test_id_from_str_keeps_non_canonical_integers() {
        for input in ["007", "+5", "-0", "00"] {
            let id = input.parse::<SearchableId>().unwrap();
            assert_eq!(id, SearchableId::Str(input.to_string()));
            assert_eq!(id.to_string(), input);
        }
        assert_eq!("-12".parse::<SearchableId>().unwrap(), SearchableId::Int(-12));
        assert_eq!("0".parse::<SearchableId>().unwrap(), SearchableId::Int(0));
    }

    #[test]
    fn test_id_display() {
        assert_eq!(SearchableId::Int(-3).to_string(), "-3");
        assert_eq!(SearchableId::from("x1").to_string(), "x1");
    }

    #[test]
    fn test_document_deserializes_from_json() {
        let doc: SearchableDocument = serde_json::from_value(json!({
            "id": 1,
            "type": "product",
            "body": {"name": "Widget"}
        }))
        .unwrap();

        assert_eq!(doc.searchable_id(), SearchableId::Int(1));
        assert_eq!(doc.searchable_type(), "product");
        assert_eq!(doc.searchable_body().get("name"), Some(&json!("Widget")));
    }

    #[test]
    fn test_document_body_defaults_to_empty() {
        let doc: SearchableDocument =
            serde_json::from_value(json!({"id": "a", "type": "tag"})).unwrap();
        assert!(doc.body.is_empty());
    }

    #[test]
    fn test_smart_pointers_delegate() {
        let doc = SearchableDocument::new(5, "product", Map::new());
        let boxed: Box<dyn Searchable> = Box::new(doc.clone());
        let shared = Arc::new(doc.clone());

        assert_eq!(boxed.searchable_id(), SearchableId::Int(5));
        assert_eq!(shared.searchable_type(), "product");
        assert_eq!((&doc).searchable_id(), SearchableId::Int(5));
    }
}

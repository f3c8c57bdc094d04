use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Point in time used for document creation stamps and range filters.
pub type Timestamp = DateTime<Utc>;

// --- Domain Errors ---
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Document id must not be empty")]
    EmptyId,
}

// --- Document ID ---

/// Non-empty key under which a document is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    /// Accepts any non-empty string as an identifier.
    pub fn parse(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Fresh random (UUID v4) identifier. Collisions with stored keys are not checked.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DomainError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        Self::parse(id)
    }
}

impl From<DocumentId> for String {
    fn from(doc_id: DocumentId) -> Self {
        doc_id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// --- Documents ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Author {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }
}

/// A stored record. Every field is optional on input; once saved, `id` and
/// `created` are always present.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub created: Option<Timestamp>,
}

impl Document {
    /// Unsaved document without id or creation stamp.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Author) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            content: Some(content.into()),
            author: Some(author),
            created: None,
        }
    }

    /// The author's id, if both the author and its id are set.
    pub fn author_id(&self) -> Option<&str> {
        self.author.as_ref().and_then(|author| author.id.as_deref())
    }
}

// --- Search Request ---

/// Filters for a document search. Absent or empty fields impose no constraint;
/// the fields that are set are combined with AND, the values inside a list with OR.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Title must start with any of these.
    #[serde(default)]
    pub title_prefixes: Option<Vec<String>>,
    /// Content must contain any of these.
    #[serde(default)]
    pub contains_contents: Option<Vec<String>>,
    /// Author id must equal any of these.
    #[serde(default)]
    pub author_ids: Option<Vec<String>>,
    /// Inclusive lower bound on `created`.
    #[serde(default)]
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `created`.
    #[serde(default)]
    pub created_to: Option<Timestamp>,
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn document_id_rejects_empty_string() {
        assert_eq!(DocumentId::parse(""), Err(DomainError::EmptyId));
        assert_eq!(
            DocumentId::try_from(String::new()),
            Err(DomainError::EmptyId)
        );
        assert_eq!(DocumentId::parse("doc-1").unwrap().as_str(), "doc-1");
        assert!(serde_json::from_value::<DocumentId>(json!("")).is_err());
    }

    #[test]
    fn generated_ids_are_distinct_uuids() {
        let a = DocumentId::generate();
        let b = DocumentId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
        assert_eq!(String::from(b.clone()), b.to_string());
    }

    #[test]
    fn author_id_requires_author_and_id() {
        let mut doc = Document::new("Title", "Content", Author::new("a1", "Ann"));
        assert_eq!(doc.author_id(), Some("a1"));

        doc.author = Some(Author {
            id: None,
            name: Some("Anonymous".to_string()),
        });
        assert_eq!(doc.author_id(), None);

        doc.author = None;
        assert_eq!(doc.author_id(), None);
    }

    #[test]
    fn search_request_deserializes_camel_case_and_nulls() {
        let request: SearchRequest = serde_json::from_value(json!({
            "titlePrefixes": ["Fir", "Fou"],
            "containsContents": null,
            "createdTo": "2024-05-01T12:00:00Z"
        }))
        .expect("valid request");

        assert_eq!(
            request.title_prefixes,
            Some(vec!["Fir".to_string(), "Fou".to_string()])
        );
        assert_eq!(request.contains_contents, None);
        assert_eq!(request.author_ids, None);
        assert_eq!(request.created_from, None);
        assert_eq!(
            request.created_to,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn empty_json_is_the_default_request() {
        let request: SearchRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, SearchRequest::default());
    }

    #[test]
    fn document_serializes_with_optional_fields() {
        let doc = Document {
            id: Some("doc-1".to_string()),
            created: Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()),
            ..Document::new("Title", "Body", Author::new("a1", "Ann"))
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], "doc-1");
        assert_eq!(value["author"]["name"], "Ann");
        assert_eq!(value["created"], "2024-01-02T03:04:05Z");

        let back: Document = serde_json::from_value(value).unwrap();
        assert_eq!(back, doc);
    }
}

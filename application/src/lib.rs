pub mod filters;

use chrono::Utc;
use domain::{Document, DocumentId, SearchRequest};
use std::sync::Arc;
use tracing::{debug, instrument};

// --- Infrastructure Interfaces (Traits) ---

/// Interface for storing and retrieving documents by id.
/// Implementations own their storage and hand out clones on read.
pub trait DocumentRepository: Send + Sync {
    /// Adds or fully replaces the document stored under `id`.
    fn save(&self, id: DocumentId, document: Document);
    /// Retrieves a document by its ID.
    fn get(&self, id: &DocumentId) -> Option<Document>;
    /// Deletes a document by its ID. Returns true if deleted.
    fn delete(&self, id: &DocumentId) -> bool;
    /// Every stored document, in no particular order.
    fn all(&self) -> Vec<Document>;
    fn count(&self) -> usize;
}

// --- Application Services (Use Cases) ---

/// Upsert, point lookup and filtered search over a [`DocumentRepository`].
/// None of the operations can fail.
#[derive(Clone)]
pub struct DocumentStore {
    repository: Arc<dyn DocumentRepository>,
}

impl DocumentStore {
    pub fn new(repository: Arc<dyn DocumentRepository>) -> Self {
        Self { repository }
    }

    /// Upserts `document` and returns it as stored.
    ///
    /// A missing or empty id is replaced by a generated one and a missing
    /// `created` is set to now. An explicit `created` is kept as given, even
    /// when it replaces the stamp of an earlier save under the same id.
    #[instrument(skip(self, document))]
    pub fn save(&self, mut document: Document) -> Document {
        let id = match document.id.clone().map(DocumentId::parse) {
            Some(Ok(id)) => id,
            _ => {
                let id = DocumentId::generate();
                debug!(doc_id = %id, "Assigned generated document id");
                id
            }
        };
        document.id = Some(id.to_string());
        if document.created.is_none() {
            document.created = Some(Utc::now());
        }

        debug!(doc_id = %id, "Saving document");
        self.repository.save(id, document.clone());
        document
    }

    /// Documents matching every active filter of `request`.
    /// No request at all yields nothing; an empty request yields everything.
    #[instrument(skip(self, request), fields(has_request = request.is_some()))]
    pub fn search(&self, request: Option<&SearchRequest>) -> Vec<Document> {
        let Some(request) = request else {
            debug!("No search request given, returning no documents");
            return Vec::new();
        };

        let candidates = self.repository.all();
        let total = candidates.len();
        let hits = filters::apply(candidates, request);
        debug!(total, hits = hits.len(), "Search finished");
        hits
    }

    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: &str) -> Option<Document> {
        let id = DocumentId::parse(id).ok()?;
        let found = self.repository.get(&id);
        debug!(doc_id = %id, found = found.is_some(), "Looked up document");
        found
    }

    /// Removes the document stored under `id`. Returns true if one was removed.
    #[instrument(skip(self))]
    pub fn delete(&self, id: &str) -> bool {
        DocumentId::parse(id).is_ok_and(|id| self.repository.delete(&id))
    }

    pub fn count(&self) -> usize {
        self.repository.count()
    }
}

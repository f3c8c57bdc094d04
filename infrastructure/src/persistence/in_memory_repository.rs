// ./infrastructure/src/persistence/in_memory_repository.rs
use application::DocumentRepository;
use dashmap::DashMap;
use domain::{Document, DocumentId};
use std::sync::Arc;
use tracing::{debug, instrument};

// --- Document Repository Implementation ---

/// DashMap-backed document storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    // Document ID -> Document
    store: Arc<DashMap<DocumentId, Arc<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }
}

impl DocumentRepository for InMemoryDocumentRepository {
    #[instrument(skip(self, document))]
    fn save(&self, id: DocumentId, document: Document) {
        debug!(doc_id = %id, "Saving document to in-memory store");
        // Full overwrite, the previous entry (if any) is dropped
        if self.store.insert(id, Arc::new(document)).is_some() {
            debug!("Replaced existing document");
        }
    }

    #[instrument(skip(self))]
    fn get(&self, id: &DocumentId) -> Option<Document> {
        debug!(doc_id = %id, "Getting document from in-memory store");
        self.store.get(id).map(|doc_ref| (**doc_ref).clone())
    }

    #[instrument(skip(self))]
    fn delete(&self, id: &DocumentId) -> bool {
        debug!(doc_id = %id, "Deleting document from in-memory store");
        self.store.remove(id).is_some()
    }

    fn all(&self) -> Vec<Document> {
        let documents: Vec<Document> = self
            .store
            .iter()
            .map(|entry| (**entry.value()).clone())
            .collect();
        debug!(count = documents.len(), "Listed all documents from in-memory store");
        documents
    }

    fn count(&self) -> usize {
        self.store.len()
    }
}

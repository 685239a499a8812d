use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use super::store::{DocumentStore, FieldUpdate};
use crate::constants::ID_FIELD;
use crate::error::{GatewayError, Result};

/// In-process store keeping documents in insertion order.
///
/// Test double for `MongoStore`; the binary never constructs it.
pub struct MemoryStore {
    collection_name: String,
    documents: Mutex<Vec<Document>>,
    collection_exists: AtomicBool,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            documents: Mutex::new(Vec::new()),
            collection_exists: AtomicBool::new(true),
            failing: AtomicBool::new(false),
        }
    }

    /// Store whose collection has not been created.
    pub fn without_collection(collection_name: impl Into<String>) -> Self {
        let store = Self::new(collection_name);
        store.collection_exists.store(false, Ordering::SeqCst);
        store
    }

    /// Makes every data operation fail, as an unreachable backend would.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.documents().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn documents(&self) -> Result<MutexGuard<'_, Vec<Document>>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayError::Internal("memory store is unavailable".into()));
        }
        self.documents
            .lock()
            .map_err(|_| GatewayError::Internal("memory store lock poisoned".into()))
    }
}

fn has_id(document: &Document, id: &str) -> bool {
    matches!(document.get(ID_FIELD), Some(Bson::String(value)) if value == id)
}

fn id_in(document: &Document, ids: &[String]) -> bool {
    ids.iter().any(|id| has_id(document, id))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    async fn ensure_connected(&self) -> Result<()> {
        Ok(())
    }

    async fn collection_exists(&self) -> Result<bool> {
        Ok(self.collection_exists.load(Ordering::SeqCst))
    }

    async fn find_one(&self, id: &str) -> Result<Option<Document>> {
        let docs = self.documents()?;
        Ok(docs.iter().find(|doc| has_id(doc, id)).cloned())
    }

    async fn count_documents(&self) -> Result<u64> {
        Ok(self.documents()?.len() as u64)
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Document>> {
        let docs = self.documents()?;
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(docs.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Document>> {
        let docs = self.documents()?;
        Ok(docs.iter().filter(|doc| id_in(doc, ids)).cloned().collect())
    }

    async fn insert_many(&self, documents: &[Document]) -> Result<()> {
        self.documents()?.extend(documents.iter().cloned());
        Ok(())
    }

    async fn update_fields(&self, updates: Vec<FieldUpdate>) -> Result<()> {
        let mut docs = self.documents()?;
        for update in updates {
            if let Some(doc) = docs.iter_mut().find(|doc| has_id(doc, &update.id)) {
                for (key, value) in update.fields {
                    doc.insert(key, value);
                }
            }
        }
        Ok(())
    }

    async fn delete_one(&self, id: &str) -> Result<()> {
        let mut docs = self.documents()?;
        if let Some(position) = docs.iter().position(|doc| has_id(doc, id)) {
            docs.remove(position);
        }
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<()> {
        self.documents()?.retain(|doc| !id_in(doc, ids));
        Ok(())
    }
}

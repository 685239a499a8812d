use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::Result;

/// Partial update of one document: `fields` are set in place on the
/// document whose identifier is `id`; other fields are left untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub id: String,
    pub fields: Document,
}

/// Access to the single collection the gateway is bound to.
///
/// Implementations make no uniqueness or schema guarantees; every call is an
/// independent round-trip and multi-step operations are not atomic.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn collection_name(&self) -> &str;

    /// Establishes the connection on first use. Later calls are no-ops.
    async fn ensure_connected(&self) -> Result<()>;

    async fn collection_exists(&self) -> Result<bool>;

    async fn find_one(&self, id: &str) -> Result<Option<Document>>;

    async fn count_documents(&self) -> Result<u64>;

    /// Returns up to `limit` documents after skipping `offset`, in the
    /// store's natural order.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Document>>;

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Document>>;

    async fn insert_many(&self, documents: &[Document]) -> Result<()>;

    async fn update_fields(&self, updates: Vec<FieldUpdate>) -> Result<()>;

    async fn delete_one(&self, id: &str) -> Result<()>;

    async fn delete_by_ids(&self, ids: &[String]) -> Result<()>;
}

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::ClientOptions,
    Client, Collection, Database,
};
use tokio::sync::OnceCell;

use super::store::{DocumentStore, FieldUpdate};
use crate::config::GatewayConfig;
use crate::constants::ID_FIELD;
use crate::error::Result;

/// MongoDB-backed store. The client is created on the first request and
/// shared by every request after that.
pub struct MongoStore {
    connection_url: String,
    database_name: String,
    collection_name: String,
    connect_timeout: Duration,
    database: OnceCell<Database>,
}

impl MongoStore {
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            connection_url: config.connection_url.clone(),
            database_name: config.database_name.clone(),
            collection_name: config.collection_name.clone(),
            connect_timeout: config.connect_timeout,
            database: OnceCell::new(),
        }
    }

    async fn database(&self) -> Result<&Database> {
        self.database.get_or_try_init(|| self.connect()).await
    }

    async fn connect(&self) -> Result<Database> {
        log::info!("Connecting to MongoDB database '{}'...", self.database_name);

        let mut options = ClientOptions::parse(&self.connection_url).await?;
        options.connect_timeout = Some(self.connect_timeout);
        options.server_selection_timeout = Some(self.connect_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&self.database_name);

        // The driver connects lazily; ping so a bad URL fails here and the
        // cell stays empty for the next attempt.
        database.run_command(doc! { "ping": 1 }).await?;

        log::info!("Connected to MongoDB database '{}'", self.database_name);
        Ok(database)
    }

    async fn collection(&self) -> Result<Collection<Document>> {
        Ok(self.database().await?.collection(&self.collection_name))
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn collection_name(&self) -> &str {
        &self.collection_name
    }

    async fn ensure_connected(&self) -> Result<()> {
        self.database().await.map(|_| ())
    }

    async fn collection_exists(&self) -> Result<bool> {
        let names = self.database().await?.list_collection_names().await?;
        Ok(names.iter().any(|name| name == &self.collection_name))
    }

    async fn find_one(&self, id: &str) -> Result<Option<Document>> {
        let document = self
            .collection()
            .await?
            .find_one(doc! { ID_FIELD: id })
            .await?;
        Ok(document)
    }

    async fn count_documents(&self) -> Result<u64> {
        let total = self.collection().await?.count_documents(doc! {}).await?;
        Ok(total)
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Document>> {
        let cursor = self
            .collection()
            .await?
            .find(doc! {})
            .skip(offset)
            .limit(i64::try_from(limit).unwrap_or(i64::MAX))
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Document>> {
        let cursor = self
            .collection()
            .await?
            .find(doc! { ID_FIELD: { "$in": ids.to_vec() } })
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn insert_many(&self, documents: &[Document]) -> Result<()> {
        self.collection().await?.insert_many(documents).await?;
        Ok(())
    }

    async fn update_fields(&self, updates: Vec<FieldUpdate>) -> Result<()> {
        let collection = self.collection().await?;
        let mut applied = 0;

        // Applied in request order, stopping at the first failure, so a
        // repeated identifier ends with its last update.
        for update in updates {
            // `$set` with an empty document is rejected by the server.
            if update.fields.is_empty() {
                continue;
            }
            collection
                .update_one(
                    doc! { ID_FIELD: update.id.as_str() },
                    doc! { "$set": update.fields },
                )
                .await?;
            applied += 1;
        }

        log::debug!("Applied {} field updates", applied);
        Ok(())
    }

    async fn delete_one(&self, id: &str) -> Result<()> {
        self.collection()
            .await?
            .delete_one(doc! { ID_FIELD: id })
            .await?;
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[String]) -> Result<()> {
        let result = self
            .collection()
            .await?
            .delete_many(doc! { ID_FIELD: { "$in": ids.to_vec() } })
            .await?;
        log::debug!("Deleted {} documents", result.deleted_count);
        Ok(())
    }
}

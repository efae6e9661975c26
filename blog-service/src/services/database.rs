use super::store::{identity_to_string, DocumentStore, StoreError};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, DateTime, Document},
    options::FindOptions,
    Client as MongoClient, Collection, Database,
};

#[derive(Clone)]
pub struct MongoDb {
    client: MongoClient,
    db: Database,
}

impl MongoDb {
    /// Parses `uri` and builds a client. The driver connects lazily, so an
    /// unreachable server only surfaces on the first operation.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        tracing::info!(database = %database, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            StoreError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "MongoDB client ready");
        Ok(Self { client, db })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl DocumentStore for MongoDb {
    async fn create_document(
        &self,
        collection: &str,
        mut fields: Document,
    ) -> Result<String, StoreError> {
        let now = DateTime::now();
        fields.insert("created_at", now);
        fields.insert("updated_at", now);

        let result = self
            .collection(collection)
            .insert_one(fields, None)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Failed to insert document: {}", e);
                StoreError::from(e)
            })?;

        Ok(identity_to_string(&result.inserted_id))
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        // The driver treats 0 as "no limit" and negatives as a single batch.
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let find_options = FindOptions::builder().limit(limit).build();

        let cursor = self
            .collection(collection)
            .find(filter, find_options)
            .await
            .map_err(|e| {
                tracing::error!(collection = %collection, "Failed to query documents: {}", e);
                StoreError::from(e)
            })?;

        Ok(cursor.try_collect().await?)
    }

    fn database_name(&self) -> String {
        self.db.name().to_string()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.db.list_collection_names(None).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                StoreError::from(e)
            })?;
        Ok(())
    }
}

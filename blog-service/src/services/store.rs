//! Document store abstraction.
//!
//! Handlers only ever see `Arc<dyn DocumentStore>`; records cross this
//! boundary as generic BSON documents and are shaped into typed DTOs above it.

use async_trait::async_trait;
use mongodb::bson::{Bson, Document};
use service_core::error::AppError;
use thiserror::Error;

/// Key under which the store keeps a record's identity.
pub const ID_FIELD: &str = "_id";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Backend(#[from] mongodb::error::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl StoreError {
    pub fn not_initialized() -> Self {
        StoreError::Unavailable("Database not available".to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert `fields` into `collection`, stamping `created_at`/`updated_at`.
    /// Returns the store-assigned identity as text.
    async fn create_document(&self, collection: &str, fields: Document)
        -> Result<String, StoreError>;

    /// Fetch up to `limit` records matching `filter`, in whatever order the
    /// store yields them. A non-positive `limit` returns nothing.
    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError>;

    fn database_name(&self) -> String;

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Text form of a record identity: hex for ObjectIds, the raw value for
/// strings, and the BSON display form for anything else.
pub fn identity_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

use super::store::{identity_to_string, DocumentStore, StoreError, ID_FIELD};
use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, DateTime, Document};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// Process-local document store selected with `DATABASE_URL=memory://`.
///
/// Collections keep insertion order. Filters match on top-level field
/// equality, with array fields matching when they contain the value.
pub struct InMemoryStore {
    name: String,
    collections: Mutex<BTreeMap<String, Vec<Document>>>,
    failure: Option<String>,
}

impl InMemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collections: Mutex::new(BTreeMap::new()),
            failure: None,
        }
    }

    /// A store whose every operation fails with `message`.
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(name)
        }
    }

    /// Number of records in `collection`.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(collection).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Vec<Document>>>, StoreError> {
        self.collections
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("In-memory store poisoned: {}", e)))
    }
}

fn matches_filter(record: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| match record.get(key) {
        Some(Bson::Array(values)) => values.contains(expected),
        Some(actual) => actual == expected,
        None => matches!(expected, Bson::Null),
    })
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        mut fields: Document,
    ) -> Result<String, StoreError> {
        self.check_available()?;

        let id = match fields.get(ID_FIELD) {
            Some(existing) => existing.clone(),
            None => Bson::ObjectId(ObjectId::new()),
        };
        let now = DateTime::now();
        fields.insert(ID_FIELD, id.clone());
        fields.insert("created_at", now);
        fields.insert("updated_at", now);

        self.lock()?
            .entry(collection.to_string())
            .or_default()
            .push(fields);

        Ok(identity_to_string(&id))
    }

    async fn get_documents(
        &self,
        collection: &str,
        filter: Document,
        limit: i64,
    ) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;

        let take = usize::try_from(limit).unwrap_or(0);
        let collections = self.lock()?;

        Ok(collections
            .get(collection)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches_filter(record, &filter))
                    .take(take)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn database_name(&self) -> String {
        self.name.clone()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.check_available()?;
        Ok(self.lock()?.keys().cloned().collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

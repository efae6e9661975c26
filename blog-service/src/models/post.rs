use mongodb::bson::{self, DateTime, Document};
use serde::{Deserialize, Serialize};

use crate::services::StoreError;

/// Collection holding blog posts.
pub const POST_COLLECTION: &str = "blogpost";

/// A post as written to the store. Identity and timestamps are assigned by
/// the store on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub title: String,
    pub author: String,
    pub content: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
}

impl Post {
    pub fn to_document(&self) -> Result<Document, StoreError> {
        bson::to_document(self).map_err(|e| StoreError::InvalidRecord(e.to_string()))
    }
}

/// A post as read back from the store, minus its identity.
///
/// Records are schema-flexible, so `tags` tolerates null and the timestamps
/// tolerate absence.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime>,
    #[serde(default)]
    pub updated_at: Option<DateTime>,
}

impl PostRecord {
    pub fn from_document(document: Document) -> Result<Self, StoreError> {
        bson::from_document(document).map_err(|e| StoreError::InvalidRecord(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn post_document_keeps_null_cover_image() {
        let post = Post {
            title: "Blue Train".into(),
            author: "mina".into(),
            content: "Side A".into(),
            tags: vec![],
            cover_image: None,
        };
        let document = post.to_document().unwrap();

        assert_eq!(document.get_str("title").unwrap(), "Blue Train");
        assert!(document.get_array("tags").unwrap().is_empty());
        assert!(matches!(document.get("cover_image"), Some(bson::Bson::Null)));
    }

    #[test]
    fn record_tolerates_missing_optional_fields() {
        let record =
            PostRecord::from_document(doc! { "title": "A", "author": "B", "content": "C" })
                .unwrap();

        assert_eq!(record.tags, None);
        assert_eq!(record.cover_image, None);
        assert!(record.created_at.is_none());
    }

    #[test]
    fn record_without_title_is_invalid() {
        let err = PostRecord::from_document(doc! { "author": "B", "content": "C" }).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }
}

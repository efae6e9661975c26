use crate::models::{Post, PostRecord};
use crate::services::store::{identity_to_string, StoreError, ID_FIELD};
use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Page size when `limit` is omitted.
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Body of `POST /api/posts`. Any text is accepted for the required fields,
/// including the empty string; only absence, null or a non-string is refused.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    pub title: String,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl From<CreatePostRequest> for Post {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            author: req.author,
            content: req.content,
            tags: req.tags.unwrap_or_default(),
            cover_image: req.cover_image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct PostListParams {
    pub limit: Option<i64>,
    pub author: Option<String>,
    pub tag: Option<String>,
}

impl PostListParams {
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }

    /// Store filter for the optional exact-match query parameters.
    pub fn filter(&self) -> Document {
        let mut filter = doc! {};
        if let Some(author) = &self.author {
            filter.insert("author", author.as_str());
        }
        if let Some(tag) = &self.tag {
            // Matches any element of the stored array.
            filter.insert("tags", tag.as_str());
        }
        filter
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub content: String,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl TryFrom<Document> for PostResponse {
    type Error = StoreError;

    /// Moves the store's `_id` to a text `id` and shapes the rest.
    fn try_from(mut document: Document) -> Result<Self, Self::Error> {
        let id = document
            .remove(ID_FIELD)
            .map(|id| identity_to_string(&id))
            .ok_or_else(|| StoreError::InvalidRecord("record has no _id".to_string()))?;

        let record = PostRecord::from_document(document)?;

        Ok(Self {
            id,
            title: record.title,
            author: record.author,
            content: record.content,
            tags: record.tags.unwrap_or_default(),
            cover_image: record.cover_image,
            created_at: record.created_at.map(|dt| dt.to_chrono().to_rfc3339()),
            updated_at: record.updated_at.map(|dt| dt.to_chrono().to_rfc3339()),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PostListResponse {
    pub items: Vec<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{oid::ObjectId, Bson, DateTime};

    #[test]
    fn object_id_is_renamed_to_text_id() {
        let oid = ObjectId::new();
        let response = PostResponse::try_from(doc! {
            "_id": oid,
            "title": "A",
            "author": "B",
            "content": "C",
            "tags": ["jazz"],
            "cover_image": Bson::Null,
            "created_at": DateTime::now(),
        })
        .unwrap();

        assert_eq!(response.id, oid.to_hex());
        assert_eq!(response.tags, ["jazz"]);
        assert!(response.created_at.is_some());
        assert!(response.updated_at.is_none());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("_id").is_none());
        assert!(json["id"].is_string());
        assert!(json["cover_image"].is_null());
    }

    #[test]
    fn record_without_identity_is_rejected() {
        let err = PostResponse::try_from(doc! { "title": "A", "author": "B", "content": "C" })
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }

    #[test]
    fn empty_text_fields_pass_validation() {
        let request: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "", "author": "", "content": ""
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn null_tags_become_empty() {
        let request: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "title": "A", "author": "B", "content": "C", "tags": null
        }))
        .unwrap();
        let post = Post::from(request);
        assert!(post.tags.is_empty());
        assert!(post.cover_image.is_none());
    }

    #[test]
    fn list_params_build_filter() {
        let params = PostListParams {
            limit: None,
            author: Some("mina".into()),
            tag: Some("jazz".into()),
        };
        assert_eq!(params.limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(params.filter(), doc! { "author": "mina", "tags": "jazz" });
        assert!(PostListParams::default().filter().is_empty());
    }
}

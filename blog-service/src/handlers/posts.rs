use crate::dtos::{
    CreatePostRequest, CreatePostResponse, PostListParams, PostListResponse, PostResponse,
};
use crate::models::{Post, POST_COLLECTION};
use crate::services::metrics::{record_post_created, record_store_error};
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;
use service_core::utils::ValidatedJson;

#[tracing::instrument(skip_all)]
pub async fn list_posts(
    State(state): State<AppState>,
    params: Result<Query<PostListParams>, QueryRejection>,
) -> Result<Json<PostListResponse>, AppError> {
    let Query(params) = params.map_err(|e| AppError::InvalidPayload(e.body_text()))?;
    let store = state.store()?;

    let records = store
        .get_documents(POST_COLLECTION, params.filter(), params.limit())
        .await
        .map_err(|e| {
            record_store_error("list_posts");
            tracing::error!("Failed to list posts: {}", e);
            e
        })?;

    // Every record leaves with `id` in place of the store's `_id`. Records
    // that cannot be shaped into a post are logged and left out.
    let items: Vec<PostResponse> = records
        .into_iter()
        .filter_map(|record| match PostResponse::try_from(record) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!(collection = POST_COLLECTION, "Skipping unreadable post: {}", e);
                None
            }
        })
        .collect();

    tracing::debug!(count = items.len(), limit = params.limit(), "Listed posts");

    Ok(Json(PostListResponse { items }))
}

#[tracing::instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<CreatePostResponse>), AppError> {
    let store = state.store()?;

    let post = Post::from(request);
    let fields = post.to_document()?;

    let id = store
        .create_document(POST_COLLECTION, fields)
        .await
        .map_err(|e| {
            record_store_error("create_post");
            tracing::error!("Failed to create post: {}", e);
            e
        })?;

    record_post_created();
    tracing::info!(post_id = %id, author = %post.author, "Post created");

    Ok((StatusCode::CREATED, Json(CreatePostResponse { id })))
}

/// Album comment API routes
use crate::{
    api::ApiJson,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use soundcheck_core::types::{AlbumId, Comment, CreateComment, Rating};

#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    /// Blank or missing posts as the anonymous identity
    #[serde(default)]
    pub username: Option<String>,
    pub rating: i64,
    #[serde(default)]
    pub comment_text: Option<String>,
}

/// POST /albums/:id/comments
pub async fn post_comment(
    Path(album_id): Path<AlbumId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<PostCommentRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let rating = Rating::new(req.rating)?;

    let comment = app_state
        .store
        .post_comment(CreateComment {
            album_id,
            author: req.username.unwrap_or_default(),
            rating,
            comment_text: req.comment_text,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Comment created", "comment_id": comment.id })),
    ))
}

/// GET /albums/:id/comments
pub async fn list_album_comments(
    Path(album_id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Comment>>> {
    if !app_state.store.album_exists(album_id).await? {
        return Err(ServerError::NotFound("Album not found".to_string()));
    }

    let comments = app_state.store.get_comments_for_album(album_id).await?;
    Ok(Json(comments))
}

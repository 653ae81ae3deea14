/// User API routes
use crate::{error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use soundcheck_core::types::UserComment;

/// GET /users/:username/comments
/// Empty for a user with no comments or no account
pub async fn list_user_comments(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UserComment>>> {
    let comments = app_state.store.get_comments_by_user(&username).await?;
    Ok(Json(comments))
}

/// DELETE /users/:username
/// Removes the user together with every comment they wrote
pub async fn delete_user(
    Path(username): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Value>> {
    let comments_deleted = app_state.store.delete_user(&username).await?;

    Ok(Json(json!({
        "message": "User and all their comments deleted",
        "comments_deleted": comments_deleted,
    })))
}

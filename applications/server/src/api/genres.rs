/// Genres API routes
use crate::{api::ApiJson, error::Result, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use soundcheck_core::types::{AlbumId, CreateGenre, Genre, GenreId};

#[derive(Debug, Deserialize)]
pub struct CreateGenreRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachGenreRequest {
    pub genre_id: GenreId,
}

/// GET /genres
pub async fn list_genres(State(app_state): State<AppState>) -> Result<Json<Vec<Genre>>> {
    let genres = app_state.store.get_all_genres().await?;
    Ok(Json(genres))
}

/// POST /genres
pub async fn create_genre(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreateGenreRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let genre = app_state
        .store
        .create_genre(CreateGenre { name: req.name })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Genre created", "genre_id": genre.id })),
    ))
}

/// POST /albums/:id/genres
/// A genre already on the album is a 409
pub async fn attach_genre(
    Path(album_id): Path<AlbumId>,
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<AttachGenreRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    app_state
        .store
        .attach_genre(album_id, req.genre_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Genre added to album" })),
    ))
}

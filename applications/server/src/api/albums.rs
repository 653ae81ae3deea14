/// Albums API routes
use crate::{
    api::ApiJson,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use soundcheck_core::types::{
    parse_release_date, Album, AlbumDetails, AlbumId, AlbumRating, ArtistId, CreateAlbum,
};
use soundcheck_storage::ratings::TOP_RATED_LIMIT;

#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: String,
    /// `YYYY-MM-DD`
    pub release_date: String,
    pub cover_image_url: Option<String>,
    pub artist_id: ArtistId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub q: String,
}

/// GET /albums
pub async fn list_albums(State(app_state): State<AppState>) -> Result<Json<Vec<Album>>> {
    let albums = app_state.store.get_all_albums().await?;
    Ok(Json(albums))
}

/// POST /albums
pub async fn create_album(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreateAlbumRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let release_date = parse_release_date(&req.release_date)?;

    let album = app_state
        .store
        .create_album(CreateAlbum {
            title: req.title,
            release_date,
            cover_image_url: req.cover_image_url,
            artist_id: req.artist_id,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Album created", "album_id": album.id })),
    ))
}

/// GET /albums/:id
/// Album with its comments (newest first) and genres
pub async fn get_album(
    Path(id): Path<AlbumId>,
    State(app_state): State<AppState>,
) -> Result<Json<AlbumDetails>> {
    let album = app_state
        .store
        .get_album_by_id(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Album not found".to_string()))?;

    let comments = app_state.store.get_comments_for_album(id).await?;
    let genres = app_state.store.get_genres_for_album(id).await?;

    Ok(Json(AlbumDetails {
        album_details: album,
        comments,
        genres,
    }))
}

/// GET /albums/by-rating
pub async fn albums_by_rating(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AlbumRating>>> {
    let albums = app_state.store.get_album_ratings().await?;
    Ok(Json(albums))
}

/// GET /albums/search?q=
pub async fn search_albums(
    State(app_state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<AlbumRating>>> {
    let albums = app_state.store.search_album_ratings(&params.q).await?;
    Ok(Json(albums))
}

/// GET /albums/top-rated
pub async fn top_rated_albums(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<AlbumRating>>> {
    let albums = app_state
        .store
        .get_top_rated_albums(TOP_RATED_LIMIT)
        .await?;
    Ok(Json(albums))
}

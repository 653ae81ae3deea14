/// Artists API routes
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
use soundcheck_core::types::{Artist, ArtistId, CreateArtist};

#[derive(Debug, Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    pub bio: Option<String>,
    pub formed_year: Option<i32>,
}

/// GET /artists
pub async fn list_artists(State(app_state): State<AppState>) -> Result<Json<Vec<Artist>>> {
    let artists = app_state.store.get_all_artists().await?;
    Ok(Json(artists))
}

/// POST /artists
pub async fn create_artist(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<CreateArtistRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let artist = app_state
        .store
        .create_artist(CreateArtist {
            name: req.name,
            bio: req.bio,
            formed_year: req.formed_year,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Artist created", "artist_id": artist.id })),
    ))
}

/// GET /artists/:id
pub async fn get_artist(
    Path(id): Path<ArtistId>,
    State(app_state): State<AppState>,
) -> Result<Json<Artist>> {
    let artist = app_state
        .store
        .get_artist_by_id(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("Artist not found".to_string()))?;

    Ok(Json(artist))
}

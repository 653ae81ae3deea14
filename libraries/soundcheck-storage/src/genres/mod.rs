use crate::{albums, error::conflict_as};
use soundcheck_core::{error::Result, types::*, SoundcheckError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn genre_from_row(row: &SqliteRow) -> Result<Genre> {
    Ok(Genre {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        "SELECT id, name
         FROM genres
         ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(genre_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: GenreId) -> Result<Option<Genre>> {
    let row = sqlx::query(
        "SELECT id, name
         FROM genres
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(genre_from_row).transpose()
}

pub async fn create(pool: &SqlitePool, genre: CreateGenre) -> Result<Genre> {
    let name = genre.name.trim();
    if name.is_empty() {
        return Err(SoundcheckError::invalid_input("genre name is required"));
    }

    let result = sqlx::query("INSERT INTO genres (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .map_err(conflict_as("Genre already exists"))?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| SoundcheckError::storage("Failed to retrieve created genre"))
}

/// Get all genres for a specific album
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Genre>> {
    let rows = sqlx::query(
        "SELECT g.id, g.name
         FROM genres g
         INNER JOIN album_genres ag ON g.id = ag.genre_id
         WHERE ag.album_id = ?
         ORDER BY g.name",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(genre_from_row).collect()
}

/// Add a genre to an album
///
/// Unlike a silent `INSERT OR IGNORE`, a pair that is already linked is
/// reported as a conflict and left untouched.
pub async fn add_to_album(pool: &SqlitePool, album_id: AlbumId, genre_id: GenreId) -> Result<()> {
    if !albums::exists(pool, album_id).await? {
        return Err(SoundcheckError::not_found("Album", album_id));
    }
    if get_by_id(pool, genre_id).await?.is_none() {
        return Err(SoundcheckError::not_found("Genre", genre_id));
    }

    sqlx::query(
        "INSERT INTO album_genres (album_id, genre_id)
         VALUES (?, ?)",
    )
    .bind(album_id)
    .bind(genre_id)
    .execute(pool)
    .await
    .map_err(conflict_as("This genre is already on the album"))?;

    Ok(())
}

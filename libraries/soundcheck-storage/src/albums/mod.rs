use crate::error::missing_reference;
use soundcheck_core::{error::Result, types::*, SoundcheckError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn album_from_row(row: &SqliteRow) -> Result<Album> {
    Ok(Album {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        release_date: row.try_get("release_date")?,
        cover_image_url: row.try_get("cover_image_url")?,
        artist_id: row.try_get("artist_id")?,
        artist_name: row.try_get("artist_name")?,
    })
}

/// All albums, newest release first
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(
        "SELECT a.id, a.title, a.release_date, a.cover_image_url, a.artist_id,
                ar.name as artist_name
         FROM albums a
         JOIN artists ar ON a.artist_id = ar.id
         ORDER BY a.release_date DESC, a.id DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(album_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(
        "SELECT a.id, a.title, a.release_date, a.cover_image_url, a.artist_id,
                ar.name as artist_name
         FROM albums a
         JOIN artists ar ON a.artist_id = ar.id
         WHERE a.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(album_from_row).transpose()
}

/// Check whether an album row exists without loading it
pub async fn exists(pool: &SqlitePool, id: AlbumId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM albums WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let title = album.title.trim();
    if title.is_empty() {
        return Err(SoundcheckError::invalid_input("album title is required"));
    }

    let result = sqlx::query(
        "INSERT INTO albums (title, release_date, cover_image_url, artist_id)
         VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(album.release_date)
    .bind(&album.cover_image_url)
    .bind(album.artist_id)
    .execute(pool)
    .await
    .map_err(missing_reference("Artist", album.artist_id))?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| SoundcheckError::storage("Failed to retrieve created album"))
}

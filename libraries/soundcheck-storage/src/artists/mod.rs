use soundcheck_core::{error::Result, types::*, SoundcheckError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        bio: row.try_get("bio")?,
        formed_year: row.try_get("formed_year")?,
    })
}

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(
        "SELECT id, name, bio, formed_year
         FROM artists
         ORDER BY name, id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(artist_from_row).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(
        "SELECT id, name, bio, formed_year
         FROM artists
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(artist_from_row).transpose()
}

pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    let name = artist.name.trim();
    if name.is_empty() {
        return Err(SoundcheckError::invalid_input("artist name is required"));
    }

    let result = sqlx::query(
        "INSERT INTO artists (name, bio, formed_year)
         VALUES (?, ?, ?)",
    )
    .bind(name)
    .bind(&artist.bio)
    .bind(artist.formed_year)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| SoundcheckError::storage("Failed to retrieve created artist"))
}

//! Aggregation view over albums, artists and comments
//!
//! Every query reads `v_album_avg_rating` in a single statement, so the
//! count and the average it reports always come from the same set of
//! comment rows.

use soundcheck_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Default cap for the top-rated listing
pub const TOP_RATED_LIMIT: i64 = 10;

fn rating_from_row(row: &SqliteRow) -> Result<AlbumRating> {
    Ok(AlbumRating {
        album_id: row.try_get("album_id")?,
        title: row.try_get("title")?,
        artist_name: row.try_get("artist_name")?,
        cover_image_url: row.try_get("cover_image_url")?,
        average_rating: row.try_get("average_rating")?,
        total_comments: row.try_get("total_comments")?,
    })
}

/// All albums, most reviewed first, ties broken by average rating
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<AlbumRating>> {
    let rows = sqlx::query(
        "SELECT album_id, title, artist_name, cover_image_url, average_rating, total_comments
         FROM v_album_avg_rating
         ORDER BY total_comments DESC, average_rating DESC, album_id",
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(rating_from_row).collect()
}

/// Albums whose title or artist name contains `term`, ignoring case
///
/// Case is folded with Unicode rules on both sides, which `LIKE` only does
/// for ASCII, so the filter runs over the full listing and keeps its order.
/// An empty term matches every album.
pub async fn search(pool: &SqlitePool, term: &str) -> Result<Vec<AlbumRating>> {
    let needle = term.trim().to_lowercase();

    let mut albums = get_all(pool).await?;
    if !needle.is_empty() {
        albums.retain(|album| {
            album.title.to_lowercase().contains(&needle)
                || album.artist_name.to_lowercase().contains(&needle)
        });
    }

    Ok(albums)
}

/// Reviewed albums by average rating, best first, at most `limit` rows
pub async fn top_rated(pool: &SqlitePool, limit: i64) -> Result<Vec<AlbumRating>> {
    let rows = sqlx::query(
        "SELECT album_id, title, artist_name, cover_image_url, average_rating, total_comments
         FROM v_album_avg_rating
         WHERE total_comments > 0
         ORDER BY average_rating DESC, album_id
         LIMIT ?",
    )
    .bind(limit.max(0))
    .fetch_all(pool)
    .await?;

    rows.iter().map(rating_from_row).collect()
}

//! Review ledger: append-only comments with ratings

use crate::{albums, error::missing_reference, users};
use soundcheck_core::{error::Result, types::*, SoundcheckError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

fn comment_from_row(row: &SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        album_id: row.try_get("album_id")?,
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        rating: Rating::new(row.try_get("rating")?)?,
        comment_text: row.try_get("comment_text")?,
        created_at: row.try_get("created_at")?,
    })
}

fn user_comment_from_row(row: &SqliteRow) -> Result<UserComment> {
    Ok(UserComment {
        id: row.try_get("id")?,
        album_id: row.try_get("album_id")?,
        username: row.try_get("username")?,
        rating: Rating::new(row.try_get("rating")?)?,
        comment_text: row.try_get("comment_text")?,
        created_at: row.try_get("created_at")?,
        album_title: row.try_get("album_title")?,
        cover_image_url: row.try_get("cover_image_url")?,
    })
}

pub async fn get_by_id(pool: &SqlitePool, id: CommentId) -> Result<Option<Comment>> {
    let row = sqlx::query(
        "SELECT c.id, c.album_id, c.user_id, c.rating, c.comment_text, c.created_at,
                u.username
         FROM comments c
         JOIN users u ON c.user_id = u.id
         WHERE c.id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(comment_from_row).transpose()
}

/// Post a comment on an album
///
/// The album is checked before the author is resolved so that a bad album
/// id never creates a stray identity. Blank comment text is stored as NULL.
pub async fn create(pool: &SqlitePool, comment: CreateComment) -> Result<Comment> {
    if !albums::exists(pool, comment.album_id).await? {
        return Err(SoundcheckError::not_found("Album", comment.album_id));
    }

    let user_id = users::resolve_or_create(pool, &comment.author).await?;

    let text = comment
        .comment_text
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty());

    let result = sqlx::query(
        "INSERT INTO comments (album_id, user_id, rating, comment_text)
         VALUES (?, ?, ?, ?)",
    )
    .bind(comment.album_id)
    .bind(user_id)
    .bind(comment.rating.value())
    .bind(text)
    .execute(pool)
    .await
    .map_err(missing_reference("Album", comment.album_id))?;

    get_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| SoundcheckError::storage("Failed to retrieve created comment"))
}

/// Comments on an album, newest first
pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Comment>> {
    let rows = sqlx::query(
        "SELECT c.id, c.album_id, c.user_id, c.rating, c.comment_text, c.created_at,
                u.username
         FROM comments c
         JOIN users u ON c.user_id = u.id
         WHERE c.album_id = ?
         ORDER BY c.created_at DESC, c.id DESC",
    )
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(comment_from_row).collect()
}

/// Comments written by `username`, newest first, with the album they review
pub async fn get_by_username(pool: &SqlitePool, username: &str) -> Result<Vec<UserComment>> {
    let rows = sqlx::query(
        "SELECT c.id, c.album_id, c.rating, c.comment_text, c.created_at,
                u.username,
                a.title as album_title, a.cover_image_url
         FROM comments c
         JOIN users u ON c.user_id = u.id
         JOIN albums a ON c.album_id = a.id
         WHERE u.username = ?
         ORDER BY c.created_at DESC, c.id DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await?;

    rows.iter().map(user_comment_from_row).collect()
}

//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and indexes.

#![allow(dead_code)]

use chrono::NaiveDate;
use soundcheck_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = soundcheck_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        soundcheck_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

pub fn date(raw: &str) -> NaiveDate {
    parse_release_date(raw).expect("valid test date")
}

/// Test fixture: Create a test artist
pub async fn create_test_artist(pool: &SqlitePool, name: &str) -> ArtistId {
    soundcheck_storage::artists::create(
        pool,
        CreateArtist {
            name: name.to_string(),
            bio: None,
            formed_year: None,
        },
    )
    .await
    .expect("Failed to create test artist")
    .id
}

/// Test fixture: Create a test album
pub async fn create_test_album(
    pool: &SqlitePool,
    title: &str,
    artist_id: ArtistId,
    release_date: &str,
) -> AlbumId {
    soundcheck_storage::albums::create(
        pool,
        CreateAlbum {
            title: title.to_string(),
            release_date: date(release_date),
            cover_image_url: None,
            artist_id,
        },
    )
    .await
    .expect("Failed to create test album")
    .id
}

/// Test fixture: Post a rating on an album
pub async fn post_test_comment(
    pool: &SqlitePool,
    album_id: AlbumId,
    author: &str,
    rating: i64,
) -> Comment {
    soundcheck_storage::comments::create(
        pool,
        CreateComment {
            album_id,
            author: author.to_string(),
            rating: Rating::new(rating).expect("valid test rating"),
            comment_text: Some(format!("{author} rates it {rating}")),
        },
    )
    .await
    .expect("Failed to post test comment")
}

/// Count rows in a table
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}

use crate::{albums, artists, comments, genres, ratings, users};
use async_trait::async_trait;
use soundcheck_core::{error::Result, storage::StorageContext, types::*, SoundcheckError};
use sqlx::SqlitePool;
use std::future::Future;
use std::time::Duration;

/// Default budget for a single storage call
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Local storage context using `SQLite`
///
/// Every call is bounded by `query_timeout`; a call that runs over is
/// abandoned (rolling back any open transaction) and reported as
/// [`SoundcheckError::Timeout`].
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, query_timeout: Duration) -> Self {
        self.query_timeout = query_timeout;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T>> + Send,
    ) -> Result<T> {
        match tokio::time::timeout(self.query_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.query_timeout, "storage call timed out");
                Err(SoundcheckError::Timeout(operation.to_string()))
            }
        }
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Users
    async fn register_user(&self, user: NewUser) -> Result<User> {
        self.bounded("register_user", users::register(&self.pool, user))
            .await
    }

    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>> {
        self.bounded(
            "find_credentials_by_email",
            users::find_credentials_by_email(&self.pool, email),
        )
        .await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        self.bounded("get_all_users", users::get_all(&self.pool))
            .await
    }

    async fn resolve_or_create_user(&self, display_name: &str) -> Result<UserId> {
        self.bounded(
            "resolve_or_create_user",
            users::resolve_or_create(&self.pool, display_name),
        )
        .await
    }

    async fn delete_user(&self, username: &str) -> Result<u64> {
        self.bounded(
            "delete_user",
            users::delete_with_comments(&self.pool, username),
        )
        .await
    }

    // Artists
    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist> {
        self.bounded("create_artist", artists::create(&self.pool, artist))
            .await
    }

    async fn get_all_artists(&self) -> Result<Vec<Artist>> {
        self.bounded("get_all_artists", artists::get_all(&self.pool))
            .await
    }

    async fn get_artist_by_id(&self, id: ArtistId) -> Result<Option<Artist>> {
        self.bounded("get_artist_by_id", artists::get_by_id(&self.pool, id))
            .await
    }

    // Albums
    async fn create_album(&self, album: CreateAlbum) -> Result<Album> {
        self.bounded("create_album", albums::create(&self.pool, album))
            .await
    }

    async fn get_all_albums(&self) -> Result<Vec<Album>> {
        self.bounded("get_all_albums", albums::get_all(&self.pool))
            .await
    }

    async fn get_album_by_id(&self, id: AlbumId) -> Result<Option<Album>> {
        self.bounded("get_album_by_id", albums::get_by_id(&self.pool, id))
            .await
    }

    async fn album_exists(&self, id: AlbumId) -> Result<bool> {
        self.bounded("album_exists", albums::exists(&self.pool, id))
            .await
    }

    // Genres
    async fn create_genre(&self, genre: CreateGenre) -> Result<Genre> {
        self.bounded("create_genre", genres::create(&self.pool, genre))
            .await
    }

    async fn get_all_genres(&self) -> Result<Vec<Genre>> {
        self.bounded("get_all_genres", genres::get_all(&self.pool))
            .await
    }

    async fn get_genres_for_album(&self, album_id: AlbumId) -> Result<Vec<Genre>> {
        self.bounded(
            "get_genres_for_album",
            genres::get_by_album(&self.pool, album_id),
        )
        .await
    }

    async fn attach_genre(&self, album_id: AlbumId, genre_id: GenreId) -> Result<()> {
        self.bounded(
            "attach_genre",
            genres::add_to_album(&self.pool, album_id, genre_id),
        )
        .await
    }

    // Comments
    async fn post_comment(&self, comment: CreateComment) -> Result<Comment> {
        self.bounded("post_comment", comments::create(&self.pool, comment))
            .await
    }

    async fn get_comments_for_album(&self, album_id: AlbumId) -> Result<Vec<Comment>> {
        self.bounded(
            "get_comments_for_album",
            comments::get_by_album(&self.pool, album_id),
        )
        .await
    }

    async fn get_comments_by_user(&self, username: &str) -> Result<Vec<UserComment>> {
        self.bounded(
            "get_comments_by_user",
            comments::get_by_username(&self.pool, username),
        )
        .await
    }

    // Aggregates
    async fn get_album_ratings(&self) -> Result<Vec<AlbumRating>> {
        self.bounded("get_album_ratings", ratings::get_all(&self.pool))
            .await
    }

    async fn search_album_ratings(&self, term: &str) -> Result<Vec<AlbumRating>> {
        self.bounded("search_album_ratings", ratings::search(&self.pool, term))
            .await
    }

    async fn get_top_rated_albums(&self, limit: i64) -> Result<Vec<AlbumRating>> {
        self.bounded("get_top_rated_albums", ratings::top_rated(&self.pool, limit))
            .await
    }
}

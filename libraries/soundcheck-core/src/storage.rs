//! Storage capability used by every domain component

use crate::error::Result;
use crate::types::{
    Album, AlbumId, AlbumRating, Artist, ArtistId, Comment, CreateAlbum, CreateArtist,
    CreateComment, CreateGenre, Credentials, Genre, GenreId, NewUser, User, UserComment, UserId,
};
use async_trait::async_trait;

/// Storage context providing access to database operations
///
/// The composition root owns one implementation and hands it to whoever needs
/// it; there is no global handle. Implementations are responsible for the
/// transactional guarantees documented on each method.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Register a credentialed user
    ///
    /// Fails with `Conflict` when the username or email is already taken.
    async fn register_user(&self, user: NewUser) -> Result<User>;

    /// Look up the stored credential for an email address
    async fn find_credentials_by_email(&self, email: &str) -> Result<Option<Credentials>>;

    /// Get all users
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Resolve a display name to a user id, creating the user if absent
    ///
    /// Idempotent under concurrent callers: at most one row is ever created
    /// per normalized name.
    async fn resolve_or_create_user(&self, display_name: &str) -> Result<UserId>;

    /// Delete a user and all of their comments in one transaction
    ///
    /// Returns the number of comments removed, or `NotFound`.
    async fn delete_user(&self, username: &str) -> Result<u64>;

    // ========================================================================
    // Catalog
    // ========================================================================

    async fn create_artist(&self, artist: CreateArtist) -> Result<Artist>;

    async fn get_all_artists(&self) -> Result<Vec<Artist>>;

    async fn get_artist_by_id(&self, id: ArtistId) -> Result<Option<Artist>>;

    /// Create an album; the artist must exist
    async fn create_album(&self, album: CreateAlbum) -> Result<Album>;

    /// All albums with artist names, newest release first
    async fn get_all_albums(&self) -> Result<Vec<Album>>;

    async fn get_album_by_id(&self, id: AlbumId) -> Result<Option<Album>>;

    /// Whether an album row exists, without loading it
    async fn album_exists(&self, id: AlbumId) -> Result<bool>;

    async fn create_genre(&self, genre: CreateGenre) -> Result<Genre>;

    /// All genres ordered by name
    async fn get_all_genres(&self) -> Result<Vec<Genre>>;

    async fn get_genres_for_album(&self, album_id: AlbumId) -> Result<Vec<Genre>>;

    /// Link a genre to an album; a repeated pair is a `Conflict`
    async fn attach_genre(&self, album_id: AlbumId, genre_id: GenreId) -> Result<()>;

    // ========================================================================
    // Reviews
    // ========================================================================

    /// Post a comment, resolving its author to a user identity first
    async fn post_comment(&self, comment: CreateComment) -> Result<Comment>;

    /// Comments on an album, newest first
    async fn get_comments_for_album(&self, album_id: AlbumId) -> Result<Vec<Comment>>;

    /// Comments written by a user, newest first
    async fn get_comments_by_user(&self, username: &str) -> Result<Vec<UserComment>>;

    // ========================================================================
    // Aggregates
    // ========================================================================

    /// Every album with its aggregate, most reviewed and best rated first
    async fn get_album_ratings(&self) -> Result<Vec<AlbumRating>>;

    /// Case-insensitive substring search over album titles and artist names
    async fn search_album_ratings(&self, term: &str) -> Result<Vec<AlbumRating>>;

    /// Reviewed albums by average rating, capped at `limit`
    async fn get_top_rated_albums(&self, limit: i64) -> Result<Vec<AlbumRating>>;
}

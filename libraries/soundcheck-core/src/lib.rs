//! Soundcheck Core
//!
//! Platform-agnostic domain types, the storage capability trait, and error
//! handling for the Soundcheck review catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Artist`, `Album`, `Genre`, `Comment`, `User`, and the
//!   derived `AlbumRating`
//! - **Storage Trait**: `StorageContext`, implemented by `soundcheck-storage`
//! - **Error Handling**: Unified `SoundcheckError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soundcheck_core::types::{normalize_username, parse_release_date, Rating};
//!
//! assert_eq!(normalize_username("  "), "anonymous");
//! assert!(parse_release_date("2024-01-15").is_ok());
//! assert!(Rating::new(6).is_err());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, Result, SoundcheckError};
pub use storage::StorageContext;

pub use types::{
    Album, AlbumDetails, AlbumId, AlbumRating, Artist, ArtistId, Comment, CommentId, CreateAlbum,
    CreateArtist, CreateComment, CreateGenre, Credentials, Genre, GenreId, NewUser, Rating, User,
    UserComment, UserId,
};

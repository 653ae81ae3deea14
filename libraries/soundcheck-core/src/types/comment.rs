//! Review (comment) types

use super::{AlbumId, Rating, UserId};
use serde::{Deserialize, Serialize};

pub type CommentId = i64;

/// A rating with optional text, left by a user on an album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub album_id: AlbumId,
    pub user_id: UserId,
    pub username: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,
    pub created_at: String,
}

/// A comment as shown on a user's profile, joined with the album it reviews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserComment {
    pub id: CommentId,
    pub album_id: AlbumId,
    pub username: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_text: Option<String>,
    pub created_at: String,
    pub album_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

/// Data for posting a new comment
///
/// `author` is a display name; it is resolved to a user identity before the
/// comment is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateComment {
    pub album_id: AlbumId,
    pub author: String,
    pub rating: Rating,
    pub comment_text: Option<String>,
}

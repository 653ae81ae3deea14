//! Album types

use super::{ArtistId, Comment, Genre};
use crate::error::{Result, SoundcheckError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// Calendar format accepted for release dates
pub const RELEASE_DATE_FORMAT: &str = "%Y-%m-%d";

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub release_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
    pub artist_id: ArtistId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist_name: Option<String>, // Denormalized
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub title: String,
    pub release_date: NaiveDate,
    pub cover_image_url: Option<String>,
    pub artist_id: ArtistId,
}

/// An album together with its reviews and genres
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumDetails {
    pub album_details: Album,
    pub comments: Vec<Comment>,
    pub genres: Vec<Genre>,
}

/// Parse a `YYYY-MM-DD` release date
///
/// Only the zero-padded form is accepted; `2024-1-5` is rejected even though
/// it names a valid day.
pub fn parse_release_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let invalid = || SoundcheckError::invalid_input("Invalid date format, use YYYY-MM-DD");

    if raw.len() != 10 {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, RELEASE_DATE_FORMAT).map_err(|_| invalid())
}

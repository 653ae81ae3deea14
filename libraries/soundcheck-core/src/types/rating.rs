//! Ratings and the per-album aggregate

use super::AlbumId;
use crate::error::{Result, SoundcheckError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// A review score in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    /// Validate a raw score
    pub fn new(value: i64) -> Result<Self> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SoundcheckError::invalid_input(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
            )))
        }
    }

    pub fn value(self) -> i64 {
        i64::from(self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = SoundcheckError;

    fn try_from(value: i64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived rating summary for one album
///
/// Never stored; recomputed from the comment rows on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRating {
    pub album_id: AlbumId,
    pub title: String,
    pub artist_name: String,
    pub cover_image_url: Option<String>,
    /// Mean of all ratings, `0.0` when the album has no comments
    pub average_rating: f64,
    pub total_comments: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn zero_and_six_are_rejected() {
        assert!(matches!(Rating::new(0), Err(SoundcheckError::InvalidInput(_))));
        assert!(matches!(Rating::new(6), Err(SoundcheckError::InvalidInput(_))));
    }

    #[test]
    fn deserializing_out_of_range_fails() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&Rating::new(3).unwrap()).unwrap();
        assert_eq!(json, "3");
    }

    proptest! {
        #[test]
        fn accepts_exactly_the_closed_range(value in -1_000i64..1_000) {
            let accepted = Rating::new(value).is_ok();
            prop_assert_eq!(accepted, (1..=5).contains(&value));
        }

        #[test]
        fn value_round_trips(value in 1i64..=5) {
            prop_assert_eq!(Rating::new(value).unwrap().value(), value);
        }
    }
}

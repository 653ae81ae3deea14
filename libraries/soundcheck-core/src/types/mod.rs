mod album;
mod artist;
mod comment;
mod genre;
mod rating;
mod user;

pub use album::{parse_release_date, Album, AlbumDetails, AlbumId, CreateAlbum, RELEASE_DATE_FORMAT};
pub use artist::{Artist, ArtistId, CreateArtist};
pub use comment::{Comment, CommentId, CreateComment, UserComment};
pub use genre::{CreateGenre, Genre, GenreId};
pub use rating::{AlbumRating, Rating, MAX_RATING, MIN_RATING};
pub use user::{
    normalize_username, placeholder_email, Credentials, NewUser, User, UserId, ANONYMOUS_EMAIL,
    ANONYMOUS_USERNAME, UNUSABLE_PASSWORD_HASH,
};

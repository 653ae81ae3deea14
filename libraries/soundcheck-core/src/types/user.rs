/// User domain types
use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// Identity that unnamed reviewers resolve to
pub const ANONYMOUS_USERNAME: &str = "anonymous";

/// Email recorded for the anonymous identity
pub const ANONYMOUS_EMAIL: &str = "anonymous@app.com";

/// Credential stored for identities created implicitly by commenting.
///
/// Not a valid bcrypt hash, so verification against it always fails.
pub const UNUSABLE_PASSWORD_HASH: &str = "!";

/// User account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,

    /// Unique display name
    pub username: String,

    /// Unique email address
    pub email: Option<String>,

    /// Account creation timestamp
    pub created_at: String,
}

/// Data for registering a credentialed user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed; plaintext passwords never reach storage
    pub password_hash: String,
}

/// Stored credential for a login lookup
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: UserId,
    pub username: String,
    pub password_hash: String,
}

/// Normalize a display name for identity resolution
///
/// Surrounding whitespace is dropped and an empty name becomes
/// [`ANONYMOUS_USERNAME`].
pub fn normalize_username(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ANONYMOUS_USERNAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Email synthesized for an identity created on first comment
pub fn placeholder_email(username: &str) -> String {
    if username == ANONYMOUS_USERNAME {
        ANONYMOUS_EMAIL.to_string()
    } else {
        format!("{username}@app.com")
    }
}

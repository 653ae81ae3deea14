/// Core error types for Soundcheck
use thiserror::Error;

/// Result type alias using `SoundcheckError`
pub type Result<T> = std::result::Result<T, SoundcheckError>;

/// Core error type for Soundcheck
///
/// Every domain operation returns one of these variants. Storage drivers
/// translate their own failures into this enum, so nothing driver-specific
/// leaks past the storage crate.
#[derive(Error, Debug)]
pub enum SoundcheckError {
    /// Malformed input detected before touching storage
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uniqueness violation (duplicate username, email, genre link, ...)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Credentials did not match
    #[error("Invalid credentials")]
    Unauthorized,

    /// Storage unavailable or a statement failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// A storage call exceeded its time budget
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Password hashing failed
    #[error("Credential error: {0}")]
    Credential(String),
}

/// Coarse classification of [`SoundcheckError`] used by transport layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    NotFound,
    Unauthorized,
    Internal,
}

impl SoundcheckError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::Validation,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Storage(_) | Self::Timeout(_) | Self::Credential(_) => ErrorKind::Internal,
        }
    }

    /// True when the failure came from a uniqueness constraint
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for SoundcheckError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::Conflict("record already exists".to_string())
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                Self::not_found("Referenced record", "unknown")
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                Self::InvalidInput("value violates a constraint".to_string())
            }
            sqlx::Error::PoolTimedOut => Self::Timeout("waiting for a connection".to_string()),
            _ => Self::Storage(err.to_string()),
        }
    }
}

/// Storage-specific errors
use soundcheck_core::SoundcheckError;
use thiserror::Error;

/// Failures while bringing the database up
///
/// Per-operation failures are reported as [`SoundcheckError`]; this type only
/// covers pool creation and migrations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Translate a failed write, replacing the driver's uniqueness message with
/// `message` so constraint names never reach callers.
pub(crate) fn conflict_as(message: &'static str) -> impl Fn(sqlx::Error) -> SoundcheckError {
    move |err| match SoundcheckError::from(err) {
        SoundcheckError::Conflict(_) => SoundcheckError::conflict(message),
        other => other,
    }
}

/// Translate a failed write whose foreign key points at `entity`.
pub(crate) fn missing_reference(
    entity: &'static str,
    id: i64,
) -> impl Fn(sqlx::Error) -> SoundcheckError {
    move |err| match SoundcheckError::from(err) {
        SoundcheckError::NotFound { .. } => SoundcheckError::not_found(entity, id),
        other => other,
    }
}

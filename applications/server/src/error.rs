/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use soundcheck_core::{ErrorKind, SoundcheckError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Domain(#[from] SoundcheckError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl ServerError {
    /// Status code and client-facing message
    ///
    /// Internal failures are logged here and replaced by a fixed message.
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Domain(err) => domain_status(err),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                internal()
            }
        }
    }
}

fn internal() -> (StatusCode, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn domain_status(err: SoundcheckError) -> (StatusCode, String) {
    match err.kind() {
        ErrorKind::Validation => match err {
            SoundcheckError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            other => (StatusCode::BAD_REQUEST, other.to_string()),
        },
        ErrorKind::Conflict => match err {
            SoundcheckError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            other => (StatusCode::CONFLICT, other.to_string()),
        },
        ErrorKind::NotFound => match err {
            SoundcheckError::NotFound { entity, .. } => {
                (StatusCode::NOT_FOUND, format!("{entity} not found"))
            }
            other => (StatusCode::NOT_FOUND, other.to_string()),
        },
        ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string()),
        ErrorKind::Internal => {
            tracing::error!("Domain error: {:?}", err);
            internal()
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

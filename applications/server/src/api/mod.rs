/// API route modules
pub mod albums;
pub mod artists;
pub mod auth;
pub mod comments;
pub mod genres;
pub mod health;
pub mod users;

use crate::error::ServerError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejections render as `{"error": ...}` with 400
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

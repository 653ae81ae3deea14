//! Soundcheck Server Library
//!
//! HTTP service for the Soundcheck review catalog: artists, albums, genres,
//! rated comments and the per-album rating aggregates.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod router;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use services::auth::AuthService;
pub use state::AppState;

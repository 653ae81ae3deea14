/// HTTP routing
use crate::{
    api,
    config::CorsSettings,
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// All routes live under `api_prefix`; a prefix of `/` mounts them at the
/// root.
pub fn create_router(app_state: AppState, api_prefix: &str, cors: &CorsSettings) -> Result<Router> {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        // Credentials
        .route("/signup", post(api::auth::signup))
        .route("/login", post(api::auth::login))
        // Artists
        .route(
            "/artists",
            get(api::artists::list_artists).post(api::artists::create_artist),
        )
        .route("/artists/:id", get(api::artists::get_artist))
        // Albums
        .route(
            "/albums",
            get(api::albums::list_albums).post(api::albums::create_album),
        )
        .route("/albums/search", get(api::albums::search_albums))
        .route("/albums/top-rated", get(api::albums::top_rated_albums))
        .route("/albums/by-rating", get(api::albums::albums_by_rating))
        .route("/albums/:id", get(api::albums::get_album))
        .route(
            "/albums/:id/comments",
            get(api::comments::list_album_comments).post(api::comments::post_comment),
        )
        .route("/albums/:id/genres", post(api::genres::attach_genre))
        // Genres
        .route(
            "/genres",
            get(api::genres::list_genres).post(api::genres::create_genre),
        )
        // Users
        .route(
            "/users/:username/comments",
            get(api::users::list_user_comments),
        )
        .route("/users/:username", axum::routing::delete(api::users::delete_user));

    let prefix = api_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(prefix, api_routes)
    };

    Ok(router
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(cors_layer(cors)?)
        .with_state(app_state))
}

fn cors_layer(cors: &CorsSettings) -> Result<CorsLayer> {
    if cors.allowed_origins.is_empty() {
        return Ok(CorsLayer::permissive());
    }

    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ServerError::Config(format!("invalid CORS origin: {origin}")))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origin_list_is_permissive() {
        let cors = CorsSettings {
            allowed_origins: vec![],
        };
        assert!(cors_layer(&cors).is_ok());
    }

    #[test]
    fn unparseable_origin_is_a_config_error() {
        let cors = CorsSettings {
            allowed_origins: vec!["http://bad\norigin".to_string()],
        };
        assert!(matches!(cors_layer(&cors), Err(ServerError::Config(_))));
    }
}

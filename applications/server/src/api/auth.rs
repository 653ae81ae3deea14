/// Signup and login API routes
use crate::{api::ApiJson, error::Result, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}

/// POST /signup
pub async fn signup(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    app_state
        .auth_service
        .register(
            app_state.store.as_ref(),
            &req.username,
            &req.email,
            &req.password,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// POST /login
///
/// Verifies the credentials and echoes the username; no session is issued.
pub async fn login(
    State(app_state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let username = app_state
        .auth_service
        .authenticate(app_state.store.as_ref(), &req.email, &req.password)
        .await?;

    Ok(Json(LoginResponse { username }))
}

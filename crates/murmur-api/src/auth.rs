use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};

use murmur_store::StoreError;
use murmur_types::api::{AuthResponse, LoginRequest, RegisterRequest};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    // Argon2 is CPU-bound; keep it off the async workers.
    let users = state.users.clone();
    let user = tokio::task::spawn_blocking(move || {
        users.register(&req.username, &req.password, &req.profile_picture)
    })
    .await??;

    let token = state.tokens.issue(user.id, &user.username)?;
    info!("User {} registered as {}", user.id, user.username);

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let users = state.users.clone();
    let username = req.username.clone();
    let user = tokio::task::spawn_blocking(move || users.authenticate(&req.username, &req.password))
        .await?
        .inspect_err(|e| {
            if matches!(e, StoreError::InvalidCredentials) {
                warn!("Failed login for '{}'", username);
            }
        })?;

    let token = state.tokens.issue(user.id, &user.username)?;
    info!("User {} logged in", user.id);

    Ok(Json(AuthResponse { token, user }))
}

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Validate the bearer token and attach the caller's
/// [`AuthUser`](murmur_types::api::AuthUser) to the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;
    let user = state.tokens.validate(token)?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("authorization header required"))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("malformed authorization header"))?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(ApiError::Unauthorized("malformed authorization header")),
    }
}

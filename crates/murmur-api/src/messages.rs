use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use murmur_types::api::{AuthUser, SendMessageRequest};

use crate::error::ApiError;
use crate::state::AppState;

/// The whole room, oldest first. No paging.
pub async fn list_messages(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.messages.list_all()?))
}

/// Post to the room as the token's user. Username and picture are taken
/// from the user store, not from the token.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let message = state.messages.append(user.user_id, &req.content)?;
    info!("Message {} sent by user {}", message.id, message.user_id);

    Ok((StatusCode::CREATED, Json(message)))
}

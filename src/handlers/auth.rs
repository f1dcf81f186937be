use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::models::user::{LoginInput, RegisterInput};
use crate::utils::{error::ApiError, json::JsonBody};
use crate::AppState;

/// Confirmation body shared by the mutating endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Register endpoint
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    tracing::debug!("Register endpoint called with email: {:?}", payload.email);

    state.directory.register(
        payload.username.as_deref().unwrap_or_default(),
        payload.email.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully.")),
    ))
}

/// Login endpoint
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.directory.authenticate(
        payload.email.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )?;

    Ok(Json(MessageResponse::new("Login successful.")))
}

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::handlers::auth::MessageResponse;
use crate::models::user::{UpdateUserInput, UserRecord, UserSummary};
use crate::utils::{error::ApiError, json::JsonBody};
use crate::AppState;

/// Single-user lookup result, redacted when the directory is configured to
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UserView {
    Full(UserRecord),
    Redacted(UserSummary),
}

impl UserView {
    fn new(record: UserRecord, redact: bool) -> Self {
        if redact {
            UserView::Redacted(record.into())
        } else {
            UserView::Full(record)
        }
    }
}

/// Find a user by username
pub async fn find_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let record = state.directory.find_by_username(&username)?;
    Ok(Json(UserView::new(record, state.config.directory.redact_lookups)))
}

/// Find a user by email
pub async fn find_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<UserView>, ApiError> {
    let record = state.directory.find_by_email(&email)?;
    Ok(Json(UserView::new(record, state.config.directory.redact_lookups)))
}

/// List every user without passwords
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<UserSummary>> {
    Json(state.directory.list_all())
}

/// Update a user's username, email and password
pub async fn update_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    JsonBody(payload): JsonBody<UpdateUserInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.directory.update(&username, payload)?;

    Ok(Json(MessageResponse::new("User details updated successfully.")))
}

/// Delete a user by username
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state.directory.delete_by_username(&username)?;

    Ok(Json(MessageResponse::new(format!(
        "Oh no, you've deleted '{}'!",
        removed.username
    ))))
}

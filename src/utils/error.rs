use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::directory::DirectoryError;

/// Unified API error type for HTTP boundary
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        let message = err.to_string();
        match err {
            DirectoryError::Validation(_)
            | DirectoryError::EmailTaken
            | DirectoryError::UsernameTaken => ApiError::BadRequest(message),
            DirectoryError::InvalidCredentials => ApiError::Unauthorized(message),
            DirectoryError::NotFound => ApiError::NotFound(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validator::ValidationError;
    use http_body_util::BodyExt;

    async fn extract_error_json(response: Response) -> serde_json::Value {
        let body = response.into_body();
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_response() {
        let error = ApiError::BadRequest("Invalid email format.".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = extract_error_json(response).await;
        assert_eq!(json["error"], "Invalid email format.");
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = ApiError::from(DirectoryError::InvalidCredentials).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = extract_error_json(response).await;
        assert_eq!(json["error"], "Invalid email or password.");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ApiError::from(DirectoryError::NotFound).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = extract_error_json(response).await;
        assert_eq!(json["error"], "User not found.");
    }

    #[tokio::test]
    async fn test_internal_error_response() {
        let error = ApiError::Internal("Internal server error.".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = extract_error_json(response).await;
        assert_eq!(json["error"], "Internal server error.");
    }

    #[test]
    fn test_directory_errors_map_to_bad_request() {
        for err in [
            DirectoryError::Validation(ValidationError::PasswordTooShort),
            DirectoryError::EmailTaken,
            DirectoryError::UsernameTaken,
        ] {
            let expected = err.to_string();
            match ApiError::from(err) {
                ApiError::BadRequest(msg) => assert_eq!(msg, expected),
                other => panic!("Expected BadRequest, got {:?}", other),
            }
        }
    }
}

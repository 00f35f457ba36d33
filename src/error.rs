use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced by the OAuth manager and the route handlers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Spotify request failed: {0}")]
    Upstream(String),
    #[error("Token store failure: {0}")]
    Store(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Store(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::NotAuthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Not authenticated", "auth_needed": true }),
            ),
            AppError::Upstream(detail) => {
                tracing::warn!(%detail, "upstream request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "error": "Upstream request failed" }),
                )
            }
            AppError::Store(detail) => {
                tracing::error!(%detail, "token store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal error" }),
                )
            }
            AppError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, json!({ "error": reason }))
            }
        };

        (status, Json(body)).into_response()
    }
}

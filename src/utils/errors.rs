//! Error handling
//!
//! Closed set of failure kinds for the settlement engine, plus their
//! conversion to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Application error taxonomy
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid odometer range: before={before}, after={after}")]
    InvalidOdometerRange { before: i64, after: i64 },

    #[error("Invalid participant count: {0}")]
    InvalidParticipantCount(usize),

    #[error("Person {person_id} does not own every referenced record")]
    NotOwned { person_id: Uuid },

    #[error("Usage event {usage_event_id} has no share rows")]
    DanglingReference { usage_event_id: Uuid },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Error response for the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Storage Failure".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("STORAGE_FAILURE".to_string()),
                    },
                )
            }

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: Some("VALIDATION_ERROR".to_string()),
                },
            ),

            AppError::InvalidOdometerRange { before, after } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Odometer Range".to_string(),
                    message: "The odometer readings are in the wrong order".to_string(),
                    details: Some(json!({ "kilometer_before": before, "kilometer_after": after })),
                    code: Some("INVALID_ODOMETER_RANGE".to_string()),
                },
            ),

            AppError::InvalidParticipantCount(n) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Participant Count".to_string(),
                    message: "A usage event needs at least one participant".to_string(),
                    details: Some(json!({ "participant_count": n })),
                    code: Some("INVALID_PARTICIPANT_COUNT".to_string()),
                },
            ),

            AppError::NotOwned { person_id } => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: "Not Owned".to_string(),
                    message: "One or more referenced records do not belong to this person"
                        .to_string(),
                    details: Some(json!({ "person_id": person_id })),
                    code: Some("NOT_OWNED".to_string()),
                },
            ),

            AppError::DanglingReference { usage_event_id } => {
                // Store-consistency violation, never swallowed.
                tracing::error!("dangling usage event reference: {}", usage_event_id);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Dangling Reference".to_string(),
                        message: "A usage event is missing its share rows".to_string(),
                        details: Some(json!({ "usage_event_id": usage_event_id })),
                        code: Some("DANGLING_REFERENCE".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                },
            ),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Typed result for fallible operations
pub type AppResult<T> = Result<T, AppError>;

/// Helper for resource-not-found errors
pub fn not_found_error(resource: &str, id: &Uuid) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-wide error type. Every fallible layer converges here so that
/// handlers can return `Result<_, AppError>` and get a JSON response for free.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("email already registered")]
    EmailAlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid token")]
    InvalidToken,

    #[error("user not found")]
    UserNotFound,

    #[error("sale not found")]
    SaleNotFound,

    /// The caller is authenticated but not allowed to touch the resource.
    #[error("forbidden")]
    Forbidden,

    /// Live snapshot has not been primed (backend unreachable). Distinct from
    /// an empty result set: the dashboard must report outage, not zeros.
    #[error("snapshot unavailable")]
    SnapshotUnavailable,

    #[error("database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("jwt error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Return every field-level detail so forms can surface them inline.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmailAlreadyExists => {
                (StatusCode::CONFLICT, "This email is already in use.")
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "Invalid email or password.")
            }
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Missing or invalid authentication token.",
            ),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found."),
            AppError::SaleNotFound => (StatusCode::NOT_FOUND, "Transaction not found."),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have access to this resource.",
            ),
            AppError::SnapshotUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Sales data is currently unavailable.",
            ),

            // Everything else (DatabaseError, InternalServerError, ...) is a 500.
            // `tracing` records the detailed message thiserror produced.
            ref e => {
                tracing::error!("internal server error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred.",
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

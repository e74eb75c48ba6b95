//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to
//! Sentry before responding to the client. Route handlers return
//! `Result<T, AppError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A stored value could not be interpreted (e.g. an unknown product
    /// kind tag in a cart line item).
    #[error("Data corruption: {0}")]
    DataCorruption(String),

    /// Resource not found (unresolved product kind/slug, missing line
    /// item, missing category).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Submitted data failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The request needs an authenticated customer.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The operation conflicts with current state (e.g. cart already
    /// frozen by a completed checkout).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            RepositoryError::Conflict(what) => Self::Conflict(what),
            RepositoryError::DataCorruption(what) => Self::DataCorruption(what),
            RepositoryError::Database(e) => Self::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Database(_) | Self::DataCorruption(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) | Self::DataCorruption(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) | Self::DataCorruption(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn error_display() {
        let err = AppError::NotFound("notebook 'zenbook-14'".to_string());
        assert_eq!(err.to_string(), "Not found: notebook 'zenbook-14'");

        let err = AppError::Validation("phone is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: phone is required");
    }

    #[test]
    fn status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Validation("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Unauthorized("x".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Conflict("x".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("x".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn repository_errors_map_to_client_statuses() {
        let err = AppError::from(RepositoryError::NotFound("cart item".to_string()));
        assert_eq!(get_status(err), StatusCode::NOT_FOUND);

        let err = AppError::from(RepositoryError::Conflict("cart already ordered".to_string()));
        assert_eq!(get_status(err), StatusCode::CONFLICT);
    }
}

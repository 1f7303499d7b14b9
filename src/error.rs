//! Error types and their HTTP rendering.
//!
//! [`StoreError`] classifies failures of the backing store; [`AppError`] is what
//! handlers return and what gets serialized to clients as
//! `{"error": {"code", "message", "details"}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// Failures of the distributed store.
///
/// A missing row is never a `StoreError`; lookups report it as `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The initial session could not be established.
    #[error("failed to connect to store: {0}")]
    Connect(String),

    /// A lookup failed, timed out, or returned an unreadable result.
    #[error("failed to read from store: {0}")]
    Read(String),

    /// An insert was not acknowledged at the required consistency level.
    #[error("failed to write to store: {0}")]
    Write(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error returned by services and handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed client input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested mapping does not exist (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Store or other server-side failure (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Wraps a store failure with a message naming the step that failed.
    pub fn store(message: impl Into<String>, err: &StoreError) -> Self {
        Self::internal(message, json!({ "reason": err.to_string() }))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::store("Store error", &err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<String> = field_errors.keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();

        let message = field_errors
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Validation failed".to_string());

        AppError::bad_request(message, json!({ "fields": fields }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_becomes_internal() {
        let err: AppError = StoreError::Read("timed out".to_string()).into();

        assert!(matches!(err, AppError::Internal { .. }));
        let info = err.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert_eq!(info.details["reason"], "failed to read from store: timed out");
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::Write("no quorum".to_string()).to_string(),
            "failed to write to store: no quorum"
        );
        assert_eq!(
            StoreError::Connect("refused".to_string()).to_string(),
            "failed to connect to store: refused"
        );
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::not_found("Short URL not found", json!({ "short_key": "abc" }));
        assert_eq!(err.to_string(), "Short URL not found");
    }
}

//! `AppError` and the JSON error body

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Error returned by every service and handler.
///
/// `message` is meant for the caller; `details` carries machine-readable
/// context such as offending field names or ids.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<Map<String, Value>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Error carrying the code's generic message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Infrastructure failure (database, bug) rather than a bad request
    pub fn is_system(&self) -> bool {
        self.code.category() == ErrorCategory::System
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, message)
    }

    /// Generic 404 for `resource`; entity services use their own codes
    pub fn not_found(resource: impl Into<String>) -> Self {
        let resource = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{resource} not found"))
            .with_detail("resource", resource)
    }

    /// Uniqueness violation without a more specific code
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::AlreadyExists, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, message)
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, message)
    }
}

impl From<validator::ValidationErrors> for AppError {
    /// One detail entry per invalid field, rule messages joined by ", "
    fn from(errors: validator::ValidationErrors) -> Self {
        errors
            .field_errors()
            .into_iter()
            .fold(Self::validation("Request validation failed"), |err, (field, rules)| {
                let reasons = rules
                    .iter()
                    .map(|rule| match &rule.message {
                        Some(message) => message.to_string(),
                        None => rule.code.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                err.with_detail(field.to_string(), reasons)
            })
    }
}

/// Body of every non-2xx response.
///
/// ```json
/// {"code": 1002, "message": "Email ada@x.com is already used", "details": {...}}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Map<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        // System errors never expose their internal message
        if err.is_system() {
            return Self {
                code: err.code,
                message: err.code.message().to_string(),
                details: None,
            };
        }
        Self {
            code: err.code,
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        if self.is_system() {
            tracing::error!(code = %self.code, message = %self.message, "System error");
        }
        (self.http_status(), axum::Json(ErrorBody::from(&self))).into_response()
    }
}

//! Error handling shared by every crate in the workspace
//!
//! Services return [`AppResult`]; axum renders an [`AppError`] as an
//! [`ErrorBody`] with the status from [`ErrorCode::http_status`].
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::validation("Invalid email format").with_detail("field", "email");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};

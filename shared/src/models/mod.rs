//! Data models
//!
//! Shared between academy-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).
//!
//! Rows carry foreign keys as plain ids; related records are looked up on
//! demand, never embedded.

pub mod author;
pub mod course;
pub mod course_module;
pub mod purchased_course;
pub mod student;

// Re-exports
pub use author::*;
pub use course::*;
pub use course_module::*;
pub use purchased_course::*;
pub use student::*;

use validator::ValidationError;

/// Reject strings made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

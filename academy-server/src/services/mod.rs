//! Domain services
//!
//! One stateless service per entity, each holding a clone of the pool.
//! Writes run inside a single transaction: every early `?` return drops the
//! transaction uncommitted, so a failed operation leaves no partial writes.
//! Reads use a plain pooled connection.

pub mod author;
pub mod course;
pub mod course_module;
pub mod purchased_course;
pub mod student;

pub use author::AuthorService;
pub use course::CourseService;
pub use course_module::ModuleService;
pub use purchased_course::PurchasedCourseService;
pub use student::StudentService;

use crate::db::repository::RepoError;
use shared::error::{AppError, ErrorCode};
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Open a write transaction that takes SQLite's write lock at `BEGIN`.
///
/// A concurrent writer waits (up to the busy timeout) for the holder to
/// commit, so its uniqueness lookups always see the committed row.
pub(crate) async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, RepoError> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}

/// Turn a storage-level unique violation into the domain conflict `code`.
///
/// Lookups under [`begin_write`] catch duplicates between requests; this
/// maps the UNIQUE constraint for anything that still reaches the insert.
pub(crate) fn conflict_on_duplicate(
    code: ErrorCode,
    message: String,
) -> impl FnOnce(RepoError) -> AppError {
    move |err| match err {
        RepoError::Duplicate(_) => AppError::with_message(code, message),
        other => other.into(),
    }
}

/// `<Entity> <id> not found` with the id attached as a detail
pub(crate) fn not_found(code: ErrorCode, entity: &str, id: i64) -> AppError {
    AppError::with_message(code, format!("{entity} {id} not found")).with_detail("id", id)
}

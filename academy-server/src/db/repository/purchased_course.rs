//! Purchased Course Repository

use super::{RepoError, RepoResult};
use shared::models::PurchasedCourse;
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, student_id, course_id, purchase_date, completed";

/// Values for a new purchase row; defaults are resolved by the caller
#[derive(Debug, Clone, Copy)]
pub struct NewPurchase {
    pub student_id: i64,
    pub course_id: i64,
    pub purchase_date: i64,
    pub completed: bool,
}

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<PurchasedCourse>> {
    let rows = sqlx::query_as::<_, PurchasedCourse>(&format!(
        "SELECT {COLUMNS} FROM purchased_courses ORDER BY id"
    ))
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<PurchasedCourse>> {
    let row = sqlx::query_as::<_, PurchasedCourse>(&format!(
        "SELECT {COLUMNS} FROM purchased_courses WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

pub async fn find_by_student_id(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> RepoResult<Vec<PurchasedCourse>> {
    let rows = sqlx::query_as::<_, PurchasedCourse>(&format!(
        "SELECT {COLUMNS} FROM purchased_courses WHERE student_id = ? ORDER BY id"
    ))
    .bind(student_id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn find_by_course_id(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> RepoResult<Vec<PurchasedCourse>> {
    let rows = sqlx::query_as::<_, PurchasedCourse>(&format!(
        "SELECT {COLUMNS} FROM purchased_courses WHERE course_id = ? ORDER BY id"
    ))
    .bind(course_id)
    .fetch_all(conn)
    .await?;
    Ok(rows)
}

pub async fn find_by_student_and_course(
    conn: &mut SqliteConnection,
    student_id: i64,
    course_id: i64,
) -> RepoResult<Option<PurchasedCourse>> {
    let row = sqlx::query_as::<_, PurchasedCourse>(&format!(
        "SELECT {COLUMNS} FROM purchased_courses WHERE student_id = ? AND course_id = ? LIMIT 1"
    ))
    .bind(student_id)
    .bind(course_id)
    .fetch_optional(conn)
    .await?;
    Ok(row)
}

pub async fn exists_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let found: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM purchased_courses WHERE id = ?)")
            .bind(id)
            .fetch_one(conn)
            .await?;
    Ok(found != 0)
}

pub async fn exists_by_student_id(conn: &mut SqliteConnection, student_id: i64) -> RepoResult<bool> {
    let found: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM purchased_courses WHERE student_id = ?)")
            .bind(student_id)
            .fetch_one(conn)
            .await?;
    Ok(found != 0)
}

pub async fn exists_by_course_id(conn: &mut SqliteConnection, course_id: i64) -> RepoResult<bool> {
    let found: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM purchased_courses WHERE course_id = ?)")
            .bind(course_id)
            .fetch_one(conn)
            .await?;
    Ok(found != 0)
}

pub async fn insert(conn: &mut SqliteConnection, data: NewPurchase) -> RepoResult<PurchasedCourse> {
    let row = sqlx::query_as::<_, PurchasedCourse>(&format!(
        "INSERT INTO purchased_courses (student_id, course_id, purchase_date, completed) \
         VALUES (?, ?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(data.student_id)
    .bind(data.course_id)
    .bind(data.purchase_date)
    .bind(data.completed)
    .fetch_one(conn)
    .await?;
    Ok(row)
}

/// Write back every column of an already-merged record
pub async fn update(
    conn: &mut SqliteConnection,
    record: &PurchasedCourse,
) -> RepoResult<PurchasedCourse> {
    let id = record.id;
    sqlx::query_as::<_, PurchasedCourse>(&format!(
        "UPDATE purchased_courses SET student_id = ?1, course_id = ?2, purchase_date = ?3, completed = ?4 \
         WHERE id = ?5 RETURNING {COLUMNS}"
    ))
    .bind(record.student_id)
    .bind(record.course_id)
    .bind(record.purchase_date)
    .bind(record.completed)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Purchased course {id}")))
}

pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM purchased_courses WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

//! Student Repository

use super::{RepoError, RepoResult};
use shared::models::{Student, StudentDto};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, email, first_name, last_name";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Student>> {
    let students =
        sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students ORDER BY id"))
            .fetch_all(conn)
            .await?;
    Ok(students)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Student>> {
    let student =
        sqlx::query_as::<_, Student>(&format!("SELECT {COLUMNS} FROM students WHERE id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(student)
}

pub async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> RepoResult<Option<Student>> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "SELECT {COLUMNS} FROM students WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(student)
}

pub async fn exists_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(found != 0)
}

pub async fn insert(conn: &mut SqliteConnection, data: &StudentDto) -> RepoResult<Student> {
    let student = sqlx::query_as::<_, Student>(&format!(
        "INSERT INTO students (email, first_name, last_name) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .fetch_one(conn)
    .await?;
    Ok(student)
}

pub async fn update(conn: &mut SqliteConnection, id: i64, data: &StudentDto) -> RepoResult<Student> {
    sqlx::query_as::<_, Student>(&format!(
        "UPDATE students SET email = ?1, first_name = ?2, last_name = ?3 WHERE id = ?4 RETURNING {COLUMNS}"
    ))
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Student {id}")))
}

pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

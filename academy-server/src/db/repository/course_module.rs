//! Course Module Repository

use super::{RepoError, RepoResult};
use shared::models::{CourseModule, ModuleDto};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, title, content, course_id";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<CourseModule>> {
    let modules = sqlx::query_as::<_, CourseModule>(
        &format!("SELECT {COLUMNS} FROM modules ORDER BY id"),
    )
    .fetch_all(conn)
    .await?;
    Ok(modules)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<CourseModule>> {
    let module = sqlx::query_as::<_, CourseModule>(
        &format!("SELECT {COLUMNS} FROM modules WHERE id = ?"),
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(module)
}

pub async fn find_by_course_id(
    conn: &mut SqliteConnection,
    course_id: i64,
) -> RepoResult<Vec<CourseModule>> {
    let modules = sqlx::query_as::<_, CourseModule>(
        &format!("SELECT {COLUMNS} FROM modules WHERE course_id = ? ORDER BY id"),
    )
    .bind(course_id)
    .fetch_all(conn)
    .await?;
    Ok(modules)
}

pub async fn exists_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM modules WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(found != 0)
}

pub async fn insert(conn: &mut SqliteConnection, data: &ModuleDto) -> RepoResult<CourseModule> {
    let module = sqlx::query_as::<_, CourseModule>(
        &format!("INSERT INTO modules (title, content, course_id) VALUES (?, ?, ?) \
         RETURNING {COLUMNS}"),
    )
    .bind(&data.title)
    .bind(&data.content)
    .bind(data.course_id)
    .fetch_one(conn)
    .await?;
    Ok(module)
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &ModuleDto,
) -> RepoResult<CourseModule> {
    sqlx::query_as::<_, CourseModule>(
        &format!("UPDATE modules SET title = ?1, content = ?2, course_id = ?3 WHERE id = ?4 \
         RETURNING {COLUMNS}"),
    )
    .bind(&data.title)
    .bind(&data.content)
    .bind(data.course_id)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Module {id}")))
}

pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM modules WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

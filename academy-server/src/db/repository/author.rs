//! Author Repository

use super::{RepoError, RepoResult};
use shared::models::{Author, AuthorDto};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, firstname, lastname, email";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Author>> {
    let authors = sqlx::query_as::<_, Author>(&format!("SELECT {COLUMNS} FROM authors ORDER BY id"))
        .fetch_all(conn)
        .await?;
    Ok(authors)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Author>> {
    let author =
        sqlx::query_as::<_, Author>(&format!("SELECT {COLUMNS} FROM authors WHERE id = ?"))
            .bind(id)
            .fetch_optional(conn)
            .await?;
    Ok(author)
}

pub async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> RepoResult<Option<Author>> {
    let author = sqlx::query_as::<_, Author>(&format!(
        "SELECT {COLUMNS} FROM authors WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(conn)
    .await?;
    Ok(author)
}

pub async fn exists_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(found != 0)
}

pub async fn insert(conn: &mut SqliteConnection, data: &AuthorDto) -> RepoResult<Author> {
    let author = sqlx::query_as::<_, Author>(&format!(
        "INSERT INTO authors (firstname, lastname, email) VALUES (?, ?, ?) RETURNING {COLUMNS}"
    ))
    .bind(&data.firstname)
    .bind(&data.lastname)
    .bind(&data.email)
    .fetch_one(conn)
    .await?;
    Ok(author)
}

pub async fn update(conn: &mut SqliteConnection, id: i64, data: &AuthorDto) -> RepoResult<Author> {
    sqlx::query_as::<_, Author>(&format!(
        "UPDATE authors SET firstname = ?1, lastname = ?2, email = ?3 WHERE id = ?4 RETURNING {COLUMNS}"
    ))
    .bind(&data.firstname)
    .bind(&data.lastname)
    .bind(&data.email)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Author {id}")))
}

/// Hard delete. Courses of the author keep existing with `author_id = NULL`.
pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM authors WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

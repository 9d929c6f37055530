//! Course Repository

use super::{RepoError, RepoResult};
use shared::models::{Course, CourseDto};
use sqlx::SqliteConnection;

const COLUMNS: &str = "id, title, description, price, author_id";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        &format!("SELECT {COLUMNS} FROM courses ORDER BY id"),
    )
    .fetch_all(conn)
    .await?;
    Ok(courses)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Course>> {
    let course = sqlx::query_as::<_, Course>(
        &format!("SELECT {COLUMNS} FROM courses WHERE id = ?"),
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;
    Ok(course)
}

pub async fn find_by_title(conn: &mut SqliteConnection, title: &str) -> RepoResult<Option<Course>> {
    let course = sqlx::query_as::<_, Course>(
        &format!("SELECT {COLUMNS} FROM courses WHERE title = ? LIMIT 1"),
    )
    .bind(title)
    .fetch_optional(conn)
    .await?;
    Ok(course)
}

pub async fn find_by_author_id(
    conn: &mut SqliteConnection,
    author_id: i64,
) -> RepoResult<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>(
        &format!("SELECT {COLUMNS} FROM courses WHERE author_id = ? ORDER BY id"),
    )
    .bind(author_id)
    .fetch_all(conn)
    .await?;
    Ok(courses)
}

pub async fn exists_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let found: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM courses WHERE id = ?)")
        .bind(id)
        .fetch_one(conn)
        .await?;
    Ok(found != 0)
}

pub async fn insert(conn: &mut SqliteConnection, data: &CourseDto) -> RepoResult<Course> {
    let course = sqlx::query_as::<_, Course>(
        &format!("INSERT INTO courses (title, description, price, author_id) VALUES (?, ?, ?, ?) \
         RETURNING {COLUMNS}"),
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.author_id)
    .fetch_one(conn)
    .await?;
    Ok(course)
}

/// Full replace of every mutable column, including `author_id`
pub async fn update(conn: &mut SqliteConnection, id: i64, data: &CourseDto) -> RepoResult<Course> {
    sqlx::query_as::<_, Course>(
        &format!("UPDATE courses SET title = ?1, description = ?2, price = ?3, author_id = ?4 WHERE id = ?5 \
         RETURNING {COLUMNS}"),
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.author_id)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Course {id}")))
}

/// Point the course at `author_id`, or detach it with `None`
pub async fn set_author(
    conn: &mut SqliteConnection,
    id: i64,
    author_id: Option<i64>,
) -> RepoResult<Course> {
    sqlx::query_as::<_, Course>(
        &format!("UPDATE courses SET author_id = ? WHERE id = ? \
         RETURNING {COLUMNS}"),
    )
    .bind(author_id)
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Course {id}")))
}

/// Hard delete; modules of the course go with it (ON DELETE CASCADE)
pub async fn delete_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn algebra(author_id: Option<i64>) -> CourseDto {
        CourseDto {
            id: None,
            title: "Algebra".into(),
            description: Some("Groups, rings, fields".into()),
            price: 10,
            author_id,
        }
    }

    #[tokio::test]
    async fn test_author_assignment_and_lookup() {
        let db = DbService::in_memory().await.unwrap();
        let mut conn = db.pool.acquire().await.unwrap();
        let author_id: i64 = sqlx::query_scalar(
            "INSERT INTO authors (firstname, lastname, email) VALUES ('Ada', 'L', 'ada@x.com') RETURNING id",
        )
        .fetch_one(&mut *conn)
        .await
        .unwrap();

        let course = insert(&mut conn, &algebra(None)).await.unwrap();
        assert!(find_by_author_id(&mut conn, author_id).await.unwrap().is_empty());

        let assigned = set_author(&mut conn, course.id, Some(author_id)).await.unwrap();
        assert_eq!(assigned.author_id, Some(author_id));
        let listed = find_by_author_id(&mut conn, author_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, course.id);

        let detached = set_author(&mut conn, course.id, None).await.unwrap();
        assert_eq!(detached.author_id, None);
    }

    #[tokio::test]
    async fn test_find_by_title_and_update() {
        let db = DbService::in_memory().await.unwrap();
        let mut conn = db.pool.acquire().await.unwrap();
        let course = insert(&mut conn, &algebra(None)).await.unwrap();
        assert!(find_by_title(&mut conn, "Algebra").await.unwrap().is_some());
        assert!(find_by_title(&mut conn, "Topology").await.unwrap().is_none());

        let mut changed = algebra(None);
        changed.title = "Linear Algebra".into();
        changed.description = None;
        changed.price = 25;
        let updated = update(&mut conn, course.id, &changed).await.unwrap();
        assert_eq!(updated.title, "Linear Algebra");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, 25);
    }

    #[tokio::test]
    async fn test_delete_cascades_modules() {
        let db = DbService::in_memory().await.unwrap();
        let mut conn = db.pool.acquire().await.unwrap();
        let course = insert(&mut conn, &algebra(None)).await.unwrap();
        sqlx::query("INSERT INTO modules (title, course_id) VALUES ('Intro', ?), ('Groups', ?)")
            .bind(course.id)
            .bind(course.id)
            .execute(&mut *conn)
            .await
            .unwrap();

        assert!(delete_by_id(&mut conn, course.id).await.unwrap());
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM modules")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }
}

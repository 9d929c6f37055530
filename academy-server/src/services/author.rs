//! Author Service
//!
//! CRUD for authors plus the author↔course relationship operations.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AuthorDto, CourseDto};
use sqlx::SqlitePool;

use super::{begin_write, conflict_on_duplicate, not_found};
use crate::db::repository::{RepoError, author, course};

#[derive(Clone)]
pub struct AuthorService {
    pool: SqlitePool,
}

fn email_taken(email: &str) -> AppError {
    AppError::with_message(
        ErrorCode::AuthorEmailExists,
        format!("Email {email} is already used by another author"),
    )
    .with_detail("email", email)
}

impl AuthorService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: AuthorDto) -> AppResult<AuthorDto> {
        let mut tx = begin_write(&self.pool).await?;

        if author::find_by_email(&mut tx, &dto.email).await?.is_some() {
            tracing::warn!(email = %dto.email, "Author email already in use");
            return Err(email_taken(&dto.email));
        }

        let created = author::insert(&mut tx, &dto).await.map_err(conflict_on_duplicate(
            ErrorCode::AuthorEmailExists,
            format!("Email {} is already used by another author", dto.email),
        ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(author_id = created.id, "Author created");
        Ok(created.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<AuthorDto> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        author::find_by_id(&mut conn, id)
            .await?
            .map(AuthorDto::from)
            .ok_or_else(|| not_found(ErrorCode::AuthorNotFound, "Author", id))
    }

    pub async fn list(&self) -> AppResult<Vec<AuthorDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        let authors = author::find_all(&mut conn).await?;
        Ok(authors.into_iter().map(AuthorDto::from).collect())
    }

    /// Full replace of name and email
    pub async fn update(&self, id: i64, dto: AuthorDto) -> AppResult<AuthorDto> {
        let mut tx = begin_write(&self.pool).await?;

        let existing = author::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::AuthorNotFound, "Author", id))?;

        if existing.email != dto.email
            && let Some(other) = author::find_by_email(&mut tx, &dto.email).await?
            && other.id != id
        {
            tracing::warn!(author_id = id, email = %dto.email, "Author email already in use");
            return Err(email_taken(&dto.email));
        }

        let updated = author::update(&mut tx, id, &dto)
            .await
            .map_err(conflict_on_duplicate(
                ErrorCode::AuthorEmailExists,
                format!("Email {} is already used by another author", dto.email),
            ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(author_id = id, "Author updated");
        Ok(updated.into())
    }

    /// Delete the author; their courses stay, without an author
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = begin_write(&self.pool).await?;
        if !author::exists_by_id(&mut tx, id).await? {
            return Err(not_found(ErrorCode::AuthorNotFound, "Author", id));
        }
        author::delete_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(author_id = id, "Author deleted");
        Ok(())
    }

    /// Make `author_id` the author of `course_id`.
    ///
    /// Assigning a course to the author it already has changes nothing.
    pub async fn assign_course(&self, author_id: i64, course_id: i64) -> AppResult<CourseDto> {
        let mut tx = begin_write(&self.pool).await?;

        if !author::exists_by_id(&mut tx, author_id).await? {
            return Err(not_found(ErrorCode::AuthorNotFound, "Author", author_id));
        }
        let current = course::find_by_id(&mut tx, course_id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course", course_id))?;

        if current.author_id == Some(author_id) {
            tracing::debug!(author_id, course_id, "Course already assigned to author");
            return Ok(current.into());
        }

        let updated = course::set_author(&mut tx, course_id, Some(author_id)).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(author_id, course_id, "Course assigned to author");
        Ok(updated.into())
    }

    /// Detach a course from its author. A course without an author is left as is.
    pub async fn remove_author(&self, course_id: i64) -> AppResult<CourseDto> {
        let mut tx = begin_write(&self.pool).await?;

        let current = course::find_by_id(&mut tx, course_id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course", course_id))?;

        let Some(previous) = current.author_id else {
            tracing::debug!(course_id, "Course has no author to remove");
            return Ok(current.into());
        };

        let updated = course::set_author(&mut tx, course_id, None).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(course_id, author_id = previous, "Author removed from course");
        Ok(updated.into())
    }

    pub async fn list_courses(&self, author_id: i64) -> AppResult<Vec<CourseDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        if !author::exists_by_id(&mut conn, author_id).await? {
            return Err(not_found(ErrorCode::AuthorNotFound, "Author", author_id));
        }
        let courses = course::find_by_author_id(&mut conn, author_id).await?;
        Ok(courses.into_iter().map(CourseDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::CourseService;

    fn ada(email: &str) -> AuthorDto {
        AuthorDto {
            id: None,
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: email.into(),
        }
    }

    fn course(title: &str) -> CourseDto {
        CourseDto {
            id: None,
            title: title.into(),
            description: None,
            price: 10,
            author_id: None,
        }
    }

    async fn file_db(dir: &tempfile::TempDir) -> DbService {
        let url = format!("sqlite:{}", dir.path().join("academy.db").display());
        DbService::new(&url, 4).await.unwrap()
    }

    async fn services() -> (AuthorService, CourseService) {
        let db = DbService::in_memory().await.unwrap();
        (
            AuthorService::new(db.pool.clone()),
            CourseService::new(db.pool.clone()),
        )
    }

    #[tokio::test]
    async fn test_create_echoes_fields() {
        let (authors, _) = services().await;
        let created = authors.create(ada("ada@x.com")).await.unwrap();
        assert!(created.id.is_some());
        assert_eq!(created.firstname, "Ada");
        assert_eq!(created.lastname, "Lovelace");
        assert_eq!(created.email, "ada@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_without_write() {
        let (authors, _) = services().await;
        authors.create(ada("ada@x.com")).await.unwrap();

        let mut second = ada("ada@x.com");
        second.firstname = "Augusta".into();
        let err = authors.create(second).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthorEmailExists);
        assert_eq!(authors.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_own_email() {
        let (authors, _) = services().await;
        let created = authors.create(ada("ada@x.com")).await.unwrap();
        let id = created.id.unwrap();

        let mut changed = ada("ada@x.com");
        changed.lastname = "King".into();
        let updated = authors.update(id, changed).await.unwrap();
        assert_eq!(updated.lastname, "King");
    }

    #[tokio::test]
    async fn test_update_to_taken_email_rejected() {
        let (authors, _) = services().await;
        authors.create(ada("ada@x.com")).await.unwrap();
        let other = authors.create(ada("other@x.com")).await.unwrap();

        let err = authors
            .update(other.id.unwrap(), ada("ada@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthorEmailExists);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let (authors, _) = services().await;
        assert_eq!(authors.get(42).await.unwrap_err().code, ErrorCode::AuthorNotFound);
        assert_eq!(
            authors.update(42, ada("a@x.com")).await.unwrap_err().code,
            ErrorCode::AuthorNotFound
        );
        assert_eq!(authors.delete(42).await.unwrap_err().code, ErrorCode::AuthorNotFound);
        assert_eq!(
            authors.list_courses(42).await.unwrap_err().code,
            ErrorCode::AuthorNotFound
        );
    }

    #[tokio::test]
    async fn test_assign_and_remove_course() {
        let (authors, courses) = services().await;
        let author_id = authors.create(ada("ada@x.com")).await.unwrap().id.unwrap();
        let course_id = courses.create(course("Algebra")).await.unwrap().id.unwrap();

        let assigned = authors.assign_course(author_id, course_id).await.unwrap();
        assert_eq!(assigned.author_id, Some(author_id));

        // Second assignment is a no-op
        authors.assign_course(author_id, course_id).await.unwrap();
        let listed = authors.list_courses(author_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, Some(course_id));

        let removed = authors.remove_author(course_id).await.unwrap();
        assert_eq!(removed.author_id, None);
        assert!(authors.list_courses(author_id).await.unwrap().is_empty());

        // Removing again is a no-op as well
        let again = authors.remove_author(course_id).await.unwrap();
        assert_eq!(again.author_id, None);
    }

    #[tokio::test]
    async fn test_assign_unknown_ids() {
        let (authors, courses) = services().await;
        let author_id = authors.create(ada("ada@x.com")).await.unwrap().id.unwrap();
        let course_id = courses.create(course("Algebra")).await.unwrap().id.unwrap();

        assert_eq!(
            authors.assign_course(999, course_id).await.unwrap_err().code,
            ErrorCode::AuthorNotFound
        );
        assert_eq!(
            authors.assign_course(author_id, 999).await.unwrap_err().code,
            ErrorCode::CourseNotFound
        );
        assert_eq!(
            authors.remove_author(999).await.unwrap_err().code,
            ErrorCode::CourseNotFound
        );
    }

    #[tokio::test]
    async fn test_delete_author_keeps_courses() {
        let (authors, courses) = services().await;
        let author_id = authors.create(ada("ada@x.com")).await.unwrap().id.unwrap();
        let mut dto = course("Algebra");
        dto.author_id = Some(author_id);
        let course_id = courses.create(dto).await.unwrap().id.unwrap();

        authors.delete(author_id).await.unwrap();

        let orphan = courses.get(course_id).await.unwrap();
        assert_eq!(orphan.author_id, None);
    }

    #[tokio::test]
    async fn test_create_waits_for_concurrent_writer_then_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir).await;
        let authors = AuthorService::new(db.pool.clone());

        // Another writer holds the lock while the create starts
        let mut other = db.pool.begin_with("BEGIN IMMEDIATE").await.unwrap();
        let pending = tokio::spawn({
            let authors = authors.clone();
            async move { authors.create(ada("ada@x.com")).await }
        });
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        author::insert(&mut other, &ada("ada@x.com")).await.unwrap();
        other.commit().await.unwrap();

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthorEmailExists);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(authors.list().await.unwrap().len(), 1);
        db.close().await;
    }

    #[tokio::test]
    async fn test_simultaneous_creates_yield_one_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let db = file_db(&dir).await;
        let authors = AuthorService::new(db.pool.clone());

        let (first, second) = tokio::join!(
            authors.create(ada("ada@x.com")),
            authors.create(ada("ada@x.com"))
        );
        let codes: Vec<_> = [first, second]
            .into_iter()
            .filter_map(Result::err)
            .map(|e| e.code)
            .collect();
        assert_eq!(codes, vec![ErrorCode::AuthorEmailExists]);
        db.close().await;
    }
}

//! Course Service

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::CourseDto;
use sqlx::{SqliteConnection, SqlitePool};

use super::{begin_write, conflict_on_duplicate, not_found};
use crate::db::repository::{RepoError, author, course, purchased_course};

#[derive(Clone)]
pub struct CourseService {
    pool: SqlitePool,
}

fn title_taken(title: &str) -> AppError {
    AppError::with_message(
        ErrorCode::CourseTitleExists,
        format!("Course title '{title}' is already in use"),
    )
    .with_detail("title", title)
}

async fn ensure_author(conn: &mut SqliteConnection, author_id: i64) -> AppResult<()> {
    if !author::exists_by_id(conn, author_id).await? {
        tracing::warn!(author_id, "Course references unknown author");
        return Err(not_found(ErrorCode::AuthorNotFound, "Author", author_id));
    }
    Ok(())
}

impl CourseService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: CourseDto) -> AppResult<CourseDto> {
        let mut tx = begin_write(&self.pool).await?;

        if course::find_by_title(&mut tx, &dto.title).await?.is_some() {
            tracing::warn!(title = %dto.title, "Course title already in use");
            return Err(title_taken(&dto.title));
        }
        if let Some(author_id) = dto.author_id {
            ensure_author(&mut tx, author_id).await?;
        }

        let created = course::insert(&mut tx, &dto).await.map_err(conflict_on_duplicate(
            ErrorCode::CourseTitleExists,
            format!("Course title '{}' is already in use", dto.title),
        ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(course_id = created.id, "Course created");
        Ok(created.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<CourseDto> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        course::find_by_id(&mut conn, id)
            .await?
            .map(CourseDto::from)
            .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course", id))
    }

    pub async fn list(&self) -> AppResult<Vec<CourseDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        let courses = course::find_all(&mut conn).await?;
        Ok(courses.into_iter().map(CourseDto::from).collect())
    }

    /// Full replace. A `null` authorId detaches the course from its author.
    pub async fn update(&self, id: i64, dto: CourseDto) -> AppResult<CourseDto> {
        let mut tx = begin_write(&self.pool).await?;

        let existing = course::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::CourseNotFound, "Course", id))?;

        if existing.title != dto.title
            && let Some(other) = course::find_by_title(&mut tx, &dto.title).await?
            && other.id != id
        {
            tracing::warn!(course_id = id, title = %dto.title, "Course title already in use");
            return Err(title_taken(&dto.title));
        }
        if let Some(author_id) = dto.author_id
            && existing.author_id != Some(author_id)
        {
            ensure_author(&mut tx, author_id).await?;
        }

        let updated = course::update(&mut tx, id, &dto)
            .await
            .map_err(conflict_on_duplicate(
                ErrorCode::CourseTitleExists,
                format!("Course title '{}' is already in use", dto.title),
            ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(course_id = id, "Course updated");
        Ok(updated.into())
    }

    /// Delete the course and its modules.
    ///
    /// Refused while purchase records still point at the course.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = begin_write(&self.pool).await?;
        if !course::exists_by_id(&mut tx, id).await? {
            return Err(not_found(ErrorCode::CourseNotFound, "Course", id));
        }
        if purchased_course::exists_by_course_id(&mut tx, id).await? {
            tracing::warn!(course_id = id, "Refusing to delete purchased course");
            return Err(AppError::with_message(
                ErrorCode::CourseHasPurchases,
                format!("Course {id} has purchase records and cannot be deleted"),
            )
            .with_detail("id", id));
        }
        course::delete_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(course_id = id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::{AuthorService, ModuleService};
    use shared::models::{AuthorDto, ModuleDto};

    fn algebra() -> CourseDto {
        CourseDto {
            id: None,
            title: "Algebra".into(),
            description: Some("Intro".into()),
            price: 10,
            author_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_author_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let courses = CourseService::new(db.pool.clone());
        let mut dto = algebra();
        dto.author_id = Some(77);

        let err = courses.create(dto).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthorNotFound);
        assert!(courses.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_title_rejected() {
        let db = DbService::in_memory().await.unwrap();
        let courses = CourseService::new(db.pool.clone());
        courses.create(algebra()).await.unwrap();

        let err = courses.create(algebra()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CourseTitleExists);
    }

    #[tokio::test]
    async fn test_update_rebinds_and_clears_author() {
        let db = DbService::in_memory().await.unwrap();
        let authors = AuthorService::new(db.pool.clone());
        let courses = CourseService::new(db.pool.clone());
        let author_id = authors
            .create(AuthorDto {
                id: None,
                firstname: "Ada".into(),
                lastname: "Lovelace".into(),
                email: "ada@x.com".into(),
            })
            .await
            .unwrap()
            .id
            .unwrap();
        let id = courses.create(algebra()).await.unwrap().id.unwrap();

        let mut dto = algebra();
        dto.author_id = Some(author_id);
        dto.price = 20;
        let updated = courses.update(id, dto).await.unwrap();
        assert_eq!(updated.author_id, Some(author_id));
        assert_eq!(updated.price, 20);

        let mut dto = algebra();
        dto.author_id = Some(999);
        assert_eq!(
            courses.update(id, dto).await.unwrap_err().code,
            ErrorCode::AuthorNotFound
        );

        let cleared = courses.update(id, algebra()).await.unwrap();
        assert_eq!(cleared.author_id, None);
    }

    #[tokio::test]
    async fn test_delete_cascades_modules() {
        let db = DbService::in_memory().await.unwrap();
        let courses = CourseService::new(db.pool.clone());
        let modules = ModuleService::new(db.pool.clone());
        let course_id = courses.create(algebra()).await.unwrap().id.unwrap();
        let module = modules
            .create(ModuleDto {
                id: None,
                title: "Groups".into(),
                content: None,
                course_id,
            })
            .await
            .unwrap();

        courses.delete(course_id).await.unwrap();

        assert_eq!(
            courses.get(course_id).await.unwrap_err().code,
            ErrorCode::CourseNotFound
        );
        assert_eq!(
            modules.get(module.id.unwrap()).await.unwrap_err().code,
            ErrorCode::ModuleNotFound
        );
    }
}

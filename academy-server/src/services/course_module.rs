//! Course Module Service

use shared::error::{AppResult, ErrorCode};
use shared::models::ModuleDto;
use sqlx::SqlitePool;

use super::{begin_write, not_found};
use crate::db::repository::{RepoError, course, course_module};

#[derive(Clone)]
pub struct ModuleService {
    pool: SqlitePool,
}

impl ModuleService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: ModuleDto) -> AppResult<ModuleDto> {
        let mut tx = begin_write(&self.pool).await?;
        if !course::exists_by_id(&mut tx, dto.course_id).await? {
            tracing::warn!(course_id = dto.course_id, "Module references unknown course");
            return Err(not_found(ErrorCode::CourseNotFound, "Course", dto.course_id));
        }
        let created = course_module::insert(&mut tx, &dto).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(module_id = created.id, course_id = created.course_id, "Module created");
        Ok(created.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<ModuleDto> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        course_module::find_by_id(&mut conn, id)
            .await?
            .map(ModuleDto::from)
            .ok_or_else(|| not_found(ErrorCode::ModuleNotFound, "Module", id))
    }

    pub async fn list(&self) -> AppResult<Vec<ModuleDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        let modules = course_module::find_all(&mut conn).await?;
        Ok(modules.into_iter().map(ModuleDto::from).collect())
    }

    pub async fn update(&self, id: i64, dto: ModuleDto) -> AppResult<ModuleDto> {
        let mut tx = begin_write(&self.pool).await?;
        let existing = course_module::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::ModuleNotFound, "Module", id))?;

        // Moving a module re-resolves its course
        if existing.course_id != dto.course_id && !course::exists_by_id(&mut tx, dto.course_id).await? {
            tracing::warn!(module_id = id, course_id = dto.course_id, "Module moved to unknown course");
            return Err(not_found(ErrorCode::CourseNotFound, "Course", dto.course_id));
        }

        let updated = course_module::update(&mut tx, id, &dto).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(module_id = id, "Module updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = begin_write(&self.pool).await?;
        if !course_module::exists_by_id(&mut tx, id).await? {
            return Err(not_found(ErrorCode::ModuleNotFound, "Module", id));
        }
        course_module::delete_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(module_id = id, "Module deleted");
        Ok(())
    }

    pub async fn list_by_course(&self, course_id: i64) -> AppResult<Vec<ModuleDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        if !course::exists_by_id(&mut conn, course_id).await? {
            return Err(not_found(ErrorCode::CourseNotFound, "Course", course_id));
        }
        let modules = course_module::find_by_course_id(&mut conn, course_id).await?;
        Ok(modules.into_iter().map(ModuleDto::from).collect())
    }
}

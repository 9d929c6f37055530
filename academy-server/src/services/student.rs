//! Student Service

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::StudentDto;
use sqlx::SqlitePool;

use super::{begin_write, conflict_on_duplicate, not_found};
use crate::db::repository::{RepoError, purchased_course, student};

#[derive(Clone)]
pub struct StudentService {
    pool: SqlitePool,
}

fn email_taken(email: &str) -> AppError {
    AppError::with_message(
        ErrorCode::StudentEmailExists,
        format!("Email {email} is already registered"),
    )
    .with_detail("email", email)
}

impl StudentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, dto: StudentDto) -> AppResult<StudentDto> {
        let mut tx = begin_write(&self.pool).await?;
        if student::find_by_email(&mut tx, &dto.email).await?.is_some() {
            tracing::warn!(email = %dto.email, "Student email already registered");
            return Err(email_taken(&dto.email));
        }
        let created = student::insert(&mut tx, &dto).await.map_err(conflict_on_duplicate(
            ErrorCode::StudentEmailExists,
            format!("Email {} is already registered", dto.email),
        ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(student_id = created.id, "Student created");
        Ok(created.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<StudentDto> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        student::find_by_id(&mut conn, id)
            .await?
            .map(StudentDto::from)
            .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student", id))
    }

    pub async fn find_by_email(&self, email: &str) -> AppResult<StudentDto> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        student::find_by_email(&mut conn, email)
            .await?
            .map(StudentDto::from)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::StudentNotFound,
                    format!("No student registered with email {email}"),
                )
                .with_detail("email", email)
            })
    }

    pub async fn list(&self) -> AppResult<Vec<StudentDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        let students = student::find_all(&mut conn).await?;
        Ok(students.into_iter().map(StudentDto::from).collect())
    }

    pub async fn update(&self, id: i64, dto: StudentDto) -> AppResult<StudentDto> {
        let mut tx = begin_write(&self.pool).await?;
        let existing = student::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::StudentNotFound, "Student", id))?;

        if existing.email != dto.email
            && let Some(other) = student::find_by_email(&mut tx, &dto.email).await?
            && other.id != id
        {
            tracing::warn!(student_id = id, email = %dto.email, "Student email already registered");
            return Err(email_taken(&dto.email));
        }

        let updated = student::update(&mut tx, id, &dto)
            .await
            .map_err(conflict_on_duplicate(
                ErrorCode::StudentEmailExists,
                format!("Email {} is already registered", dto.email),
            ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(student_id = id, "Student updated");
        Ok(updated.into())
    }

    /// Refused while the student still has purchase records
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = begin_write(&self.pool).await?;
        if !student::exists_by_id(&mut tx, id).await? {
            return Err(not_found(ErrorCode::StudentNotFound, "Student", id));
        }
        if purchased_course::exists_by_student_id(&mut tx, id).await? {
            tracing::warn!(student_id = id, "Refusing to delete student with purchases");
            return Err(AppError::with_message(
                ErrorCode::StudentHasPurchases,
                format!("Student {id} has purchase records and cannot be deleted"),
            )
            .with_detail("id", id));
        }
        student::delete_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }
}

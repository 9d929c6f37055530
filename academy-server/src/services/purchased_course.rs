//! Purchased Course Service
//!
//! A student may hold at most one purchase per course; the pair is checked
//! on create and whenever an update rebinds the record.

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::PurchasedCourseDto;
use shared::util::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

use super::{begin_write, conflict_on_duplicate, not_found};
use crate::db::repository::purchased_course::NewPurchase;
use crate::db::repository::{RepoError, course, purchased_course, student};

#[derive(Clone)]
pub struct PurchasedCourseService {
    pool: SqlitePool,
}

fn duplicate_purchase(student_id: i64, course_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::PurchaseDuplicate,
        format!("Student {student_id} has already purchased course {course_id}"),
    )
    .with_detail("studentId", student_id)
    .with_detail("courseId", course_id)
}

async fn ensure_student(conn: &mut SqliteConnection, student_id: i64) -> AppResult<()> {
    if student::exists_by_id(conn, student_id).await? {
        Ok(())
    } else {
        Err(not_found(ErrorCode::StudentNotFound, "Student", student_id))
    }
}

async fn ensure_course(conn: &mut SqliteConnection, course_id: i64) -> AppResult<()> {
    if course::exists_by_id(conn, course_id).await? {
        Ok(())
    } else {
        Err(not_found(ErrorCode::CourseNotFound, "Course", course_id))
    }
}

impl PurchasedCourseService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a purchase. Date defaults to now, `completed` to false.
    pub async fn create(&self, dto: PurchasedCourseDto) -> AppResult<PurchasedCourseDto> {
        let mut tx = begin_write(&self.pool).await?;

        ensure_student(&mut tx, dto.student_id).await?;
        ensure_course(&mut tx, dto.course_id).await?;

        if purchased_course::find_by_student_and_course(&mut tx, dto.student_id, dto.course_id)
            .await?
            .is_some()
        {
            tracing::warn!(
                student_id = dto.student_id,
                course_id = dto.course_id,
                "Duplicate course purchase"
            );
            return Err(duplicate_purchase(dto.student_id, dto.course_id));
        }

        let new = NewPurchase {
            student_id: dto.student_id,
            course_id: dto.course_id,
            purchase_date: dto
                .purchase_date
                .map(|d| d.timestamp_millis())
                .unwrap_or_else(now_millis),
            completed: dto.completed.unwrap_or(false),
        };
        let created = purchased_course::insert(&mut tx, new)
            .await
            .map_err(conflict_on_duplicate(
                ErrorCode::PurchaseDuplicate,
                format!(
                    "Student {} has already purchased course {}",
                    dto.student_id, dto.course_id
                ),
            ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            purchase_id = created.id,
            student_id = created.student_id,
            course_id = created.course_id,
            "Course purchased"
        );
        Ok(created.into())
    }

    pub async fn get(&self, id: i64) -> AppResult<PurchasedCourseDto> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        purchased_course::find_by_id(&mut conn, id)
            .await?
            .map(PurchasedCourseDto::from)
            .ok_or_else(|| not_found(ErrorCode::PurchaseNotFound, "Purchased course", id))
    }

    pub async fn list(&self) -> AppResult<Vec<PurchasedCourseDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        let rows = purchased_course::find_all(&mut conn).await?;
        Ok(rows.into_iter().map(PurchasedCourseDto::from).collect())
    }

    /// Rebinds student/course when they change; date and completion are
    /// only overwritten when supplied.
    pub async fn update(&self, id: i64, dto: PurchasedCourseDto) -> AppResult<PurchasedCourseDto> {
        let mut tx = begin_write(&self.pool).await?;

        let mut record = purchased_course::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(ErrorCode::PurchaseNotFound, "Purchased course", id))?;

        let student_changed = record.student_id != dto.student_id;
        let course_changed = record.course_id != dto.course_id;
        if student_changed {
            ensure_student(&mut tx, dto.student_id).await?;
        }
        if course_changed {
            ensure_course(&mut tx, dto.course_id).await?;
        }
        if (student_changed || course_changed)
            && let Some(other) =
                purchased_course::find_by_student_and_course(&mut tx, dto.student_id, dto.course_id)
                    .await?
            && other.id != id
        {
            tracing::warn!(
                purchase_id = id,
                student_id = dto.student_id,
                course_id = dto.course_id,
                "Purchase rebind would duplicate an existing purchase"
            );
            return Err(duplicate_purchase(dto.student_id, dto.course_id));
        }

        record.student_id = dto.student_id;
        record.course_id = dto.course_id;
        if let Some(date) = dto.purchase_date {
            record.purchase_date = date.timestamp_millis();
        }
        if let Some(completed) = dto.completed {
            record.completed = completed;
        }

        let updated = purchased_course::update(&mut tx, &record)
            .await
            .map_err(conflict_on_duplicate(
                ErrorCode::PurchaseDuplicate,
                format!(
                    "Student {} has already purchased course {}",
                    dto.student_id, dto.course_id
                ),
            ))?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(purchase_id = id, completed = updated.completed, "Purchase updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tx = begin_write(&self.pool).await?;
        if !purchased_course::exists_by_id(&mut tx, id).await? {
            return Err(not_found(ErrorCode::PurchaseNotFound, "Purchased course", id));
        }
        purchased_course::delete_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(purchase_id = id, "Purchase deleted");
        Ok(())
    }

    pub async fn list_by_student(&self, student_id: i64) -> AppResult<Vec<PurchasedCourseDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        ensure_student(&mut conn, student_id).await?;
        let rows = purchased_course::find_by_student_id(&mut conn, student_id).await?;
        Ok(rows.into_iter().map(PurchasedCourseDto::from).collect())
    }

    pub async fn list_by_course(&self, course_id: i64) -> AppResult<Vec<PurchasedCourseDto>> {
        let mut conn = self.pool.acquire().await.map_err(RepoError::from)?;
        ensure_course(&mut conn, course_id).await?;
        let rows = purchased_course::find_by_course_id(&mut conn, course_id).await?;
        Ok(rows.into_iter().map(PurchasedCourseDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::services::{CourseService, StudentService};
    use chrono::{TimeZone, Utc};
    use shared::models::{CourseDto, StudentDto};

    struct Fixture {
        students: StudentService,
        courses: CourseService,
        purchases: PurchasedCourseService,
    }

    impl Fixture {
        async fn new() -> Self {
            let db = DbService::in_memory().await.unwrap();
            Self {
                students: StudentService::new(db.pool.clone()),
                courses: CourseService::new(db.pool.clone()),
                purchases: PurchasedCourseService::new(db.pool.clone()),
            }
        }

        async fn student(&self, email: &str) -> i64 {
            self.students
                .create(StudentDto {
                    id: None,
                    email: email.into(),
                    first_name: "S".into(),
                    last_name: "T".into(),
                })
                .await
                .unwrap()
                .id
                .unwrap()
        }

        async fn course(&self, title: &str) -> i64 {
            self.courses
                .create(CourseDto {
                    id: None,
                    title: title.into(),
                    description: None,
                    price: 10,
                    author_id: None,
                })
                .await
                .unwrap()
                .id
                .unwrap()
        }
    }

    fn purchase(student_id: i64, course_id: i64) -> PurchasedCourseDto {
        PurchasedCourseDto {
            id: None,
            student_id,
            course_id,
            purchase_date: None,
            completed: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let f = Fixture::new().await;
        let s = f.student("s@x.com").await;
        let c = f.course("Algebra").await;

        let before = now_millis();
        let created = f.purchases.create(purchase(s, c)).await.unwrap();
        assert_eq!(created.completed, Some(false));
        let stamped = created.purchase_date.unwrap().timestamp_millis();
        assert!(stamped >= before);
    }

    #[tokio::test]
    async fn test_second_purchase_of_same_pair_rejected() {
        let f = Fixture::new().await;
        let s = f.student("s@x.com").await;
        let c = f.course("Algebra").await;
        f.purchases.create(purchase(s, c)).await.unwrap();

        let err = f.purchases.create(purchase(s, c)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PurchaseDuplicate);
        assert_eq!(f.purchases.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_references() {
        let f = Fixture::new().await;
        let s = f.student("s@x.com").await;
        let c = f.course("Algebra").await;

        assert_eq!(
            f.purchases.create(purchase(999, c)).await.unwrap_err().code,
            ErrorCode::StudentNotFound
        );
        assert_eq!(
            f.purchases.create(purchase(s, 999)).await.unwrap_err().code,
            ErrorCode::CourseNotFound
        );
        assert_eq!(
            f.purchases.list_by_student(999).await.unwrap_err().code,
            ErrorCode::StudentNotFound
        );
        assert_eq!(
            f.purchases.list_by_course(999).await.unwrap_err().code,
            ErrorCode::CourseNotFound
        );
    }

    #[tokio::test]
    async fn test_update_is_partial_for_date_and_completed() {
        let f = Fixture::new().await;
        let s = f.student("s@x.com").await;
        let c = f.course("Algebra").await;
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut dto = purchase(s, c);
        dto.purchase_date = Some(date);
        let id = f.purchases.create(dto).await.unwrap().id.unwrap();

        let mut change = purchase(s, c);
        change.completed = Some(true);
        let updated = f.purchases.update(id, change).await.unwrap();
        assert_eq!(updated.completed, Some(true));
        assert_eq!(updated.purchase_date, Some(date));

        // Omitting completed keeps it
        let updated = f.purchases.update(id, purchase(s, c)).await.unwrap();
        assert_eq!(updated.completed, Some(true));
    }

    #[tokio::test]
    async fn test_rebind_onto_existing_pair_rejected() {
        let f = Fixture::new().await;
        let s = f.student("s@x.com").await;
        let algebra = f.course("Algebra").await;
        let topology = f.course("Topology").await;
        f.purchases.create(purchase(s, algebra)).await.unwrap();
        let second = f.purchases.create(purchase(s, topology)).await.unwrap().id.unwrap();

        let err = f.purchases.update(second, purchase(s, algebra)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PurchaseDuplicate);

        let other = f.student("o@x.com").await;
        let moved = f.purchases.update(second, purchase(other, topology)).await.unwrap();
        assert_eq!(moved.student_id, other);
        assert_eq!(f.purchases.list_by_student(s).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_purchases_block_parent_deletes() {
        let f = Fixture::new().await;
        let s = f.student("s@x.com").await;
        let c = f.course("Algebra").await;
        let id = f.purchases.create(purchase(s, c)).await.unwrap().id.unwrap();

        assert_eq!(
            f.courses.delete(c).await.unwrap_err().code,
            ErrorCode::CourseHasPurchases
        );
        assert_eq!(
            f.students.delete(s).await.unwrap_err().code,
            ErrorCode::StudentHasPurchases
        );

        f.purchases.delete(id).await.unwrap();
        f.courses.delete(c).await.unwrap();
        f.students.delete(s).await.unwrap();
    }
}

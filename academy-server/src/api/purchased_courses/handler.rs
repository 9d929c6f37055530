//! Purchased Course API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::{ApiPath, ValidatedJson};
use crate::core::ServerState;
use shared::error::AppResult;
use shared::models::PurchasedCourseDto;

/// GET /api/purchased-courses - 获取所有购买记录
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<PurchasedCourseDto>>> {
    Ok(Json(state.purchases.list().await?))
}

/// GET /api/purchased-courses/:id - 获取单条购买记录
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<PurchasedCourseDto>> {
    Ok(Json(state.purchases.get(id).await?))
}

/// POST /api/purchased-courses - 购买课程
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<PurchasedCourseDto>,
) -> AppResult<(StatusCode, Json<PurchasedCourseDto>)> {
    let purchase = state.purchases.create(payload).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// PUT /api/purchased-courses/:id - 更新购买记录
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<PurchasedCourseDto>,
) -> AppResult<Json<PurchasedCourseDto>> {
    Ok(Json(state.purchases.update(id, payload).await?))
}

/// DELETE /api/purchased-courses/:id - 删除购买记录
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.purchases.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/purchased-courses/student/:student_id - 学生的购买记录
pub async fn list_by_student(
    State(state): State<ServerState>,
    ApiPath(student_id): ApiPath<i64>,
) -> AppResult<Json<Vec<PurchasedCourseDto>>> {
    Ok(Json(state.purchases.list_by_student(student_id).await?))
}

/// GET /api/purchased-courses/course/:course_id - 课程的购买记录
pub async fn list_by_course(
    State(state): State<ServerState>,
    ApiPath(course_id): ApiPath<i64>,
) -> AppResult<Json<Vec<PurchasedCourseDto>>> {
    Ok(Json(state.purchases.list_by_course(course_id).await?))
}

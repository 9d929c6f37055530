//! Course API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::{ApiPath, ValidatedJson};
use crate::core::ServerState;
use shared::error::AppResult;
use shared::models::CourseDto;

/// GET /api/courses - 获取所有课程
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CourseDto>>> {
    Ok(Json(state.courses.list().await?))
}

/// GET /api/courses/:id - 获取单个课程
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<CourseDto>> {
    Ok(Json(state.courses.get(id).await?))
}

/// POST /api/courses - 创建课程
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<CourseDto>,
) -> AppResult<(StatusCode, Json<CourseDto>)> {
    let course = state.courses.create(payload).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/courses/:id - 更新课程 (authorId 为空时解除作者)
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<CourseDto>,
) -> AppResult<Json<CourseDto>> {
    Ok(Json(state.courses.update(id, payload).await?))
}

/// DELETE /api/courses/:id - 删除课程及其模块
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.courses.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Student API Handlers

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::api::{ApiPath, ValidatedJson};
use crate::core::ServerState;
use shared::error::{AppError, AppResult};
use shared::models::StudentDto;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// GET /api/students - 获取所有学生
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StudentDto>>> {
    Ok(Json(state.students.list().await?))
}

/// GET /api/students/:id - 获取单个学生
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<StudentDto>> {
    Ok(Json(state.students.get(id).await?))
}

/// GET /api/students/by-email?email= - 按邮箱查找学生
pub async fn get_by_email(
    State(state): State<ServerState>,
    Query(query): Query<EmailQuery>,
) -> AppResult<Json<StudentDto>> {
    let email = query
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| AppError::validation("Query parameter 'email' is required"))?;
    Ok(Json(state.students.find_by_email(&email).await?))
}

/// POST /api/students - 创建学生
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<StudentDto>,
) -> AppResult<(StatusCode, Json<StudentDto>)> {
    let student = state.students.create(payload).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

/// PUT /api/students/:id - 更新学生
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<StudentDto>,
) -> AppResult<Json<StudentDto>> {
    Ok(Json(state.students.update(id, payload).await?))
}

/// DELETE /api/students/:id - 删除学生
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.students.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

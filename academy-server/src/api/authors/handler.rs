//! Author API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::{ApiPath, ValidatedJson};
use crate::core::ServerState;
use shared::error::AppResult;
use shared::models::{AuthorDto, CourseDto};

/// GET /api/authors - 获取所有作者
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AuthorDto>>> {
    let authors = state.authors.list().await?;
    Ok(Json(authors))
}

/// GET /api/authors/:id - 获取单个作者
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<AuthorDto>> {
    let author = state.authors.get(id).await?;
    Ok(Json(author))
}

/// POST /api/authors - 创建作者
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<AuthorDto>,
) -> AppResult<(StatusCode, Json<AuthorDto>)> {
    let author = state.authors.create(payload).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// PUT /api/authors/:id - 更新作者
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<AuthorDto>,
) -> AppResult<Json<AuthorDto>> {
    let author = state.authors.update(id, payload).await?;
    Ok(Json(author))
}

/// DELETE /api/authors/:id - 删除作者
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.authors.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/authors/:author_id/courses/:course_id - 为课程指定作者
pub async fn assign_course(
    State(state): State<ServerState>,
    ApiPath((author_id, course_id)): ApiPath<(i64, i64)>,
) -> AppResult<Json<CourseDto>> {
    let course = state.authors.assign_course(author_id, course_id).await?;
    Ok(Json(course))
}

/// DELETE /api/authors/courses/:course_id/remove-author - 解除课程作者
pub async fn remove_author(
    State(state): State<ServerState>,
    ApiPath(course_id): ApiPath<i64>,
) -> AppResult<Json<CourseDto>> {
    let course = state.authors.remove_author(course_id).await?;
    Ok(Json(course))
}

/// GET /api/authors/:author_id/courses - 作者的所有课程
pub async fn list_courses(
    State(state): State<ServerState>,
    ApiPath(author_id): ApiPath<i64>,
) -> AppResult<Json<Vec<CourseDto>>> {
    let courses = state.authors.list_courses(author_id).await?;
    Ok(Json(courses))
}

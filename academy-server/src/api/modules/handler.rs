//! Module API Handlers

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::api::{ApiPath, ValidatedJson};
use crate::core::ServerState;
use shared::error::AppResult;
use shared::models::ModuleDto;

/// GET /api/modules - 获取所有模块
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ModuleDto>>> {
    Ok(Json(state.modules.list().await?))
}

/// GET /api/modules/:id - 获取单个模块
pub async fn get_by_id(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<ModuleDto>> {
    Ok(Json(state.modules.get(id).await?))
}

/// POST /api/modules - 创建模块
pub async fn create(
    State(state): State<ServerState>,
    ValidatedJson(payload): ValidatedJson<ModuleDto>,
) -> AppResult<(StatusCode, Json<ModuleDto>)> {
    let module = state.modules.create(payload).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// PUT /api/modules/:id - 更新模块
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(payload): ValidatedJson<ModuleDto>,
) -> AppResult<Json<ModuleDto>> {
    Ok(Json(state.modules.update(id, payload).await?))
}

/// DELETE /api/modules/:id - 删除模块
pub async fn delete(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<StatusCode> {
    state.modules.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/modules/course/:course_id - 课程下的所有模块
pub async fn list_by_course(
    State(state): State<ServerState>,
    ApiPath(course_id): ApiPath<i64>,
) -> AppResult<Json<Vec<ModuleDto>>> {
    Ok(Json(state.modules.list_by_course(course_id).await?))
}

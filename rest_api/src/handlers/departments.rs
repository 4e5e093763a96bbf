// rest_api/src/handlers/departments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{DepartmentDto, DepartmentPayload};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::services::DepartmentService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list_departments).post(create_department))
        .route(
            "/departments/:id",
            get(get_department).put(update_department).delete(delete_department),
        )
}

async fn list_departments(State(state): State<AppState>) -> Result<Json<Vec<DepartmentDto>>, ApiError> {
    Ok(Json(DepartmentService::new(state.store.clone()).list().await?))
}

async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DepartmentDto>, ApiError> {
    Ok(Json(DepartmentService::new(state.store.clone()).get(id).await?))
}

async fn create_department(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<DepartmentPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "departments.write")?;
    let dto = DepartmentService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("departments", dto.id, dto))
}

async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<DepartmentPayload>,
) -> Result<Json<DepartmentDto>, ApiError> {
    auth.require(&state.roles, "departments.write")?;
    Ok(Json(
        DepartmentService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "departments.write")?;
    DepartmentService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

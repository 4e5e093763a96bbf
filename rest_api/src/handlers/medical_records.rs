// rest_api/src/handlers/medical_records.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{MedicalRecordDto, MedicalRecordPayload};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::services::MedicalRecordService;
use crate::state::AppState;

// Record reads are gated too: clinical details are not public the way the
// other resource listings are.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/medical-records", get(list_records).post(create_record))
        .route(
            "/medical-records/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

async fn list_records(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<MedicalRecordDto>>, ApiError> {
    auth.require(&state.roles, "records.read")?;
    Ok(Json(
        MedicalRecordService::new(state.store.clone()).list().await?,
    ))
}

async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<Json<MedicalRecordDto>, ApiError> {
    auth.require(&state.roles, "records.read")?;
    Ok(Json(
        MedicalRecordService::new(state.store.clone()).get(id).await?,
    ))
}

async fn create_record(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<MedicalRecordPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "records.write")?;
    let dto = MedicalRecordService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("medical-records", dto.id, dto))
}

async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<MedicalRecordPayload>,
) -> Result<Json<MedicalRecordDto>, ApiError> {
    auth.require(&state.roles, "records.write")?;
    Ok(Json(
        MedicalRecordService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "records.write")?;
    MedicalRecordService::new(state.store.clone())
        .delete(id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

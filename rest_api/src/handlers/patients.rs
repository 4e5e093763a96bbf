// rest_api/src/handlers/patients.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{PatientDto, PatientPayload};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::services::PatientService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
}

async fn list_patients(State(state): State<AppState>) -> Result<Json<Vec<PatientDto>>, ApiError> {
    Ok(Json(PatientService::new(state.store.clone()).list().await?))
}

async fn get_patient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PatientDto>, ApiError> {
    Ok(Json(PatientService::new(state.store.clone()).get(id).await?))
}

async fn create_patient(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<PatientPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "patients.write")?;
    let dto = PatientService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("patients", dto.id, dto))
}

async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<PatientPayload>,
) -> Result<Json<PatientDto>, ApiError> {
    auth.require(&state.roles, "patients.write")?;
    Ok(Json(
        PatientService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "patients.write")?;
    PatientService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// rest_api/src/handlers/prescriptions.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{PrescriptionDto, PrescriptionPayload};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::services::PrescriptionService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prescriptions", get(list_prescriptions).post(create_prescription))
        .route(
            "/prescriptions/:id",
            get(get_prescription).put(update_prescription).delete(delete_prescription),
        )
}

async fn list_prescriptions(State(state): State<AppState>) -> Result<Json<Vec<PrescriptionDto>>, ApiError> {
    Ok(Json(PrescriptionService::new(state.store.clone()).list().await?))
}

async fn get_prescription(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PrescriptionDto>, ApiError> {
    Ok(Json(PrescriptionService::new(state.store.clone()).get(id).await?))
}

async fn create_prescription(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<PrescriptionPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "prescriptions.write")?;
    let dto = PrescriptionService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("prescriptions", dto.id, dto))
}

async fn update_prescription(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<PrescriptionPayload>,
) -> Result<Json<PrescriptionDto>, ApiError> {
    auth.require(&state.roles, "prescriptions.write")?;
    Ok(Json(
        PrescriptionService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_prescription(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "prescriptions.write")?;
    PrescriptionService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

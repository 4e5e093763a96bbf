// rest_api/src/handlers/appointments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{AppointmentDto, AppointmentPayload};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::services::AppointmentService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/appointments/:id",
            get(get_appointment).put(update_appointment).delete(delete_appointment),
        )
}

async fn list_appointments(State(state): State<AppState>) -> Result<Json<Vec<AppointmentDto>>, ApiError> {
    Ok(Json(AppointmentService::new(state.store.clone()).list().await?))
}

async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AppointmentDto>, ApiError> {
    Ok(Json(AppointmentService::new(state.store.clone()).get(id).await?))
}

async fn create_appointment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<AppointmentPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "appointments.write")?;
    let dto = AppointmentService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("appointments", dto.id, dto))
}

async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<AppointmentPayload>,
) -> Result<Json<AppointmentDto>, ApiError> {
    auth.require(&state.roles, "appointments.write")?;
    Ok(Json(
        AppointmentService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "appointments.write")?;
    AppointmentService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

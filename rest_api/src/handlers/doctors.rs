// rest_api/src/handlers/doctors.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{DoctorDto, DoctorPayload, RoomDto};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson, RoomIdsRequest};
use crate::services::DoctorService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/doctors", get(list_doctors).post(create_doctor))
        .route(
            "/doctors/:id",
            get(get_doctor).put(update_doctor).delete(delete_doctor),
        )
        .route(
            "/doctors/:id/rooms",
            get(doctor_rooms).post(assign_rooms).delete(remove_rooms),
        )
}

async fn list_doctors(State(state): State<AppState>) -> Result<Json<Vec<DoctorDto>>, ApiError> {
    Ok(Json(DoctorService::new(state.store.clone()).list().await?))
}

async fn get_doctor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DoctorDto>, ApiError> {
    Ok(Json(DoctorService::new(state.store.clone()).get(id).await?))
}

async fn create_doctor(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<DoctorPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "staff.write")?;
    let dto = DoctorService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("doctors", dto.id, dto))
}

async fn update_doctor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<DoctorPayload>,
) -> Result<Json<DoctorDto>, ApiError> {
    auth.require(&state.roles, "staff.write")?;
    Ok(Json(
        DoctorService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_doctor(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "staff.write")?;
    DoctorService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn doctor_rooms(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    Ok(Json(
        DoctorService::new(state.store.clone()).rooms(id).await?,
    ))
}

async fn assign_rooms(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<RoomIdsRequest>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    auth.require(&state.roles, "rooms.write")?;
    Ok(Json(
        DoctorService::new(state.store.clone())
            .assign_rooms(id, &payload.room_ids)
            .await?,
    ))
}

async fn remove_rooms(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<RoomIdsRequest>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    auth.require(&state.roles, "rooms.write")?;
    Ok(Json(
        DoctorService::new(state.store.clone())
            .remove_rooms(id, &payload.room_ids)
            .await?,
    ))
}

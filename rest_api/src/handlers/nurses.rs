// rest_api/src/handlers/nurses.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{NurseDto, NursePayload, RoomDto};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson, RoomIdsRequest};
use crate::services::NurseService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nurses", get(list_nurses).post(create_nurse))
        .route(
            "/nurses/:id",
            get(get_nurse).put(update_nurse).delete(delete_nurse),
        )
        .route(
            "/nurses/:id/rooms",
            get(nurse_rooms).post(assign_rooms).delete(remove_rooms),
        )
}

async fn list_nurses(State(state): State<AppState>) -> Result<Json<Vec<NurseDto>>, ApiError> {
    Ok(Json(NurseService::new(state.store.clone()).list().await?))
}

async fn get_nurse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NurseDto>, ApiError> {
    Ok(Json(NurseService::new(state.store.clone()).get(id).await?))
}

async fn create_nurse(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<NursePayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "staff.write")?;
    let dto = NurseService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("nurses", dto.id, dto))
}

async fn update_nurse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<NursePayload>,
) -> Result<Json<NurseDto>, ApiError> {
    auth.require(&state.roles, "staff.write")?;
    Ok(Json(
        NurseService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_nurse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "staff.write")?;
    NurseService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn nurse_rooms(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<RoomDto>>, ApiError> {
    Ok(Json(
        NurseService::new(state.store.clone()).rooms(id).await?,
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
        NurseService::new(state.store.clone())
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
        NurseService::new(state.store.clone())
            .remove_rooms(id, &payload.room_ids)
            .await?,
    ))
}

// rest_api/src/handlers/rooms.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Json, Router,
};
use models::medical::{RoomDto, RoomPayload};

use crate::auth::AuthUser;
use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::services::RoomService;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route(
            "/rooms/:id",
            get(get_room).put(update_room).delete(delete_room),
        )
}

async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomDto>>, ApiError> {
    Ok(Json(RoomService::new(state.store.clone()).list().await?))
}

async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RoomDto>, ApiError> {
    Ok(Json(RoomService::new(state.store.clone()).get(id).await?))
}

async fn create_room(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<RoomPayload>,
) -> Result<Response, ApiError> {
    auth.require(&state.roles, "rooms.write")?;
    let dto = RoomService::new(state.store.clone())
        .create(payload)
        .await?;
    Ok(created("rooms", dto.id, dto))
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<RoomPayload>,
) -> Result<Json<RoomDto>, ApiError> {
    auth.require(&state.roles, "rooms.write")?;
    Ok(Json(
        RoomService::new(state.store.clone())
            .update(id, payload)
            .await?,
    ))
}

async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    auth.require(&state.roles, "rooms.write")?;
    RoomService::new(state.store.clone()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

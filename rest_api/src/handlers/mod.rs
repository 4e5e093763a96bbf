// rest_api/src/handlers/mod.rs

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

pub mod appointments;
pub mod departments;
pub mod doctors;
pub mod medical_records;
pub mod nurses;
pub mod patients;
pub mod prescriptions;
pub mod rooms;

/// 201 with a Location header; every create endpoint answers this shape.
pub(crate) fn created<T: Serialize>(resource: &str, id: i32, dto: T) -> Response {
    let location = format!("/api/v1/{}/{}", resource, id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto),
    )
        .into_response()
}

/// JSON extractor whose rejection is a 400 validation error instead of the
/// default 422, so model-binding failures land in the same taxonomy as the
/// service-level checks.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// Body for the staff room-assignment endpoints.
#[derive(Debug, Deserialize, Serialize)]
pub struct RoomIdsRequest {
    pub room_ids: Vec<i32>,
}

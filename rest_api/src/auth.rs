// rest_api/src/auth.rs

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, State},
    http::{header::AUTHORIZATION, request::Parts},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use models::medical::{User, UserDto};
use security::{create_jwt, decode_jwt, hash_password, verify_password, Claims, RolesConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ApiError;
use crate::handlers::{created, ApiJson};
use crate::state::AppState;

/// Authenticated caller, extracted from the `Authorization: Bearer` header.
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn require(&self, roles: &RolesConfig, permission: &str) -> Result<(), ApiError> {
        if roles.has_permission(self.0.role_id, permission) {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|hv| hv.to_str().ok())
            .and_then(|auth| auth.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?;

        let claims = decode_jwt(token, &state.jwt_secret).map_err(|_| ApiError::Unauthorized)?;
        Ok(AuthUser(claims))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: u32,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i32,
    pub role_id: u32,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users/:id", get(get_user))
}

/// Account lookup behind the registration Location header. Requires a valid
/// token but no particular permission.
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    _auth: AuthUser,
) -> Result<Json<UserDto>, ApiError> {
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or(ApiError::NotFound("user", id))?;
    Ok(Json(UserDto::from(&user)))
}

async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Response, ApiError> {
    if payload.username.trim().is_empty() {
        return Err(ApiError::Validation("username must not be empty".into()));
    }
    if state
        .store
        .get_user_by_username(&payload.username)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(format!(
            "username '{}' is already taken",
            payload.username
        )));
    }

    let now = Utc::now();
    let user = User {
        id: 0,
        username: payload.username,
        email: payload.email,
        password_hash: hash_password(&payload.password)?,
        role_id: payload.role_id,
        created_at: now,
        updated_at: now,
    };
    let id = state.store.insert_user(user).await?;
    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or(ApiError::NotFound("user", id))?;
    info!(username = %user.username, "registered user");
    Ok(created("users", id, UserDto::from(&user)))
}

async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .store
        .get_user_by_username(&payload.username)
        .await?
        .ok_or(ApiError::Auth(security::AuthError::InvalidCredentials))?;
    verify_password(&payload.password, &user.password_hash)?;

    let token = create_jwt(
        &user.username,
        user.id,
        user.role_id,
        &state.jwt_secret,
        state.jwt_ttl_secs,
    )?;
    info!(username = %user.username, "authenticated user");
    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        role_id: user.role_id,
    }))
}

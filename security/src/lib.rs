// security/src/lib.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

pub mod roles;

pub use roles::RolesConfig;

/// Claims for JWT.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub uid: i32,    // User id
    pub exp: u64,    // Expiration time
    pub iat: u64,    // Issued at
    pub role_id: u32,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Token creation failed: {0}")]
    TokenCreation(String),
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Issues a token valid for `ttl_secs` seconds.
pub fn create_jwt(
    username: &str,
    user_id: i32,
    role_id: u32,
    secret: &[u8],
    ttl_secs: u64,
) -> Result<String, AuthError> {
    let now = unix_now();
    let claims = Claims {
        sub: username.to_string(),
        uid: user_id,
        exp: now + ttl_secs,
        iat: now,
        role_id,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::TokenCreation(e.to_string()))
}

pub fn decode_jwt(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_verifies() {
        let hash = hash_password("supersecret").unwrap();
        assert!(verify_password("supersecret", &hash).is_ok());
        assert!(verify_password("wrong", &hash).is_err());
    }

    #[test]
    fn jwt_round_trip() {
        let secret = b"test_secret";
        let token = create_jwt("alicesmith", 7, 2, secret, 3600).unwrap();
        let claims = decode_jwt(&token, secret).unwrap();
        assert_eq!(claims.sub, "alicesmith");
        assert_eq!(claims.uid, 7);
        assert_eq!(claims.role_id, 2);
    }

    #[test]
    fn jwt_rejects_wrong_secret() {
        let token = create_jwt("alicesmith", 7, 2, b"one_secret", 3600).unwrap();
        assert!(decode_jwt(&token, b"other_secret").is_err());
    }
}

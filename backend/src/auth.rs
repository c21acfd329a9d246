use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::JWT_SECRET;
use crate::models::User;

pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Signing secret is not configured")]
    MissingSecret,
    #[error("Token signing failed: {0}")]
    Sign(String),
    #[error("Password hashing failed: {0}")]
    Hash(String),
}

/// Session token payload: enough to render the signed-in header without a
/// profile fetch. Verification still reloads the user row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

fn sign_claims(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Sign(e.to_string()))
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|_| AuthError::InvalidToken)
}

pub fn issue_token(user: &User) -> Result<String, AuthError> {
    let secret = JWT_SECRET.as_str();
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }

    let now = Utc::now();
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        profile_picture: user.profile_picture.clone(),
        iat: now.timestamp(),
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
    };
    sign_claims(&claims, secret)
}

pub fn verify_token(token: &str) -> Result<Claims, AuthError> {
    let secret = JWT_SECRET.as_str();
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    decode_claims(token, secret)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

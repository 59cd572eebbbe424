//! Bearer-token authentication for API handlers.
//!
//! Access tokens are HS256 JWTs issued by the platform's auth service. The
//! subject carries the numeric user id.

use std::future::{Ready, ready};

use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::domain::types::{UserId, UserRole};
use crate::models::config::ServerConfig;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing authorization header")]
    MissingToken,
    #[error("Invalid authorization header")]
    MalformedHeader,
    #[error("Invalid or expired token")]
    InvalidToken,
    #[error("Authentication is not configured")]
    NotConfigured,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Identity extracted from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: String,
    pub roles: Vec<String>,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.iter().any(|r| r == role.as_str())
    }

    /// Key used to bucket per-identity limits.
    pub fn identity(&self) -> String {
        self.id.to_string()
    }
}

/// Verifies `token` against `secret` and returns the authenticated user.
pub fn verify_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        log::warn!("Rejected access token: {e}");
        AuthError::InvalidToken
    })?;

    let id = data
        .claims
        .sub
        .parse::<i32>()
        .ok()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(AuthError::InvalidToken)?;

    Ok(AuthenticatedUser {
        id,
        email: data.claims.email,
        roles: data.claims.roles,
    })
}

/// Issues an access token for `user`, valid for `ttl_secs` seconds.
pub fn issue_token(user: &AuthenticatedUser, secret: &str, ttl_secs: u64) -> Result<String, AuthError> {
    let exp = (Utc::now().timestamp().max(0) as u64).saturating_add(ttl_secs);
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        roles: user.roles.clone(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| {
        log::error!("Failed to sign access token: {e}");
        AuthError::InvalidToken
    })
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MalformedHeader)?;
    Ok(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .app_data::<web::Data<ServerConfig>>()
            .ok_or(AuthError::NotConfigured)
            .and_then(|config| {
                let token = bearer_token(req)?;
                verify_token(token, &config.jwt_secret)
            });
        ready(result)
    }
}

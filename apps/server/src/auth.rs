//! JWT authentication module.
//!
//! Handles session token generation and validation, password hashing, and
//! the [`AuthUser`] extractor that guards every data route.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/auth/sign-in {email, password}                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  auth_users lookup (NOCASE) ──► argon2 verify ──► confirmed?           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session { access_token (1h), refresh_token (7d), user }               │
//! │                                                                         │
//! │  GET /api/items                                                        │
//! │  Authorization: Bearer <access_token> ──► AuthUser { id, email }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use inventory_core::SessionUser;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

const ACCESS: &str = "access";
const REFRESH: &str = "refresh";

/// Authentication failures.
///
/// Messages are shown to the user verbatim.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Expected {0} token")]
    WrongTokenType(&'static str),

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to generate token: {0}")]
    TokenGeneration(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity id)
    pub sub: String,

    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Token type ("access" or "refresh")
    pub token_type: String,
}

/// Tokens handed to the browser after sign-in or refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Seconds until the access token expires
    pub expires_in: i64,
    /// Unix timestamp of access token expiry
    pub expires_at: i64,
    pub user: SessionUser,
}

/// JWT token manager.
pub struct JwtManager {
    secret: String,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl JwtManager {
    pub fn new(secret: String, access_lifetime_secs: i64, refresh_lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            access_lifetime_secs,
            refresh_lifetime_secs,
        }
    }

    fn generate(
        &self,
        user_id: &str,
        email: &str,
        token_type: &str,
        lifetime_secs: i64,
    ) -> Result<(String, i64), AuthError> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(lifetime_secs)).timestamp();

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp,
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))?;

        Ok((token, exp))
    }

    pub fn generate_access_token(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        self.generate(user_id, email, ACCESS, self.access_lifetime_secs)
            .map(|(token, _)| token)
    }

    pub fn generate_refresh_token(&self, user_id: &str, email: &str) -> Result<String, AuthError> {
        self.generate(user_id, email, REFRESH, self.refresh_lifetime_secs)
            .map(|(token, _)| token)
    }

    /// Issues a fresh access/refresh pair for `user`.
    pub fn issue_session(&self, user: SessionUser) -> Result<Session, AuthError> {
        let (access_token, expires_at) =
            self.generate(&user.id, &user.email, ACCESS, self.access_lifetime_secs)?;
        let refresh_token = self.generate_refresh_token(&user.id, &user.email)?;

        Ok(Session {
            access_token,
            refresh_token,
            token_type: "bearer",
            expires_in: self.access_lifetime_secs,
            expires_at,
            user,
        })
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(token_data.claims)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != ACCESS {
            return Err(AuthError::WrongTokenType(ACCESS));
        }
        Ok(claims)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != REFRESH {
            return Err(AuthError::WrongTokenType(REFRESH));
        }
        Ok(claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Password Hashing
// =============================================================================

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Request Extractor
// =============================================================================

/// The caller behind a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = extract_bearer_token(header).ok_or(AuthError::MissingToken)?;
        let claims = state.jwt.validate_access_token(token)?;

        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

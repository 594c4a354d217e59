//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in InventoryPro                           │
//! │                                                                         │
//! │  Handler: Result<Json<T>, ApiError>                                    │
//! │         │                                                               │
//! │         ├── ValidationError (form) ───────► 400 VALIDATION_ERROR       │
//! │         ├── AuthError ────────────────────► 401 UNAUTHORIZED           │
//! │         ├── DbError::NotFound ────────────► 404 NOT_FOUND              │
//! │         ├── DbError::UniqueViolation ─────► 409 CONFLICT               │
//! │         ├── CoreError::InsufficientStock ─► 409 INSUFFICIENT_STOCK     │
//! │         └── anything else ────────────────► 500                        │
//! │                                                                         │
//! │  Body: { "code": "CONFLICT", "message": "<backend message verbatim>" } │
//! │  The dashboard shows `message` as-is in a toast.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inventory_core::{CoreError, ValidationError};
use inventory_db::DbError;
use serde::Serialize;

use crate::auth::AuthError;
use crate::storage::StorageError;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: 3f2a..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Unique or foreign-key constraint rejected the write (409)
    Conflict,

    /// Stock would go negative (409)
    InsufficientStock,

    /// Missing/invalid session or bad credentials (401)
    Unauthorized,

    /// Wrong service key on a function endpoint (403)
    Forbidden,

    /// Database operation failed (500)
    DatabaseError,

    /// Object storage failed (500)
    StorageError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Conflict | ErrorCode::InsufficientStock => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::DatabaseError | ErrorCode::StorageError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Converts database errors to API errors.
///
/// Constraint messages reach the client unchanged.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::new(ErrorCode::Conflict, err.to_string())
            }
            DbError::CheckViolation { .. } => ApiError::validation(err.to_string()),
            DbError::Domain(e) => e.into(),
            DbError::PoolExhausted => {
                tracing::error!("Database pool exhausted");
                ApiError::new(ErrorCode::DatabaseError, err.to_string())
            }
            other => {
                tracing::error!(error = %other, "Database operation failed");
                ApiError::new(ErrorCode::DatabaseError, other.to_string())
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock { .. } => {
                ApiError::new(ErrorCode::InsufficientStock, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenGeneration(_) | AuthError::Hashing(_) => {
                tracing::error!(error = %err, "Auth internals failed");
                ApiError::internal(err.to_string())
            }
            _ => ApiError::unauthorized(err.to_string()),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidPath(_) => ApiError::validation(err.to_string()),
            StorageError::AlreadyExists => ApiError::new(ErrorCode::Conflict, err.to_string()),
            StorageError::Io(_) => {
                tracing::error!(error = %err, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;

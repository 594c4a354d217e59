//! # Server Functions
//!
//! `POST /functions/v1/seed-admin`: the bootstrap routine behind an elevated
//! credential. Callers must send `x-service-key` matching the configured
//! service key; browsers never hold it.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::bootstrap::{seed_admin, SeedOutcome};
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::AppState;

pub const SERVICE_KEY_HEADER: &str = "x-service-key";

/// Compares every byte pair regardless of where the first mismatch sits.
fn keys_match(presented: &[u8], expected: &[u8]) -> bool {
    presented.len() == expected.len()
        && presented
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

pub async fn seed_admin_function(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let presented = headers
        .get(SERVICE_KEY_HEADER)
        .map(|value| value.as_bytes())
        .unwrap_or_default();

    if !keys_match(presented, state.config.service_key.as_bytes()) {
        warn!("Seed-admin called without a valid service key");
        return Err(ApiError::new(ErrorCode::Forbidden, "Invalid service key"));
    }

    let outcome = seed_admin(&state.db).await?;
    let status = match outcome {
        SeedOutcome::Failed(_) => StatusCode::BAD_REQUEST,
        SeedOutcome::Created | SeedOutcome::AlreadySeeded => StatusCode::OK,
    };
    Ok((status, Json(outcome.to_body())).into_response())
}

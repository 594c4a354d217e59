//! Stock movement history across all items, newest first. Recording a
//! movement lives under `/api/items/{id}/movements`.

use axum::extract::State;
use axum::Json;
use inventory_core::StockMovement;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_movements(
    _user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<StockMovement>>> {
    Ok(Json(state.db.movements().list().await?))
}

//! # Dashboard Handler
//!
//! Three independent reads joined with `tokio::try_join!`, then reduced by
//! [`inventory_core::dashboard::summarize`]. Nothing is cached; every
//! request recomputes from the tables.

use axum::extract::State;
use axum::Json;
use inventory_core::dashboard::{summarize, DashboardSummary};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn get_dashboard(
    _user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<DashboardSummary>> {
    let items_repo = state.db.items();
    let collaborators_repo = state.db.collaborators();
    let movements_repo = state.db.movements();

    let (items, collaborators, movements) = tokio::try_join!(
        items_repo.list(),
        collaborators_repo.count(),
        movements_repo.count(),
    )?;

    let summary = summarize(&items, collaborators as usize, movements as usize);
    debug!(
        total_items = summary.total_items,
        low_stock = summary.low_stock,
        "Dashboard computed"
    );
    Ok(Json(summary))
}

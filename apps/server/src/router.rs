//! Route table for the HTTP API.
//!
//! Static segments (`/api/items/new`, `/api/items/export`) sit next to the
//! `{id}` captures; axum matches the static ones first.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, collaborators, dashboard, functions, items, movements, settings, users};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/sign-in", post(auth::sign_in))
        .route("/sign-up", post(auth::sign_up))
        .route("/refresh", post(auth::refresh))
        .route("/session", get(auth::current_session))
        .route("/password", post(auth::change_password))
        .route("/first-run", get(auth::first_run));

    let item_routes = Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/new", get(items::new_item_form))
        .route("/export", get(items::export_items))
        .route(
            "/{id}",
            get(items::get_item)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .route("/{id}/form", get(items::edit_item_form))
        .route(
            "/{id}/movements",
            get(items::list_item_movements).post(items::record_movement),
        );

    let collaborator_routes = Router::new()
        .route(
            "/",
            get(collaborators::list_collaborators).post(collaborators::create_collaborator),
        )
        .route("/new", get(collaborators::new_collaborator_form))
        .route("/export", get(collaborators::export_collaborators))
        .route(
            "/{id}",
            get(collaborators::get_collaborator)
                .put(collaborators::update_collaborator)
                .delete(collaborators::delete_collaborator),
        )
        .route("/{id}/form", get(collaborators::edit_collaborator_form));

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", put(users::update_user).delete(users::delete_user))
        .route("/{id}/form", get(users::edit_user_form));

    let settings_routes = Router::new()
        .route("/", get(settings::get_settings).patch(settings::update_settings))
        .route(
            "/logo",
            post(settings::upload_logo).delete(settings::remove_logo),
        )
        .route("/presets", get(settings::color_presets));

    let storage = ServeDir::new(&state.config.storage_root);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/items", item_routes)
        .nest("/api/collaborators", collaborator_routes)
        .nest("/api/users", user_routes)
        .nest("/api/settings", settings_routes)
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/movements", get(movements::list_movements))
        .route("/functions/v1/seed-admin", post(functions::seed_admin_function))
        .route("/theme.css", get(settings::theme_css))
        .route("/health", get(health))
        .nest_service("/storage", storage)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.db.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::app;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let (status, body) = app.send_anonymous("GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        app.state.db.close().await;
        let (status, _) = app.send_anonymous("GET", "/health", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let app = app().await;
        let (status, _) = app.send("GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

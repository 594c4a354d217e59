//! # Collaborator Handlers
//!
//! Same shape as the item screen: full-table load, in-memory search over
//! name / email / department, form prefill, CRUD, spreadsheet export.
//!
//! Deleting a collaborator unassigns their items (`ON DELETE SET NULL`).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use inventory_core::export::collaborator_sheet;
use inventory_core::form::CollaboratorForm;
use inventory_core::search::filter_rows;
use inventory_core::validation::validate_search_query;
use inventory_core::Collaborator;
use tracing::info;

use super::{Mutation, SearchQuery};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::export::xlsx_response;
use crate::state::AppState;

async fn filtered_collaborators(state: &AppState, query: &str) -> ApiResult<Vec<Collaborator>> {
    let query = validate_search_query(query)?;
    let rows = state.db.collaborators().list().await?;
    Ok(filter_rows(rows, &query))
}

async fn load(state: &AppState, id: &str) -> ApiResult<Collaborator> {
    state
        .db
        .collaborators()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Collaborator", id))
}

pub async fn list_collaborators(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Collaborator>>> {
    Ok(Json(filtered_collaborators(&state, &search.q).await?))
}

pub async fn get_collaborator(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Collaborator>> {
    Ok(Json(load(&state, &id).await?))
}

/// Blank form for "new collaborator".
pub async fn new_collaborator_form(_user: AuthUser) -> Json<CollaboratorForm> {
    Json(CollaboratorForm::default())
}

pub async fn edit_collaborator_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CollaboratorForm>> {
    let row = load(&state, &id).await?;
    Ok(Json(CollaboratorForm::from_collaborator(&row)))
}

pub async fn create_collaborator(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<CollaboratorForm>,
) -> ApiResult<(StatusCode, Json<Mutation<Collaborator>>)> {
    let draft = form.into_draft()?;
    let row = state.db.collaborators().insert(&draft).await?;
    info!(id = %row.id, "Collaborator created");
    Ok((
        StatusCode::CREATED,
        Json(Mutation::new("Collaborator created successfully", row)),
    ))
}

pub async fn update_collaborator(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<CollaboratorForm>,
) -> ApiResult<Json<Mutation<Collaborator>>> {
    let draft = form.into_draft()?;
    let row = state.db.collaborators().update(&id, &draft).await?;
    Ok(Json(Mutation::new("Collaborator updated successfully", row)))
}

pub async fn delete_collaborator(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<()>>> {
    state.db.collaborators().delete(&id).await?;
    info!(id = %id, "Collaborator deleted");
    Ok(Json(Mutation::message("Collaborator deleted")))
}

pub async fn export_collaborators(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Response> {
    let rows = filtered_collaborators(&state, &search.q).await?;
    xlsx_response(&collaborator_sheet(&rows))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_crud_and_search() {
        let app = app().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/collaborators",
                Some(json!({ "name": "Bruno Lima", "department": "IT" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let bruno = body["data"]["id"].as_str().unwrap().to_string();

        app.send(
            "POST",
            "/api/collaborators",
            Some(json!({ "name": "Ana Souza", "email": "ana@x.com" })),
        )
        .await;

        let (_, all) = app.send("GET", "/api/collaborators", None).await;
        let names: Vec<_> = all.as_array().unwrap().iter().map(|c| c["name"].clone()).collect();
        assert_eq!(names, [json!("Ana Souza"), json!("Bruno Lima")]);

        let (_, hits) = app.send("GET", "/api/collaborators?q=it", None).await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["name"], "Bruno Lima");

        let (_, form) = app
            .send("GET", &format!("/api/collaborators/{bruno}/form"), None)
            .await;
        assert_eq!(
            form,
            json!({ "name": "Bruno Lima", "email": "", "department": "IT", "position": "" })
        );

        let (status, body) = app
            .send(
                "PUT",
                &format!("/api/collaborators/{bruno}"),
                Some(json!({ "name": "Bruno L.", "position": "Technician" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["position"], "Technician");
        assert_eq!(body["data"]["department"], serde_json::Value::Null);

        let (status, _) = app
            .send("DELETE", &format!("/api/collaborators/{bruno}"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        let (_, all) = app.send("GET", "/api/collaborators", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_name_required() {
        let app = app().await;
        let (_, blank) = app.send("GET", "/api/collaborators/new", None).await;
        assert_eq!(
            blank,
            json!({ "name": "", "email": "", "department": "", "position": "" })
        );

        let (status, body) = app
            .send("POST", "/api/collaborators", Some(json!({ "name": "  " })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name is required");
    }

    #[tokio::test]
    async fn test_delete_unassigns_items() {
        let app = app().await;
        let (_, collaborator) = app
            .send("POST", "/api/collaborators", Some(json!({ "name": "Ana" })))
            .await;
        let collaborator_id = collaborator["data"]["id"].as_str().unwrap().to_string();

        let (_, item) = app
            .send(
                "POST",
                "/api/items",
                Some(json!({
                    "patrimony_number": "PAT-0001",
                    "name": "Laptop",
                    "status": "in_use",
                    "collaborator_id": collaborator_id,
                })),
            )
            .await;
        let item_id = item["data"]["id"].as_str().unwrap().to_string();

        app.send("DELETE", &format!("/api/collaborators/{collaborator_id}"), None)
            .await;

        let (_, item) = app.send("GET", &format!("/api/items/{item_id}"), None).await;
        assert_eq!(item["collaborator_id"], serde_json::Value::Null);
    }
}

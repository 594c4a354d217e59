//! # Inventory Item Handlers
//!
//! ## List/Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET /api/items?q=lap                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SELECT every item (created_at DESC)        no SQL filtering           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter_rows(rows, "lap")   name / patrimony number / category         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  [{ ...item, low_stock: quantity <= minimum_stock }]                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! `GET /api/items/export?q=` runs the same filter and renders the rows as
//! `inventory.xlsx`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use inventory_core::export::inventory_sheet;
use inventory_core::form::{ItemForm, MovementForm};
use inventory_core::search::filter_rows;
use inventory_core::validation::validate_search_query;
use inventory_core::{InventoryItem, StockMovement};
use serde::Serialize;
use tracing::{debug, info};

use super::{Mutation, SearchQuery};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::export::xlsx_response;
use crate::state::AppState;

/// An item as shown in the table.
#[derive(Debug, Serialize)]
pub struct ItemRow {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub low_stock: bool,
}

impl From<InventoryItem> for ItemRow {
    fn from(item: InventoryItem) -> Self {
        ItemRow {
            low_stock: item.is_low_stock(),
            item,
        }
    }
}

async fn filtered_items(state: &AppState, query: &str) -> ApiResult<Vec<InventoryItem>> {
    let query = validate_search_query(query)?;
    let rows = state.db.items().list().await?;
    let total = rows.len();
    let hits = filter_rows(rows, &query);
    debug!(query = %query, total, hits = hits.len(), "Filtered items");
    Ok(hits)
}

pub async fn list_items(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Json<Vec<ItemRow>>> {
    let items = filtered_items(&state, &search.q).await?;
    Ok(Json(items.into_iter().map(ItemRow::from).collect()))
}

pub async fn get_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemRow>> {
    let item = state
        .db
        .items()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item", &id))?;
    Ok(Json(item.into()))
}

/// Defaults for the "new item" form.
pub async fn new_item_form(_user: AuthUser) -> Json<ItemForm> {
    Json(ItemForm::empty())
}

/// The edit form prefilled from the stored row.
pub async fn edit_item_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemForm>> {
    let item = state
        .db
        .items()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Item", &id))?;
    Ok(Json(ItemForm::from_item(&item)))
}

pub async fn create_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<ItemForm>,
) -> ApiResult<(StatusCode, Json<Mutation<ItemRow>>)> {
    let draft = form.into_draft()?;
    let item = state.db.items().insert(&draft).await?;
    info!(id = %item.id, patrimony_number = %item.patrimony_number, "Item created");
    Ok((
        StatusCode::CREATED,
        Json(Mutation::new("Item created successfully", item.into())),
    ))
}

pub async fn update_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ItemForm>,
) -> ApiResult<Json<Mutation<ItemRow>>> {
    let draft = form.into_draft()?;
    let item = state.db.items().update(&id, &draft).await?;
    info!(id = %item.id, "Item updated");
    Ok(Json(Mutation::new("Item updated successfully", item.into())))
}

pub async fn delete_item(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<()>>> {
    state.db.items().delete(&id).await?;
    info!(id = %id, "Item deleted");
    Ok(Json(Mutation::message("Item deleted")))
}

pub async fn export_items(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Response> {
    let items = filtered_items(&state, &search.q).await?;
    let collaborators = state.db.collaborators().list().await?;
    xlsx_response(&inventory_sheet(&items, &collaborators))
}

pub async fn list_item_movements(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<StockMovement>>> {
    Ok(Json(state.db.movements().list_for_item(&id).await?))
}

pub async fn record_movement(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<MovementForm>,
) -> ApiResult<(StatusCode, Json<Mutation<StockMovement>>)> {
    let draft = form.into_draft()?;
    let movement = state
        .db
        .movements()
        .record(&id, &draft, Some(user.id.as_str()))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(Mutation::new("Stock movement recorded", movement)),
    ))
}

#[cfg(test)]
mod tests {
    use crate::export::tests::read_back;
    use crate::handlers::test_support::app;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    fn laptop() -> serde_json::Value {
        json!({
            "patrimony_number": "PAT-0001",
            "name": "Laptop",
            "category": "Electronics",
            "quantity": 5,
            "minimum_stock": "1",
        })
    }

    #[tokio::test]
    async fn test_requires_session() {
        let app = app().await;
        let (status, body) = app.send_anonymous("GET", "/api/items", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_then_edit_form_prefill() {
        let app = app().await;
        let (status, body) = app.send("POST", "/api/items", Some(laptop())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Item created successfully");
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, form) = app.send("GET", &format!("/api/items/{id}/form"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            form,
            json!({
                "patrimony_number": "PAT-0001",
                "name": "Laptop",
                "description": "",
                "category": "Electronics",
                "quantity": 5,
                "minimum_stock": 1,
                "location": "",
                "status": "available",
                "collaborator_id": "",
                "ticket_number": "",
            })
        );
    }

    #[tokio::test]
    async fn test_search_and_low_stock_flag() {
        let app = app().await;
        app.send("POST", "/api/items", Some(laptop())).await;
        app.send(
            "POST",
            "/api/items",
            Some(json!({
                "patrimony_number": "PAT-0002",
                "name": "Mouse",
                "quantity": 2,
                "minimum_stock": 2,
            })),
        )
        .await;

        let (_, all) = app.send("GET", "/api/items", None).await;
        let names: Vec<_> = all.as_array().unwrap().iter().map(|r| r["name"].clone()).collect();
        assert_eq!(names, [json!("Mouse"), json!("Laptop")]);
        assert_eq!(all[0]["low_stock"], true);
        assert_eq!(all[1]["low_stock"], false);

        let (_, hits) = app.send("GET", "/api/items?q=LAP", None).await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["name"], "Laptop");
    }

    #[tokio::test]
    async fn test_validation_and_conflict_messages() {
        let app = app().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/items",
                Some(json!({ "patrimony_number": "PAT-9", "name": "X", "quantity": -1 })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        app.send("POST", "/api/items", Some(laptop())).await;
        let (status, body) = app.send("POST", "/api/items", Some(laptop())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("duplicate key value violates unique constraint"));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = app().await;
        let (_, created) = app.send("POST", "/api/items", Some(laptop())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let mut edited = laptop();
        edited["status"] = json!("maintenance");
        edited["quantity"] = json!("7");
        let (status, body) = app.send("PUT", &format!("/api/items/{id}"), Some(edited)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "maintenance");
        assert_eq!(body["data"]["quantity"], 7);

        let (status, _) = app.send("DELETE", &format!("/api/items/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = app.send("GET", &format!("/api/items/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_movements_apply_to_quantity() {
        let app = app().await;
        let (_, created) = app.send("POST", "/api/items", Some(laptop())).await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/items/{id}/movements");

        let (status, body) = app
            .send("POST", &uri, Some(json!({ "kind": "out", "quantity": 2, "reason": "loan" })))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["kind"], "out");

        let (status, body) = app
            .send("POST", &uri, Some(json!({ "kind": "out", "quantity": 10 })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "INSUFFICIENT_STOCK");

        let (status, body) = app
            .send(
                "POST",
                &uri,
                Some(json!({ "kind": "in", "quantity": "9223372036854775807" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "quantity has invalid format: out of range");

        let (_, item) = app.send("GET", &format!("/api/items/{id}"), None).await;
        assert_eq!(item["quantity"], 3);

        let (_, history) = app.send("GET", &uri, None).await;
        assert_eq!(history.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_export_matches_filtered_rows() {
        let app = app().await;
        app.send("POST", "/api/items", Some(laptop())).await;
        app.send(
            "POST",
            "/api/items",
            Some(json!({ "patrimony_number": "PAT-0002", "name": "Mouse" })),
        )
        .await;

        let request = Request::builder()
            .uri("/api/items/export?q=lap")
            .header("authorization", format!("Bearer {}", app.token))
            .body(Body::empty())
            .unwrap();
        let (status, bytes) = app.raw(request).await;
        assert_eq!(status, StatusCode::OK);

        let rows = read_back(bytes, "Inventory");
        assert_eq!(
            rows[0],
            [
                "Patrimony No.",
                "Name",
                "Category",
                "Quantity",
                "Minimum Stock",
                "Location",
                "Status",
                "Ticket No.",
                "Collaborator",
            ]
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "PAT-0001");
        assert_eq!(rows[1][3], "5");
        assert_eq!(rows[1][6], "Available");
    }
}

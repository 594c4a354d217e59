//! # User Account Handlers
//!
//! The users screen lists profiles, not identities.
//!
//! ```text
//!   create  ──► register identity ──► (trigger) profile ──► set department by email
//!   update  ──► profile full_name / department
//!   delete  ──► profile row, then its identity
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use inventory_core::form::{ProfileForm, SignUpForm};
use inventory_core::search::filter_rows;
use inventory_core::validation::validate_search_query;
use inventory_core::Profile;
use inventory_db::DbError;
use tracing::{info, warn};

use super::auth::register;
use super::{Mutation, SearchQuery};
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

async fn load(state: &AppState, id: &str) -> ApiResult<Profile> {
    state
        .db
        .profiles()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile", id))
}

pub async fn list_users(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Profile>>> {
    let query = validate_search_query(&search.q)?;
    let rows = state.db.profiles().list().await?;
    Ok(Json(filter_rows(rows, &query)))
}

pub async fn edit_user_form(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProfileForm>> {
    let profile = load(&state, &id).await?;
    Ok(Json(ProfileForm::from_profile(&profile)))
}

/// Admin-side sign-up followed by the optional department update.
pub async fn create_user(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> ApiResult<(StatusCode, Json<Mutation<Profile>>)> {
    let account = form.into_account()?;
    let identity = register(&state, &account).await?;

    if let Some(department) = account.department.as_deref() {
        let updated = state
            .db
            .profiles()
            .set_department_by_email(&account.email, Some(department))
            .await?;
        if !updated {
            warn!(email = %account.email, "No profile found for department update");
        }
    }

    let profile = state
        .db
        .profiles()
        .find_by_user_id(&identity.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Profile", &identity.id))?;

    Ok((
        StatusCode::CREATED,
        Json(Mutation::new("User created successfully", profile)),
    ))
}

pub async fn update_user(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ProfileForm>,
) -> ApiResult<Json<Mutation<Profile>>> {
    let draft = form.into_draft()?;
    let profile = state.db.profiles().update(&id, &draft).await?;
    Ok(Json(Mutation::new("User updated successfully", profile)))
}

pub async fn delete_user(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Mutation<()>>> {
    let profile = load(&state, &id).await?;
    state.db.profiles().delete(&profile.id).await?;

    match state.db.identities().delete(&profile.user_id).await {
        Ok(()) | Err(DbError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    info!(profile_id = %profile.id, user_id = %profile.user_id, "User deleted");
    Ok(Json(Mutation::message("User deleted")))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_with_department() {
        let app = app().await;
        let (status, body) = app
            .send(
                "POST",
                "/api/users",
                Some(json!({
                    "email": "ana@x.com",
                    "password": "secret1",
                    "full_name": "Ana Souza",
                    "department": "Finance",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["department"], "Finance");
        assert_eq!(body["data"]["full_name"], "Ana Souza");

        let (_, list) = app.send("GET", "/api/users?q=finance", None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        let (_, list) = app.send("GET", "/api/users", None).await;
        assert_eq!(list[0]["email"], "ana@x.com");
        assert_eq!(list[1]["email"], "staff@x.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_message() {
        let app = app().await;
        let (status, body) = app
            .send(
                "POST",
                "/api/users",
                Some(json!({ "email": "STAFF@x.com", "password": "secret1", "full_name": "Dup" })),
            )
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().contains("auth_users.email"));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let app = app().await;
        let (status, body) = app
            .send(
                "POST",
                "/api/users",
                Some(json!({ "email": "ana@x.com", "password": "123", "full_name": "Ana" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password must be at least 6 characters");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = app().await;
        let (_, created) = app
            .send(
                "POST",
                "/api/users",
                Some(json!({ "email": "ana@x.com", "password": "secret1", "full_name": "Ana" })),
            )
            .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let user_id = created["data"]["user_id"].as_str().unwrap().to_string();

        let (_, form) = app.send("GET", &format!("/api/users/{id}/form"), None).await;
        assert_eq!(form, json!({ "full_name": "Ana", "department": "" }));

        let (status, body) = app
            .send(
                "PUT",
                &format!("/api/users/{id}"),
                Some(json!({ "full_name": "Ana Souza", "department": "HR" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["department"], "HR");

        let (status, _) = app.send("DELETE", &format!("/api/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(app.state.db.identities().get(&user_id).await.unwrap().is_none());
        assert!(app.state.db.profiles().get(&id).await.unwrap().is_none());
    }
}

//! # Authentication Handlers
//!
//! Sign-in, sign-up, token refresh, current session, password change, and
//! the sign-in screen's first-run check. Only `session` and `password`
//! require a bearer token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inventory_core::form::{NewAccount, PasswordChange, SignUpForm};
use inventory_core::SessionUser;
use inventory_db::{Identity, NewIdentity};
use serde::Deserialize;
use tracing::{debug, info};

use super::Mutation;
use crate::auth::{hash_password, verify_password, AuthError, AuthUser, Session};
use crate::bootstrap::{self, FirstRun};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Builds the session view, preferring the (editable) profile name.
async fn session_user(state: &AppState, identity: &Identity) -> ApiResult<SessionUser> {
    let profile = state.db.profiles().find_by_user_id(&identity.id).await?;
    let full_name = profile
        .map(|p| p.full_name)
        .unwrap_or_else(|| identity.full_name.clone());

    Ok(SessionUser {
        id: identity.id.clone(),
        email: identity.email.clone(),
        full_name: Some(full_name).filter(|name| !name.is_empty()),
    })
}

/// Creates an identity for a validated account. The database creates the
/// matching profile.
pub(crate) async fn register(state: &AppState, account: &NewAccount) -> ApiResult<Identity> {
    let password_hash = hash_password(&account.password)?;
    let identity = state
        .db
        .identities()
        .create(&NewIdentity {
            email: account.email.clone(),
            password_hash,
            full_name: account.full_name.clone(),
            confirmed: state.config.auto_confirm_signups,
        })
        .await?;

    info!(user_id = %identity.id, confirmed = identity.is_confirmed(), "User registered");
    Ok(identity)
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> ApiResult<Json<Session>> {
    let identity = state
        .db
        .identities()
        .find_by_email(&request.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&request.password, &identity.password_hash) {
        debug!(user_id = %identity.id, "Password mismatch");
        return Err(AuthError::InvalidCredentials.into());
    }
    if !identity.is_confirmed() {
        return Err(AuthError::EmailNotConfirmed.into());
    }

    let user = session_user(&state, &identity).await?;
    info!(user_id = %user.id, "Signed in");
    Ok(Json(state.jwt.issue_session(user)?))
}

pub async fn sign_up(
    State(state): State<AppState>,
    Json(form): Json<SignUpForm>,
) -> ApiResult<(StatusCode, Json<Mutation<SessionUser>>)> {
    let account = form.into_account()?;
    let identity = register(&state, &account).await?;

    if let Some(department) = account.department.as_deref() {
        state
            .db
            .profiles()
            .set_department_by_email(&account.email, Some(department))
            .await?;
    }

    let message = if identity.is_confirmed() {
        "Account created successfully"
    } else {
        "Account created, confirm your email to sign in"
    };
    let user = session_user(&state, &identity).await?;
    Ok((StatusCode::CREATED, Json(Mutation::new(message, user))))
}

pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> ApiResult<Json<Session>> {
    let claims = state.jwt.validate_refresh_token(&request.refresh_token)?;
    let identity = state
        .db
        .identities()
        .get(&claims.sub)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    let user = session_user(&state, &identity).await?;
    Ok(Json(state.jwt.issue_session(user)?))
}

pub async fn current_session(
    user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<SessionUser>> {
    let identity = state
        .db
        .identities()
        .get(&user.id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(Json(session_user(&state, &identity).await?))
}

/// Mismatch and length are checked before any storage call.
pub async fn change_password(
    user: AuthUser,
    State(state): State<AppState>,
    Json(change): Json<PasswordChange>,
) -> ApiResult<Json<Mutation<()>>> {
    let new_password = change.validate()?;
    let password_hash = hash_password(new_password)?;
    state
        .db
        .identities()
        .update_password(&user.id, &password_hash)
        .await?;

    info!(user_id = %user.id, "Password changed");
    Ok(Json(Mutation::message("Password changed successfully")))
}

pub async fn first_run(State(state): State<AppState>) -> Json<FirstRun> {
    Json(bootstrap::first_run(&state.db).await)
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::app;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_first_run_hidden_when_users_exist() {
        let app = app().await;
        // The test user already exists, so no banner
        let (status, body) = app.send_anonymous("GET", "/api/auth/first-run", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "show_default_credentials": false }));
    }

    #[tokio::test]
    async fn test_sign_up_sign_in_flow() {
        let app = app().await;

        let (status, body) = app
            .send_anonymous(
                "POST",
                "/api/auth/sign-up",
                Some(json!({
                    "email": "ana@x.com",
                    "password": "secret1",
                    "full_name": "Ana Souza",
                    "department": "Finance",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["full_name"], "Ana Souza");

        let (status, _) = app
            .send_anonymous(
                "POST",
                "/api/auth/sign-in",
                Some(json!({ "email": "ana@x.com", "password": "wrong1" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, session) = app
            .send_anonymous(
                "POST",
                "/api/auth/sign-in",
                Some(json!({ "email": "ANA@x.com", "password": "secret1" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(session["token_type"], "bearer");
        assert_eq!(session["user"]["email"], "ana@x.com");

        let (status, refreshed) = app
            .send_anonymous(
                "POST",
                "/api/auth/refresh",
                Some(json!({ "refresh_token": session["refresh_token"] })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(refreshed["user"]["id"], session["user"]["id"]);

        let profile = app
            .state
            .db
            .profiles()
            .find_by_email("ana@x.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.department.as_deref(), Some("Finance"));
    }

    #[tokio::test]
    async fn test_unknown_email_message() {
        let app = app().await;
        let (status, body) = app
            .send_anonymous(
                "POST",
                "/api/auth/sign-in",
                Some(json!({ "email": "nobody@x.com", "password": "whatever" })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_password_change_validated_first() {
        let app = app().await;

        let (status, body) = app
            .send(
                "POST",
                "/api/auth/password",
                Some(json!({ "new_password": "abcdef", "confirm_password": "abcdeg" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password confirmation does not match");

        let (status, body) = app
            .send(
                "POST",
                "/api/auth/password",
                Some(json!({ "new_password": "abc", "confirm_password": "abc" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "password must be at least 6 characters");

        let (status, _) = app
            .send(
                "POST",
                "/api/auth/password",
                Some(json!({ "new_password": "newpass", "confirm_password": "newpass" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_current_session() {
        let app = app().await;
        let (status, body) = app.send("GET", "/api/auth/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "staff@x.com");
        assert_eq!(body["full_name"], "Staff");
    }
}

//! # HTTP Handlers
//!
//! One module per screen of the dashboard.
//!
//! | Module | Routes |
//! |--------|--------|
//! | [`auth`] | `/api/auth/*` sign-in, sign-up, refresh, session, password, first-run |
//! | [`items`] | `/api/items*` list/search, form, CRUD, export, movements |
//! | [`collaborators`] | `/api/collaborators*` list/search, form, CRUD, export |
//! | [`users`] | `/api/users*` profiles list/search, create, edit, delete |
//! | [`settings`] | `/api/settings*`, `/theme.css` |
//! | [`dashboard`] | `/api/dashboard` |
//! | [`movements`] | `/api/movements` |
//! | [`functions`] | `/functions/v1/seed-admin` |
//!
//! Every handler returns `Result<_, ApiError>`; failures become
//! `{code, message}` bodies with the backend message unchanged.

pub mod auth;
pub mod collaborators;
pub mod dashboard;
pub mod functions;
pub mod items;
pub mod movements;
pub mod settings;
pub mod users;

use serde::{Deserialize, Serialize};

/// `?q=` on list and export routes.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Successful write: a short notification plus the affected row.
#[derive(Debug, Serialize)]
pub struct Mutation<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Mutation<T> {
    pub fn new(message: &'static str, data: T) -> Self {
        Mutation {
            message,
            data: Some(data),
        }
    }
}

impl Mutation<()> {
    pub fn message(message: &'static str) -> Self {
        Mutation {
            message,
            data: None,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use inventory_db::NewIdentity;
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt as _;

    use crate::router::build_router;
    use crate::state::AppState;

    pub struct TestApp {
        pub router: Router,
        pub state: AppState,
        pub token: String,
        _storage: TempDir,
    }

    /// Router over an in-memory database with one signed-in user.
    pub async fn app() -> TestApp {
        let (state, storage) = AppState::for_tests().await;
        let identity = state
            .db
            .identities()
            .create(&NewIdentity {
                email: "staff@x.com".to_string(),
                password_hash: "unused".to_string(),
                full_name: "Staff".to_string(),
                confirmed: true,
            })
            .await
            .unwrap();
        let token = state
            .jwt
            .generate_access_token(&identity.id, &identity.email)
            .unwrap();

        TestApp {
            router: build_router(state.clone()),
            state,
            token,
            _storage: storage,
        }
    }

    impl TestApp {
        pub async fn raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, body.to_vec())
        }

        /// Sends an authenticated JSON request.
        pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder()
                .method(method)
                .uri(uri)
                .header("authorization", format!("Bearer {}", self.token));
            self.json(builder, body).await
        }

        /// Sends a JSON request without credentials.
        pub async fn send_anonymous(
            &self,
            method: &str,
            uri: &str,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            self.json(builder, body).await
        }

        async fn json(
            &self,
            builder: axum::http::request::Builder,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let request = match body {
                Some(json) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let (status, bytes) = self.raw(request).await;
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }
    }
}

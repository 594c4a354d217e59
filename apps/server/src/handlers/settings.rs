//! # System Settings Handlers
//!
//! Every write updates rows in place and then refreshes the settings store,
//! which re-renders `/theme.css`.
//!
//! ## Logo Upload
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/settings/logo (multipart, field with a file name)           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "brand.png" ──► ext "png" ──► object path "logo.png"                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  remove old object ──► upload (upsert) ──► public URL                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  UPDATE system_settings SET value = <url> WHERE key = 'logo_url'       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SettingsStore::refresh()                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use axum::extract::{Multipart, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::Json;
use inventory_core::settings::{ColorPreset, COLOR_PRESETS};
use inventory_core::{SettingKey, SystemSettings};
use serde::Serialize;
use tracing::{debug, info};

use super::Mutation;
use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Settings as the dashboard reads them on every load.
#[derive(Debug, Serialize)]
pub struct SettingsView {
    #[serde(flatten)]
    pub settings: SystemSettings,
    pub loading: bool,
}

async fn view(state: &AppState) -> SettingsView {
    SettingsView {
        settings: (*state.settings.snapshot().await).clone(),
        loading: state.settings.is_loading(),
    }
}

/// Public: the sign-in screen shows the system name and logo.
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsView> {
    Json(view(&state).await)
}

/// Writes each `{key: value}` pair in place. Unrecognized keys match no row
/// and change nothing.
pub async fn update_settings(
    _user: AuthUser,
    State(state): State<AppState>,
    Json(changes): Json<BTreeMap<String, String>>,
) -> ApiResult<Json<Mutation<SettingsView>>> {
    for (key, value) in &changes {
        let updated = state.db.settings().set_value(key, value).await?;
        debug!(key = %key, updated, "Setting written");
    }

    state.settings.refresh().await;
    Ok(Json(Mutation::new("Settings updated successfully", view(&state).await)))
}

/// Object path for an uploaded file: everything after the last `.`, or the
/// whole name when there is none.
fn logo_object_path(file_name: &str) -> String {
    let ext = file_name.rsplit('.').next().unwrap_or(file_name);
    format!("logo.{ext}")
}

pub async fn upload_logo(
    _user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Mutation<SettingsView>>> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(e.body_text()))?
    {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::validation(e.body_text()))?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let (file_name, bytes) = upload.ok_or_else(|| ApiError::validation("file is required"))?;
    let path = logo_object_path(&file_name);

    state.logos.remove(&[path.clone()]).await?;
    state.logos.upload(&path, &bytes, true).await?;
    let url = state.logos.public_url(&path);

    state
        .db
        .settings()
        .set_value(SettingKey::LogoUrl.as_str(), &url)
        .await?;
    state.settings.refresh().await;

    info!(path = %path, bytes = bytes.len(), "Logo updated");
    Ok(Json(Mutation::new("Logo updated successfully", view(&state).await)))
}

pub async fn remove_logo(
    _user: AuthUser,
    State(state): State<AppState>,
) -> ApiResult<Json<Mutation<SettingsView>>> {
    state
        .db
        .settings()
        .set_value(SettingKey::LogoUrl.as_str(), "")
        .await?;
    state.settings.refresh().await;
    Ok(Json(Mutation::new("Logo removed", view(&state).await)))
}

pub async fn color_presets(_user: AuthUser) -> Json<&'static [ColorPreset]> {
    Json(&COLOR_PRESETS)
}

pub async fn theme_css(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/css; charset=utf-8")], state.theme_css.css())
}

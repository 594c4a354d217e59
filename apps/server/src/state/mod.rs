//! # State Module
//!
//! Everything a handler can reach, built once at startup and cloned into
//! each request by axum's `State` extractor.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         AppState (Clone)                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │        │            │              │               │            │       │
//! │        ▼            ▼              ▼               ▼            ▼       │
//! │  ┌──────────┐ ┌───────────┐ ┌──────────────┐ ┌───────────┐ ┌────────┐  │
//! │  │ Database │ │JwtManager │ │SettingsStore │ │  Storage  │ │ Config │  │
//! │  │ (pool)   │ │           │ │ + theme CSS  │ │ (logos)   │ │        │  │
//! │  └──────────┘ └───────────┘ └──────────────┘ └───────────┘ └────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: SqlitePool is internally synchronized                     │
//! │  • SettingsStore: RwLock<Arc<SystemSettings>>, swapped whole           │
//! │  • Everything else: read-only after startup                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod settings;

pub use settings::{CssThemeSink, SettingsStore, ThemeSink};

use std::sync::Arc;

use inventory_db::Database;

use crate::auth::JwtManager;
use crate::config::ServerConfig;
use crate::storage::{LocalBucket, StorageBackend, LOGO_BUCKET};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub settings: Arc<SettingsStore>,
    pub theme_css: Arc<CssThemeSink>,
    pub logos: Arc<dyn StorageBackend>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wires the shared services and performs the first settings load.
    pub async fn new(config: ServerConfig, db: Database) -> Self {
        let jwt = JwtManager::new(
            config.jwt_secret.clone(),
            config.jwt_access_lifetime_secs,
            config.jwt_refresh_lifetime_secs,
        );

        let theme_css = Arc::new(CssThemeSink::new());
        let settings = Arc::new(SettingsStore::new(db.settings(), theme_css.clone()));
        settings.refresh().await;

        let logos = LocalBucket::new(&config.storage_root, LOGO_BUCKET, &config.public_base_url);

        AppState {
            db,
            jwt: Arc::new(jwt),
            settings,
            theme_css,
            logos: Arc::new(logos),
            config: Arc::new(config),
        }
    }

    /// In-memory database plus a temporary storage root.
    #[cfg(test)]
    pub(crate) async fn for_tests() -> (AppState, tempfile::TempDir) {
        let root = tempfile::tempdir().unwrap();
        let db = Database::in_memory().await.unwrap();
        let state = AppState::new(ServerConfig::for_tests(root.path()), db).await;
        (state, root)
    }
}

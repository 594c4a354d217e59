//! # Pool
//!
//! One [`Database`] per process, cloned into every request. Repositories are
//! built on demand from the shared pool.
//!
//! ```text
//!   DbConfig::new("inventory.db")          DbConfig::in_memory()
//!        │  5 conns, 10 min idle                │  1 conn, never idles
//!        └──────────────┬───────────────────────┘
//!                       ▼
//!   Database::new ──► WAL + foreign_keys ──► migrations ──► db.items() / db.settings() / ...
//! ```
//!
//! `:memory:` gets a single connection because every new connection would
//! open a separate empty database.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::{
    CollaboratorRepository, IdentityRepository, ItemRepository, MovementRepository,
    ProfileRepository, SettingsRepository,
};

const MEMORY_PATH: &str = ":memory:";

/// Pool settings.
///
/// ```rust,ignore
/// let config = DbConfig::new("/var/lib/inventory/inventory.db")
///     .max_connections(8)
///     .run_migrations(false);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long a request waits for a free connection.
    pub connect_timeout: Duration,
    /// `None` keeps connections open forever.
    pub idle_timeout: Option<Duration>,
    pub run_migrations: bool,
}

impl DbConfig {
    /// File-backed pool; the file is created on first connect.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Throwaway database for tests.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(MEMORY_PATH),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    fn is_in_memory(&self) -> bool {
        self.database_path.as_os_str() == MEMORY_PATH
    }
}

/// Shared handle over the pool. Clones share connections.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening database");

        let connect_url = if config.is_in_memory() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}?mode=rwc", config.database_path.display())
        };

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // collaborator deletion relies on ON DELETE SET NULL
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.idle_timeout.map(|_| Duration::from_secs(30 * 60)))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Pool ready");

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    pub async fn in_memory() -> DbResult<Self> {
        Self::new(DbConfig::in_memory()).await
    }

    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn items(&self) -> ItemRepository {
        ItemRepository::new(self.pool.clone())
    }

    pub fn collaborators(&self) -> CollaboratorRepository {
        CollaboratorRepository::new(self.pool.clone())
    }

    pub fn profiles(&self) -> ProfileRepository {
        ProfileRepository::new(self.pool.clone())
    }

    pub fn identities(&self) -> IdentityRepository {
        IdentityRepository::new(self.pool.clone())
    }

    pub fn movements(&self) -> MovementRepository {
        MovementRepository::new(self.pool.clone())
    }

    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Every repository call fails with `ConnectionFailed` afterwards.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }

    /// `SELECT 1` round-trip, used by `GET /health`.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

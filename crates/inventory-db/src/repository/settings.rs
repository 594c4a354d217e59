//! # Settings Repository
//!
//! Raw `(key, value)` access to `system_settings`. Rows are seeded by
//! migration and only ever updated in place; merging over defaults happens
//! in `inventory_core::SystemSettings::from_rows`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Every stored row, recognized or not.
    pub async fn list(&self) -> DbResult<Vec<(String, String)>> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT key, value FROM system_settings ORDER BY key",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Updates the row with `key` in place.
    ///
    /// ## Returns
    /// `false` when no row has that key (nothing is inserted).
    pub async fn set_value(&self, key: &str, value: &str) -> DbResult<bool> {
        debug!(key = %key, "Updating setting");

        let result =
            sqlx::query("UPDATE system_settings SET value = ?2, updated_at = ?3 WHERE key = ?1")
                .bind(key)
                .bind(value)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

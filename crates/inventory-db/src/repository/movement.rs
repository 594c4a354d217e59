//! # Stock Movement Repository
//!
//! ## Recording a Movement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │    SELECT quantity FROM inventory_items WHERE id = ?   (NotFound?)     │
//! │    new = quantity + delta                              (new < 0 ? ✗)   │
//! │    UPDATE inventory_items SET quantity = new                           │
//! │    INSERT INTO stock_movements (...)                                   │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Either both the quantity change and the movement row land, or neither.

use chrono::Utc;
use inventory_core::form::MovementDraft;
use inventory_core::{CoreError, StockMovement, ValidationError};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::generate_id;
use crate::error::{DbError, DbResult};

/// Raised before anything is written when a movement amount cannot be
/// applied without leaving the `i64` range.
fn quantity_out_of_range() -> CoreError {
    ValidationError::InvalidFormat {
        field: "quantity".to_string(),
        reason: "out of range".to_string(),
    }
    .into()
}

#[derive(Debug, Clone)]
pub struct MovementRepository {
    pool: SqlitePool,
}

impl MovementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MovementRepository { pool }
    }

    /// All movements, newest first.
    pub async fn list(&self) -> DbResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, item_id, kind, quantity, reason, user_id, created_at
            FROM stock_movements
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn list_for_item(&self, item_id: &str) -> DbResult<Vec<StockMovement>> {
        let rows = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, item_id, kind, quantity, reason, user_id, created_at
            FROM stock_movements
            WHERE item_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock_movements")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Records a movement and applies its delta to the item quantity.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - no such item
    /// * `Err(DbError::Domain(CoreError::InsufficientStock))` - the quantity
    ///   would drop below zero; nothing is written
    pub async fn record(
        &self,
        item_id: &str,
        draft: &MovementDraft,
        user_id: Option<&str>,
    ) -> DbResult<StockMovement> {
        let delta = draft.delta().ok_or_else(quantity_out_of_range)?;
        debug!(item_id = %item_id, kind = ?draft.kind, delta, "Recording stock movement");

        let mut tx = self.pool.begin().await?;

        let current: Option<(i64, String)> = sqlx::query_as(
            "SELECT quantity, patrimony_number FROM inventory_items WHERE id = ?1",
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((quantity, patrimony_number)) = current else {
            return Err(DbError::not_found("Item", item_id));
        };

        let new_quantity = quantity
            .checked_add(delta)
            .ok_or_else(quantity_out_of_range)?;
        if new_quantity < 0 {
            let requested = delta.checked_neg().ok_or_else(quantity_out_of_range)?;
            return Err(CoreError::InsufficientStock {
                patrimony_number,
                available: quantity,
                requested,
            }
            .into());
        }

        let now = Utc::now();

        sqlx::query("UPDATE inventory_items SET quantity = ?2, updated_at = ?3 WHERE id = ?1")
            .bind(item_id)
            .bind(new_quantity)
            .bind(now)
            .execute(&mut *tx)
            .await?;

        let movement = StockMovement {
            id: generate_id(),
            item_id: item_id.to_string(),
            kind: draft.kind,
            quantity: draft.quantity,
            reason: draft.reason.clone(),
            user_id: user_id.map(str::to_string),
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO stock_movements (id, item_id, kind, quantity, reason, user_id, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&movement.id)
        .bind(&movement.item_id)
        .bind(movement.kind)
        .bind(movement.quantity)
        .bind(&movement.reason)
        .bind(&movement.user_id)
        .bind(movement.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            item_id = %item_id,
            from = quantity,
            to = new_quantity,
            "Stock movement recorded"
        );
        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use inventory_core::form::ItemForm;
    use inventory_core::MovementKind;

    async fn item_with_quantity(db: &Database, quantity: i64) -> String {
        let draft = ItemForm {
            patrimony_number: "PAT-0001".to_string(),
            name: "Toner".to_string(),
            quantity: Some(quantity.into()),
            ..ItemForm::empty()
        }
        .into_draft()
        .unwrap();
        db.items().insert(&draft).await.unwrap().id
    }

    fn movement(kind: MovementKind, quantity: i64) -> MovementDraft {
        MovementDraft {
            kind,
            quantity,
            reason: None,
        }
    }

    #[tokio::test]
    async fn test_record_applies_delta() {
        let db = Database::in_memory().await.unwrap();
        let id = item_with_quantity(&db, 5).await;

        db.movements()
            .record(&id, &movement(MovementKind::Out, 2), Some("u1"))
            .await
            .unwrap();
        db.movements()
            .record(&id, &movement(MovementKind::In, 10), None)
            .await
            .unwrap();
        db.movements()
            .record(&id, &movement(MovementKind::Adjustment, -1), None)
            .await
            .unwrap();

        let item = db.items().get(&id).await.unwrap().unwrap();
        assert_eq!(item.quantity, 12);

        let history = db.movements().list_for_item(&id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].kind, MovementKind::Adjustment);
        assert_eq!(history[2].user_id.as_deref(), Some("u1"));
        assert_eq!(db.movements().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_record_rejects_negative_result() {
        let db = Database::in_memory().await.unwrap();
        let id = item_with_quantity(&db, 2).await;

        let err = db
            .movements()
            .record(&id, &movement(MovementKind::Out, 3), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { available: 2, requested: 3, .. })
        ));

        assert_eq!(db.items().get(&id).await.unwrap().unwrap().quantity, 2);
        assert_eq!(db.movements().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_rejects_out_of_range_amounts() {
        let db = Database::in_memory().await.unwrap();
        let id = item_with_quantity(&db, 5).await;

        for draft in [
            movement(MovementKind::In, i64::MAX),
            movement(MovementKind::Adjustment, i64::MIN),
            movement(MovementKind::Out, i64::MIN),
        ] {
            let err = db.movements().record(&id, &draft, None).await.unwrap_err();
            assert!(
                matches!(
                    err,
                    DbError::Domain(CoreError::Validation(ValidationError::InvalidFormat { .. }))
                ),
                "{draft:?} gave {err:?}"
            );
        }

        assert_eq!(db.items().get(&id).await.unwrap().unwrap().quantity, 5);
        assert_eq!(db.movements().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_record_unknown_item() {
        let db = Database::in_memory().await.unwrap();
        let err = db
            .movements()
            .record("missing", &movement(MovementKind::In, 1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}

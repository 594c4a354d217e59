//! # Inventory Item Repository
//!
//! Database operations for inventory items.
//!
//! ## Ordering
//! Lists come back newest first (`created_at DESC`), ties broken by insert
//! order so rows created within the same instant stay stable.

use chrono::Utc;
use inventory_core::form::ItemDraft;
use inventory_core::InventoryItem;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};

/// Repository for inventory item database operations.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Loads the whole table, newest first.
    pub async fn list(&self) -> DbResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT
                id, patrimony_number, name, description, category,
                quantity, minimum_stock, location, status,
                collaborator_id, ticket_number, created_at, updated_at
            FROM inventory_items
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = items.len(), "Loaded inventory items");
        Ok(items)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(item))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get(&self, id: &str) -> DbResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT
                id, patrimony_number, name, description, category,
                quantity, minimum_stock, location, status,
                collaborator_id, ticket_number, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Inserts a new item.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - patrimony number already exists
    /// * `Err(DbError::ForeignKeyViolation)` - unknown collaborator id
    pub async fn insert(&self, draft: &ItemDraft) -> DbResult<InventoryItem> {
        debug!(patrimony_number = %draft.patrimony_number, "Inserting item");

        let now = Utc::now();
        let item = InventoryItem {
            id: generate_id(),
            patrimony_number: draft.patrimony_number.clone(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            category: draft.category.clone(),
            quantity: draft.quantity,
            minimum_stock: draft.minimum_stock,
            location: draft.location.clone(),
            status: draft.status.clone(),
            collaborator_id: draft.collaborator_id.clone(),
            ticket_number: draft.ticket_number.clone(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO inventory_items (
                id, patrimony_number, name, description, category,
                quantity, minimum_stock, location, status,
                collaborator_id, ticket_number, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&item.id)
        .bind(&item.patrimony_number)
        .bind(&item.name)
        .bind(&item.description)
        .bind(&item.category)
        .bind(item.quantity)
        .bind(item.minimum_stock)
        .bind(&item.location)
        .bind(item.status.as_str())
        .bind(&item.collaborator_id)
        .bind(&item.ticket_number)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Overwrites every editable column of an existing item.
    ///
    /// ## Returns
    /// * `Ok(item)` - the row as stored after the update
    /// * `Err(DbError::NotFound)` - no item with that id
    pub async fn update(&self, id: &str, draft: &ItemDraft) -> DbResult<InventoryItem> {
        debug!(id = %id, "Updating item");

        let item = sqlx::query_as::<_, InventoryItem>(
            r#"
            UPDATE inventory_items SET
                patrimony_number = ?2,
                name = ?3,
                description = ?4,
                category = ?5,
                quantity = ?6,
                minimum_stock = ?7,
                location = ?8,
                status = ?9,
                collaborator_id = ?10,
                ticket_number = ?11,
                updated_at = ?12
            WHERE id = ?1
            RETURNING
                id, patrimony_number, name, description, category,
                quantity, minimum_stock, location, status,
                collaborator_id, ticket_number, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&draft.patrimony_number)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(&draft.category)
        .bind(draft.quantity)
        .bind(draft.minimum_stock)
        .bind(&draft.location)
        .bind(draft.status.as_str())
        .bind(&draft.collaborator_id)
        .bind(&draft.ticket_number)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or_else(|| DbError::not_found("Item", id))
    }

    /// Hard-deletes an item. Its stock movements go with it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting item");

        let result = sqlx::query("DELETE FROM inventory_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Item", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inventory_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;
    use inventory_core::form::{CollaboratorForm, ItemForm};
    use inventory_core::ItemStatus;

    fn draft(patrimony: &str, name: &str) -> ItemDraft {
        ItemForm {
            patrimony_number: patrimony.to_string(),
            name: name.to_string(),
            quantity: Some(5.into()),
            ..ItemForm::empty()
        }
        .into_draft()
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let db = Database::in_memory().await.unwrap();
        let created = db.items().insert(&draft("PAT-0001", "Laptop")).await.unwrap();

        let loaded = db.items().get(&created.id).await.unwrap().unwrap();
        assert_eq!(loaded.patrimony_number, "PAT-0001");
        assert_eq!(loaded.quantity, 5);
        assert_eq!(loaded.status, ItemStatus::Available);
        assert_eq!(loaded.description, None);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = Database::in_memory().await.unwrap();
        db.items().insert(&draft("PAT-0001", "First")).await.unwrap();
        db.items().insert(&draft("PAT-0002", "Second")).await.unwrap();
        db.items().insert(&draft("PAT-0003", "Third")).await.unwrap();

        let names: Vec<_> = db
            .items()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_duplicate_patrimony_rejected() {
        let db = Database::in_memory().await.unwrap();
        db.items().insert(&draft("PAT-0001", "Laptop")).await.unwrap();

        let err = db.items().insert(&draft("PAT-0001", "Other")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
        assert!(err.to_string().contains("patrimony_number"));
    }

    #[tokio::test]
    async fn test_update_and_missing_update() {
        let db = Database::in_memory().await.unwrap();
        let created = db.items().insert(&draft("PAT-0001", "Laptop")).await.unwrap();

        let mut changed = draft("PAT-0001", "Laptop 14\"");
        changed.status = ItemStatus::Maintenance;
        let updated = db.items().update(&created.id, &changed).await.unwrap();
        assert_eq!(updated.name, "Laptop 14\"");
        assert_eq!(updated.status, ItemStatus::Maintenance);
        assert_eq!(updated.created_at, created.created_at);

        let err = db.items().update("missing", &changed).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_collaborator_rejected() {
        let db = Database::in_memory().await.unwrap();
        let mut d = draft("PAT-0001", "Laptop");
        d.collaborator_id = Some("nobody".to_string());

        let err = db.items().insert(&d).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }

    #[tokio::test]
    async fn test_collaborator_delete_unassigns_items() {
        let db = Database::in_memory().await.unwrap();
        let ana = db
            .collaborators()
            .insert(
                &CollaboratorForm {
                    name: "Ana".to_string(),
                    ..Default::default()
                }
                .into_draft()
                .unwrap(),
            )
            .await
            .unwrap();

        let mut d = draft("PAT-0001", "Laptop");
        d.collaborator_id = Some(ana.id.clone());
        let item = db.items().insert(&d).await.unwrap();

        db.collaborators().delete(&ana.id).await.unwrap();
        let item = db.items().get(&item.id).await.unwrap().unwrap();
        assert_eq!(item.collaborator_id, None);
    }

    #[tokio::test]
    async fn test_unknown_status_survives_read() {
        let db = Database::in_memory().await.unwrap();
        let created = db.items().insert(&draft("PAT-0001", "Laptop")).await.unwrap();
        sqlx::query("UPDATE inventory_items SET status = 'on_loan' WHERE id = ?1")
            .bind(&created.id)
            .execute(db.pool())
            .await
            .unwrap();

        let item = db.items().get(&created.id).await.unwrap().unwrap();
        assert_eq!(item.status, ItemStatus::Unknown("on_loan".to_string()));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::in_memory().await.unwrap();
        let created = db.items().insert(&draft("PAT-0001", "Laptop")).await.unwrap();
        db.items().delete(&created.id).await.unwrap();
        assert_eq!(db.items().count().await.unwrap(), 0);
        assert!(db.items().delete(&created.id).await.is_err());
    }
}

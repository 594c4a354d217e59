//! # Collaborator Repository
//!
//! Collaborators are referenced by items through a nullable foreign key
//! declared `ON DELETE SET NULL`: deleting a collaborator unassigns their
//! items instead of failing.

use chrono::Utc;
use inventory_core::form::CollaboratorDraft;
use inventory_core::Collaborator;
use sqlx::SqlitePool;
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct CollaboratorRepository {
    pool: SqlitePool,
}

impl CollaboratorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CollaboratorRepository { pool }
    }

    /// Loads the whole table ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Collaborator>> {
        let rows = sqlx::query_as::<_, Collaborator>(
            r#"
            SELECT id, name, email, department, position, created_at
            FROM collaborators
            ORDER BY name COLLATE NOCASE, rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded collaborators");
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<Collaborator>> {
        let row = sqlx::query_as::<_, Collaborator>(
            r#"
            SELECT id, name, email, department, position, created_at
            FROM collaborators
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn insert(&self, draft: &CollaboratorDraft) -> DbResult<Collaborator> {
        debug!(name = %draft.name, "Inserting collaborator");

        let row = Collaborator {
            id: generate_id(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            department: draft.department.clone(),
            position: draft.position.clone(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO collaborators (id, name, email, department, position, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.department)
        .bind(&row.position)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: &str, draft: &CollaboratorDraft) -> DbResult<Collaborator> {
        debug!(id = %id, "Updating collaborator");

        let row = sqlx::query_as::<_, Collaborator>(
            r#"
            UPDATE collaborators SET
                name = ?2,
                email = ?3,
                department = ?4,
                position = ?5
            WHERE id = ?1
            RETURNING id, name, email, department, position, created_at
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.department)
        .bind(&draft.position)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Collaborator", id))
    }

    /// Deletes a collaborator; their items become unassigned.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting collaborator");

        let result = sqlx::query("DELETE FROM collaborators WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Collaborator", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM collaborators")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

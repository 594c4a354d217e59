//! # Profile Repository
//!
//! Profiles are never inserted from application code: the
//! `auth_users_create_profile` trigger creates one per identity. There is no
//! foreign key back to `auth_users`, so a profile can outlive its identity
//! ("orphan"); [`ProfileRepository::delete_orphans`] cleans those up.

use inventory_core::form::ProfileDraft;
use inventory_core::Profile;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProfileRepository { pool }
    }

    /// Loads all profiles, newest first.
    pub async fn list(&self) -> DbResult<Vec<Profile>> {
        let rows = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, full_name, email, department, created_at
            FROM profiles
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded profiles");
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, full_name, email, department, created_at
            FROM profiles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn find_by_user_id(&self, user_id: &str) -> DbResult<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, full_name, email, department, created_at
            FROM profiles
            WHERE user_id = ?1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Case-insensitive email lookup. With orphans present the newest row
    /// wins.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, full_name, email, department, created_at
            FROM profiles
            WHERE email = ?1 COLLATE NOCASE
            ORDER BY created_at DESC, rowid DESC
            LIMIT 1
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(&self, id: &str, draft: &ProfileDraft) -> DbResult<Profile> {
        debug!(id = %id, "Updating profile");

        let row = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles SET
                full_name = ?2,
                department = ?3
            WHERE id = ?1
            RETURNING id, user_id, full_name, email, department, created_at
            "#,
        )
        .bind(id)
        .bind(&draft.full_name)
        .bind(&draft.department)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| DbError::not_found("Profile", id))
    }

    /// Sets the department on the profile found by email.
    ///
    /// ## Returns
    /// `false` when no profile has that email.
    pub async fn set_department_by_email(
        &self,
        email: &str,
        department: Option<&str>,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET department = ?2
            WHERE email = ?1 COLLATE NOCASE
            "#,
        )
        .bind(email.trim())
        .bind(department)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting profile");

        let result = sqlx::query("DELETE FROM profiles WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Profile", id));
        }

        Ok(())
    }

    /// Deletes profiles whose identity no longer exists.
    ///
    /// ## Returns
    /// Number of rows removed.
    pub async fn delete_orphans(&self) -> DbResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM profiles
            WHERE user_id NOT IN (SELECT id FROM auth_users)
            "#,
        )
        .execute(&self.pool)
        .await?;

        let removed = result.rows_affected();
        if removed > 0 {
            info!(removed, "Deleted orphaned profiles");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::NewIdentity;
    use crate::Database;

    async fn create_user(db: &Database, email: &str) -> String {
        db.identities()
            .create(&NewIdentity {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                full_name: email.to_string(),
                confirmed: true,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = Database::in_memory().await.unwrap();
        create_user(&db, "first@x.com").await;
        create_user(&db, "second@x.com").await;

        let emails: Vec<_> = db
            .profiles()
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.email)
            .collect();
        assert_eq!(emails, ["second@x.com", "first@x.com"]);
    }

    #[tokio::test]
    async fn test_set_department_by_email() {
        let db = Database::in_memory().await.unwrap();
        create_user(&db, "ana@x.com").await;

        assert!(db
            .profiles()
            .set_department_by_email("ANA@x.com", Some("Finance"))
            .await
            .unwrap());
        assert!(!db
            .profiles()
            .set_department_by_email("nobody@x.com", Some("Finance"))
            .await
            .unwrap());

        let profile = db.profiles().find_by_email("ana@x.com").await.unwrap().unwrap();
        assert_eq!(profile.department.as_deref(), Some("Finance"));
    }

    #[tokio::test]
    async fn test_delete_orphans() {
        let db = Database::in_memory().await.unwrap();
        let kept = create_user(&db, "kept@x.com").await;
        let gone = create_user(&db, "gone@x.com").await;

        db.identities().delete(&gone).await.unwrap();
        assert_eq!(db.profiles().list().await.unwrap().len(), 2);

        assert_eq!(db.profiles().delete_orphans().await.unwrap(), 1);
        let left = db.profiles().list().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].user_id, kept);
    }

    #[tokio::test]
    async fn test_update_profile() {
        let db = Database::in_memory().await.unwrap();
        let user_id = create_user(&db, "ana@x.com").await;
        let profile = db.profiles().find_by_user_id(&user_id).await.unwrap().unwrap();

        let updated = db
            .profiles()
            .update(
                &profile.id,
                &ProfileDraft {
                    full_name: "Ana Souza".to_string(),
                    department: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.full_name, "Ana Souza");
        assert_eq!(updated.email, "ana@x.com");
    }
}

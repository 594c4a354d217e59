//! # Identity Repository
//!
//! Login identities owned by the auth service: email, password hash, and
//! confirmation state. Inserting an identity fires the
//! `auth_users_create_profile` trigger, which creates the matching profile
//! row.
//!
//! Hashing happens in the caller; this repository only ever sees hashes.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use super::generate_id;
use crate::error::{DbError, DbResult};

/// A stored identity.
#[derive(Clone, FromRow)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    pub email_confirmed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("email_confirmed_at", &self.email_confirmed_at)
            .finish()
    }
}

/// Input for [`IdentityRepository::create`].
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    /// Marks the email as confirmed at creation time.
    pub confirmed: bool,
}

#[derive(Debug, Clone)]
pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        IdentityRepository { pool }
    }

    /// True when at least one identity exists (a `LIMIT 1` listing).
    pub async fn any_exists(&self) -> DbResult<bool> {
        let first: Option<String> = sqlx::query_scalar("SELECT id FROM auth_users LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;

        Ok(first.is_some())
    }

    /// Creates an identity. The profile row is created by the database.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn create(&self, new: &NewIdentity) -> DbResult<Identity> {
        debug!(email = %new.email, confirmed = new.confirmed, "Creating identity");

        let now = Utc::now();
        let identity = Identity {
            id: generate_id(),
            email: new.email.clone(),
            password_hash: new.password_hash.clone(),
            full_name: new.full_name.clone(),
            email_confirmed_at: new.confirmed.then_some(now),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO auth_users (
                id, email, password_hash, full_name,
                email_confirmed_at, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&identity.id)
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(&identity.full_name)
        .bind(identity.email_confirmed_at)
        .bind(identity.created_at)
        .bind(identity.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(identity)
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<Identity>> {
        let identity = sqlx::query_as::<_, Identity>(
            r#"
            SELECT id, email, password_hash, full_name,
                   email_confirmed_at, created_at, updated_at
            FROM auth_users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }

    /// Email lookup is case-insensitive.
    pub async fn find_by_email(&self, email: &str) -> DbResult<Option<Identity>> {
        let identity = sqlx::query_as::<_, Identity>(
            r#"
            SELECT id, email, password_hash, full_name,
                   email_confirmed_at, created_at, updated_at
            FROM auth_users
            WHERE email = ?1
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }

    pub async fn update_password(&self, id: &str, password_hash: &str) -> DbResult<()> {
        debug!(id = %id, "Updating password hash");

        let result =
            sqlx::query("UPDATE auth_users SET password_hash = ?2, updated_at = ?3 WHERE id = ?1")
                .bind(id)
                .bind(password_hash)
                .bind(Utc::now())
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Deletes an identity. Its profile is left in place.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting identity");

        let result = sqlx::query("DELETE FROM auth_users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

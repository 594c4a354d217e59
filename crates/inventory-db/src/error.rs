//! # Storage Errors
//!
//! [`DbError`] classifies what SQLite reported so the server can pick a
//! status code without parsing strings again. Constraint wording is kept in
//! the message; the dashboard shows it as-is.
//!
//! ```text
//!   sqlx::Error::RowNotFound               ──► NotFound
//!   "UNIQUE constraint failed: t.col"      ──► UniqueViolation { field: "t.col" }
//!   "FOREIGN KEY constraint failed"        ──► ForeignKeyViolation
//!   "CHECK constraint failed: ..."         ──► CheckViolation
//!   other database message                 ──► QueryFailed
//!   PoolTimedOut / PoolClosed              ──► PoolExhausted / ConnectionFailed
//!   anything else                          ──► Internal
//! ```

use inventory_core::CoreError;
use thiserror::Error;

const UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

#[derive(Debug, Error)]
pub enum DbError {
    /// Update/delete/get by an id with no row behind it.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Duplicate patrimony number or sign-up email.
    #[error("duplicate key value violates unique constraint on {field}")]
    UniqueViolation { field: String },

    /// An item assigned to a collaborator id that doesn't exist.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    #[error("Check constraint violation: {message}")]
    CheckViolation { message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A domain rule rejected the write, e.g. stock going negative.
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
        }
    }

    /// Sorts a database-reported message into a constraint variant.
    fn from_constraint_message(msg: &str) -> Self {
        if let Some(field) = msg.strip_prefix(UNIQUE_PREFIX) {
            return DbError::duplicate(field);
        }

        let message = msg.to_string();
        if msg.contains("FOREIGN KEY constraint failed") {
            DbError::ForeignKeyViolation { message }
        } else if msg.contains("CHECK constraint failed") {
            DbError::CheckViolation { message }
        } else {
            DbError::QueryFailed(message)
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => DbError::from_constraint_message(db_err.message()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

//! # inventory-db: Database Layer for InventoryPro
//!
//! This crate provides database access for InventoryPro.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      InventoryPro Data Flow                             │
//! │                                                                         │
//! │  HTTP handler (GET /api/items?q=lap)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   inventory-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ ItemRepo       │   │ 001 schema   │  │   │
//! │  │   │ SqlitePool    │◄───│ Collaborator…  │   │ 002 trigger  │  │   │
//! │  │   │               │    │ Profile/Ident… │   │ 003 settings │  │   │
//! │  │   │               │    │ Movement/Set…  │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir by default)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use inventory_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("inventory.db")).await?;
//! let items = db.items().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{
    CollaboratorRepository, Identity, IdentityRepository, ItemRepository, MovementRepository,
    NewIdentity, ProfileRepository, SettingsRepository,
};

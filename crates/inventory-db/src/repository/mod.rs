//! # Repository Module
//!
//! Database repository implementations for InventoryPro.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.items().list()                                       │
//! │       ▼                                                                 │
//! │  ItemRepository                                                        │
//! │  ├── list(&self)                                                       │
//! │  ├── get(&self, id)                                                    │
//! │  ├── insert(&self, draft)                                              │
//! │  ├── update(&self, id, draft)                                          │
//! │  └── delete(&self, id)                                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lists return whole tables in display order; filtering happens in memory
//! (see `inventory_core::search`).
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`] - Inventory item CRUD
//! - [`CollaboratorRepository`] - Collaborator CRUD
//! - [`ProfileRepository`] - User profiles (rows are created by trigger)
//! - [`IdentityRepository`] - Login identities and password hashes
//! - [`MovementRepository`] - Stock movements (transactional)
//! - [`SettingsRepository`] - Key-value system settings

pub mod collaborator;
pub mod identity;
pub mod item;
pub mod movement;
pub mod profile;
pub mod settings;

pub use collaborator::CollaboratorRepository;
pub use identity::{Identity, IdentityRepository, NewIdentity};
pub use item::ItemRepository;
pub use movement::MovementRepository;
pub use profile::ProfileRepository;
pub use settings::SettingsRepository;

/// Generates a new entity ID (UUID v4).
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

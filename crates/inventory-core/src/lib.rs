//! # inventory-core: Pure Business Logic for InventoryPro
//!
//! This crate is the **heart** of InventoryPro. It contains every piece of
//! behavior that has a precise meaning (search, form prefill, numeric
//! coercion, dashboard counts, settings merge, export layout) as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      InventoryPro Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser Dashboard                            │   │
//! │  │   Sign-in ──► Dashboard ──► Inventory ──► Collaborators/Users   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP / JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 inventory-server (axum)                          │   │
//! │  │    handlers, auth, settings store, storage, bootstrap           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ inventory-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌────────┐ ┌──────┐ ┌───────────┐ ┌────────────┐  │   │
//! │  │  │  types  │ │ search │ │ form │ │ dashboard │ │  settings  │  │   │
//! │  │  └─────────┘ └────────┘ └──────┘ └───────────┘ └────────────┘  │   │
//! │  │  ┌────────────┐ ┌────────┐                                      │   │
//! │  │  │ validation │ │ export │                                      │   │
//! │  │  └────────────┘ └────────┘                                      │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                inventory-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, Collaborator, Profile, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//! - [`search`] - Case-insensitive in-memory search filter
//! - [`form`] - Add/edit form state, prefill and numeric coercion
//! - [`dashboard`] - Summary counts and chart datasets
//! - [`settings`] - Key-value settings merge and theme variables
//! - [`export`] - Spreadsheet sheet layout (headers + rows)
//!
//! ## Example Usage
//!
//! ```rust
//! use inventory_core::search::filter_rows;
//! use inventory_core::Collaborator;
//!
//! let rows = vec![
//!     Collaborator::named("c1", "Ana Souza"),
//!     Collaborator::named("c2", "Bruno Lima"),
//! ];
//!
//! let hits = filter_rows(rows, "ANA");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].name, "Ana Souza");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dashboard;
pub mod error;
pub mod export;
pub mod form;
pub mod search;
pub mod settings;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use settings::{SettingKey, SystemSettings, ThemeVariables};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Email of the administrator provisioned on first run.
///
/// Publicly documented: the sign-in screen shows it once, right after the
/// account is created.
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";

/// Password of the administrator provisioned on first run.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin1";

/// Display name stored on the first-run administrator's profile.
pub const DEFAULT_ADMIN_NAME: &str = "Administrator";

/// Minimum password length accepted on sign-up and password change.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Category label used when an item has no category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

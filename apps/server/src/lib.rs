//! # InventoryPro Server
//!
//! HTTP backend for the InventoryPro dashboard: asset items, collaborators,
//! user profiles, stock movements and branding settings, all over JSON.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        InventoryPro Server                              │
//! │                                                                         │
//! │  Browser ──► axum Router ──► AuthUser ──► handlers ──► inventory-db    │
//! │                  │                            │              │          │
//! │                  │                            ▼              ▼          │
//! │                  │                     inventory-core      SQLite       │
//! │                  │                  (forms, search, etc.)               │
//! │                  │                                                      │
//! │                  ├── /storage ──► ServeDir (logo bucket)               │
//! │                  └── /theme.css ──► SettingsStore projection           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! `inventory.toml` (or the file named by `INVENTORY_CONFIG`), overridden by
//! `INVENTORY_*` environment variables. See [`config::ServerConfig`].

pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod export;
pub mod handlers;
pub mod router;
pub mod state;
pub mod storage;

pub use config::ServerConfig;
pub use router::build_router;
pub use state::AppState;

//! # Settings Store
//!
//! Process-wide cache of `system_settings`, replaced wholesale on refresh.
//!
//! ## Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Settings Store Lifecycle                             │
//! │                                                                         │
//! │  startup ──► defaults, loading = true                                  │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  refresh() ──► SELECT key, value ──► SystemSettings::from_rows          │
//! │                 │            │                                          │
//! │                 │            └─ error? keep previous snapshot, warn     │
//! │                 ▼                                                       │
//! │  RwLock<Arc<SystemSettings>> swapped ──► watch::Sender::send_replace   │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  ThemeSink::apply(theme vars) ──► GET /theme.css                       │
//! │                                                                         │
//! │  Every settings mutation writes its rows, then calls refresh().        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! Readers clone the `Arc` under a short read lock; the snapshot itself is
//! never mutated.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use inventory_core::{SystemSettings, ThemeVariables};
use inventory_db::SettingsRepository;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

/// Receives the theme variables of every new settings snapshot.
pub trait ThemeSink: Send + Sync {
    fn apply(&self, theme: &ThemeVariables);
}

/// Keeps the rendered `:root { ... }` stylesheet for `GET /theme.css`.
#[derive(Debug, Default)]
pub struct CssThemeSink {
    css: std::sync::RwLock<String>,
}

impl CssThemeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn css(&self) -> String {
        self.css
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ThemeSink for CssThemeSink {
    fn apply(&self, theme: &ThemeVariables) {
        let mut css = self
            .css
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *css = theme.to_css();
    }
}

pub struct SettingsStore {
    repo: SettingsRepository,
    current: RwLock<Arc<SystemSettings>>,
    loading: AtomicBool,
    changes: watch::Sender<Arc<SystemSettings>>,
    sink: Arc<dyn ThemeSink>,
}

impl SettingsStore {
    /// Starts from defaults with the loading flag set. Call
    /// [`SettingsStore::refresh`] to load the stored rows.
    pub fn new(repo: SettingsRepository, sink: Arc<dyn ThemeSink>) -> Self {
        let initial = Arc::new(SystemSettings::default());
        sink.apply(&initial.theme());
        let (changes, _) = watch::channel(initial.clone());

        SettingsStore {
            repo,
            current: RwLock::new(initial),
            loading: AtomicBool::new(true),
            changes,
            sink,
        }
    }

    pub async fn snapshot(&self) -> Arc<SystemSettings> {
        self.current.read().await.clone()
    }

    /// True until the first refresh completes (successfully or not).
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<SystemSettings>> {
        self.changes.subscribe()
    }

    /// Re-reads all rows and swaps in a new snapshot.
    ///
    /// A failed read keeps the previous snapshot.
    pub async fn refresh(&self) -> Arc<SystemSettings> {
        let snapshot = match self.repo.list().await {
            Ok(rows) => {
                let next = Arc::new(SystemSettings::from_rows(rows));
                self.replace(next.clone()).await;
                next
            }
            Err(e) => {
                warn!(error = %e, "Failed to load system settings, keeping previous values");
                self.snapshot().await
            }
        };

        self.loading.store(false, Ordering::Release);
        snapshot
    }

    async fn replace(&self, next: Arc<SystemSettings>) {
        let changed = {
            let mut current = self.current.write().await;
            let changed = **current != *next;
            *current = next.clone();
            changed
        };

        if changed {
            debug!(system_name = %next.system_name, "Settings snapshot replaced");
            self.sink.apply(&next.theme());
        }
        self.changes.send_replace(next);
    }
}

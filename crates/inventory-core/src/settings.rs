//! # System Settings
//!
//! Branding settings live in a key-value table. This module owns the fixed
//! key set, the defaults, the merge of stored rows over those defaults, and
//! the projection onto CSS theme variables.
//!
//! ## Merge Rules
//! ```text
//!   defaults ──┐
//!              ├──► for each stored (key, value):
//!   rows ──────┘        known key   → overwrite default
//!                       unknown key → ignored
//!                   missing keys keep their default
//! ```
//!
//! Color values are HSL triples without the `hsl()` wrapper (`"215 70% 28%"`).
//! They are not validated; whatever is stored is projected as-is.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Setting Keys
// =============================================================================

/// The recognized settings keys. Exactly one row exists per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SettingKey {
    LogoUrl,
    PrimaryColor,
    AccentColor,
    SidebarColor,
    SystemName,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::LogoUrl,
        SettingKey::PrimaryColor,
        SettingKey::AccentColor,
        SettingKey::SidebarColor,
        SettingKey::SystemName,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::LogoUrl => "logo_url",
            SettingKey::PrimaryColor => "primary_color",
            SettingKey::AccentColor => "accent_color",
            SettingKey::SidebarColor => "sidebar_color",
            SettingKey::SystemName => "system_name",
        }
    }

    /// Returns `None` for keys this build does not know.
    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

// =============================================================================
// Settings Snapshot
// =============================================================================

pub const DEFAULT_SYSTEM_NAME: &str = "InventoryPro";
pub const DEFAULT_PRIMARY_COLOR: &str = "215 70% 28%";
pub const DEFAULT_ACCENT_COLOR: &str = "160 60% 38%";
pub const DEFAULT_SIDEBAR_COLOR: &str = "215 70% 22%";

/// An immutable snapshot of all settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SystemSettings {
    pub logo_url: String,
    pub primary_color: String,
    pub accent_color: String,
    pub sidebar_color: String,
    pub system_name: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            logo_url: String::new(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            sidebar_color: DEFAULT_SIDEBAR_COLOR.to_string(),
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
        }
    }
}

impl SystemSettings {
    /// Merges stored `(key, value)` rows over the defaults.
    ///
    /// ```rust
    /// use inventory_core::SystemSettings;
    ///
    /// let rows = vec![
    ///     ("system_name".to_string(), "Acme Assets".to_string()),
    ///     ("favicon".to_string(), "ignored".to_string()),
    /// ];
    /// let settings = SystemSettings::from_rows(rows);
    /// assert_eq!(settings.system_name, "Acme Assets");
    /// assert_eq!(settings.primary_color, "215 70% 28%");
    /// ```
    pub fn from_rows<I, K, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut settings = Self::default();
        for (key, value) in rows {
            if let Some(key) = SettingKey::parse(key.as_ref()) {
                settings.set(key, value.into());
            }
        }
        settings
    }

    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::LogoUrl => &self.logo_url,
            SettingKey::PrimaryColor => &self.primary_color,
            SettingKey::AccentColor => &self.accent_color,
            SettingKey::SidebarColor => &self.sidebar_color,
            SettingKey::SystemName => &self.system_name,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: String) {
        let slot = match key {
            SettingKey::LogoUrl => &mut self.logo_url,
            SettingKey::PrimaryColor => &mut self.primary_color,
            SettingKey::AccentColor => &mut self.accent_color,
            SettingKey::SidebarColor => &mut self.sidebar_color,
            SettingKey::SystemName => &mut self.system_name,
        };
        *slot = value;
    }

    pub fn theme(&self) -> ThemeVariables {
        ThemeVariables::from_settings(self)
    }
}

// =============================================================================
// Theme Projection
// =============================================================================

/// CSS custom properties derived from a settings snapshot.
///
/// ```text
///   primary_color  ──► --primary, --ring
///   sidebar_color  ──► --sidebar-background
///   accent_color   ──► --accent, --sidebar-primary, --sidebar-ring
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ThemeVariables {
    pub vars: Vec<(String, String)>,
}

impl ThemeVariables {
    pub fn from_settings(settings: &SystemSettings) -> Self {
        let pairs = [
            ("--primary", &settings.primary_color),
            ("--ring", &settings.primary_color),
            ("--sidebar-background", &settings.sidebar_color),
            ("--accent", &settings.accent_color),
            ("--sidebar-primary", &settings.accent_color),
            ("--sidebar-ring", &settings.accent_color),
        ];
        Self {
            vars: pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Renders a `:root { ... }` block.
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.vars {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}

// =============================================================================
// Color Presets
// =============================================================================

/// A named primary/accent/sidebar combination offered on the settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorPreset {
    pub name: &'static str,
    pub primary: &'static str,
    pub accent: &'static str,
    pub sidebar: &'static str,
}

pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset {
        name: "Navy",
        primary: "215 70% 28%",
        accent: "160 60% 38%",
        sidebar: "215 70% 22%",
    },
    ColorPreset {
        name: "Royal Blue",
        primary: "220 80% 45%",
        accent: "45 90% 50%",
        sidebar: "220 75% 25%",
    },
    ColorPreset {
        name: "Forest Green",
        primary: "150 60% 30%",
        accent: "30 80% 50%",
        sidebar: "150 55% 20%",
    },
    ColorPreset {
        name: "Deep Purple",
        primary: "270 60% 35%",
        accent: "320 70% 50%",
        sidebar: "270 55% 22%",
    },
    ColorPreset {
        name: "Corporate Red",
        primary: "0 65% 40%",
        accent: "210 70% 50%",
        sidebar: "0 60% 25%",
    },
    ColorPreset {
        name: "Modern Gray",
        primary: "220 15% 35%",
        accent: "200 70% 50%",
        sidebar: "220 15% 18%",
    },
];

//! # Domain Types
//!
//! Core domain types used throughout InventoryPro.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌─────────────────┐      │
//! │  │  InventoryItem   │   │  Collaborator   │   │    Profile      │      │
//! │  │  ──────────────  │   │  ─────────────  │   │  ─────────────  │      │
//! │  │  id (UUID)       │──►│  id (UUID)      │   │  id (UUID)      │      │
//! │  │  patrimony_number│   │  name           │   │  user_id        │      │
//! │  │  quantity        │   │  email          │   │  full_name      │      │
//! │  │  minimum_stock   │   │  department     │   │  email          │      │
//! │  │  status          │   │  position       │   │  department     │      │
//! │  └──────────────────┘   └─────────────────┘   └─────────────────┘      │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌─────────────────┐      │
//! │  │   ItemStatus     │   │  StockMovement  │   │  MovementKind   │      │
//! │  │  ──────────────  │   │  ─────────────  │   │  ─────────────  │      │
//! │  │  Available       │   │  item_id (FK)   │   │  In             │      │
//! │  │  InUse           │   │  kind           │   │  Out            │      │
//! │  │  Maintenance     │   │  quantity       │   │  Adjustment     │      │
//! │  │  Decommissioned  │   │  reason         │   └─────────────────┘      │
//! │  │  Unknown(raw)    │   └─────────────────┘                            │
//! │  └──────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every item has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - `patrimony_number`: the asset tag printed on the physical item (unique)

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

// =============================================================================
// Item Status
// =============================================================================

/// Lifecycle status of an inventory item.
///
/// Stored as lowercase text. Values written by other tools that this build
/// does not recognize are kept verbatim in [`ItemStatus::Unknown`] and shown
/// as-is; they are never written back by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ItemStatus {
    #[default]
    Available,
    InUse,
    Maintenance,
    Decommissioned,
    Unknown(String),
}

impl ItemStatus {
    /// The four statuses the API accepts on write.
    pub const KNOWN: [ItemStatus; 4] = [
        ItemStatus::Available,
        ItemStatus::InUse,
        ItemStatus::Maintenance,
        ItemStatus::Decommissioned,
    ];

    /// Storage representation.
    pub fn as_str(&self) -> &str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::InUse => "in_use",
            ItemStatus::Maintenance => "maintenance",
            ItemStatus::Decommissioned => "decommissioned",
            ItemStatus::Unknown(raw) => raw,
        }
    }

    /// Human-readable label used by the dashboard chart and the export sheet.
    ///
    /// ```rust
    /// use inventory_core::ItemStatus;
    ///
    /// assert_eq!(ItemStatus::InUse.label(), "In use");
    /// assert_eq!(ItemStatus::from("lost".to_string()).label(), "lost");
    /// ```
    pub fn label(&self) -> &str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::InUse => "In use",
            ItemStatus::Maintenance => "Maintenance",
            ItemStatus::Decommissioned => "Decommissioned",
            ItemStatus::Unknown(raw) => raw,
        }
    }

    #[inline]
    pub fn is_known(&self) -> bool {
        !matches!(self, ItemStatus::Unknown(_))
    }
}

impl From<String> for ItemStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "available" => ItemStatus::Available,
            "in_use" => ItemStatus::InUse,
            "maintenance" => ItemStatus::Maintenance,
            "decommissioned" => ItemStatus::Decommissioned,
            _ => ItemStatus::Unknown(raw),
        }
    }
}

impl From<&str> for ItemStatus {
    fn from(raw: &str) -> Self {
        ItemStatus::from(raw.to_string())
    }
}

impl From<ItemStatus> for String {
    fn from(status: ItemStatus) -> Self {
        match status {
            ItemStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ItemStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ItemStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ItemStatus::from)
    }
}

// =============================================================================
// Inventory Item
// =============================================================================

/// A tracked physical asset.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Asset tag - business identifier, unique across the table.
    pub patrimony_number: String,

    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Low-stock threshold. Never negative.
    pub minimum_stock: i64,

    pub location: Option<String>,

    #[cfg_attr(feature = "sqlx", sqlx(try_from = "String"))]
    #[ts(as = "String")]
    pub status: ItemStatus,

    /// Assigned collaborator, if any.
    pub collaborator_id: Option<String>,

    /// Support ticket the item was requested or repaired under.
    pub ticket_number: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Low-stock predicate shared by the list flag and the dashboard count.
    ///
    /// An item sitting exactly at its threshold is already low.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_stock
    }
}

// =============================================================================
// Collaborator
// =============================================================================

/// A person items can be assigned to. Not a login account.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Collaborator {
    /// Builds a collaborator with only a name set.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            department: None,
            position: None,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Profile
// =============================================================================

/// The application-visible record of a login account.
///
/// Rows are created by the database when an identity is provisioned, never
/// by application code.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Profile {
    pub id: String,
    /// Identity this profile belongs to.
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Stock Movement
// =============================================================================

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Units received.
    In,
    /// Units handed out.
    Out,
    /// Signed correction after a count.
    Adjustment,
}

impl MovementKind {
    /// Signed change this movement applies to the item quantity, or `None`
    /// when an outgoing amount has no negation.
    ///
    /// ```rust
    /// use inventory_core::MovementKind;
    ///
    /// assert_eq!(MovementKind::In.delta(3), Some(3));
    /// assert_eq!(MovementKind::Out.delta(3), Some(-3));
    /// assert_eq!(MovementKind::Adjustment.delta(-2), Some(-2));
    /// assert_eq!(MovementKind::Out.delta(i64::MIN), None);
    /// ```
    pub fn delta(self, quantity: i64) -> Option<i64> {
        match self {
            MovementKind::In | MovementKind::Adjustment => Some(quantity),
            MovementKind::Out => quantity.checked_neg(),
        }
    }
}

/// A recorded change to an item's quantity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockMovement {
    pub id: String,
    pub item_id: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub reason: Option<String>,
    /// Identity that recorded the movement.
    pub user_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Session View
// =============================================================================

/// What the dashboard knows about the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionUser {
    /// Identity id (the token subject).
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: i64, minimum_stock: i64) -> InventoryItem {
        InventoryItem {
            id: "i1".to_string(),
            patrimony_number: "PAT-0001".to_string(),
            name: "Laptop".to_string(),
            description: None,
            category: None,
            quantity,
            minimum_stock,
            location: None,
            status: ItemStatus::Available,
            collaborator_id: None,
            ticket_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(item(2, 2).is_low_stock());
        assert!(item(0, 0).is_low_stock());
        assert!(!item(3, 2).is_low_stock());
    }

    #[test]
    fn test_status_parse_and_label() {
        assert_eq!(ItemStatus::from("in_use"), ItemStatus::InUse);
        assert_eq!(ItemStatus::from("decommissioned").label(), "Decommissioned");

        let odd = ItemStatus::from("on_loan");
        assert!(!odd.is_known());
        assert_eq!(odd.as_str(), "on_loan");
        assert_eq!(odd.label(), "on_loan");
        assert_eq!(String::from(odd), "on_loan");
    }

    #[test]
    fn test_status_serde_uses_storage_form() {
        let json = serde_json::to_string(&ItemStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");

        let back: ItemStatus = serde_json::from_str("\"retired\"").unwrap();
        assert_eq!(back, ItemStatus::Unknown("retired".to_string()));
    }

    #[test]
    fn test_movement_kind_serde() {
        let kind: MovementKind = serde_json::from_str("\"adjustment\"").unwrap();
        assert_eq!(kind, MovementKind::Adjustment);
        assert_eq!(serde_json::to_string(&MovementKind::Out).unwrap(), "\"out\"");
    }
}

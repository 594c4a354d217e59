//! # Dashboard Aggregation
//!
//! A pure reduction over the three collections the dashboard fetches.
//!
//! ```text
//!   items ───────────┐
//!   collaborators ───┼──► summarize() ──► DashboardSummary
//!   movements ───────┘       │
//!                            ├── totals (items / collaborators / movements)
//!                            ├── low stock (quantity <= minimum_stock)
//!                            ├── by category  (first-seen order)
//!                            └── by status    (label, first-seen order)
//! ```
//!
//! Nothing is cached: the summary is recomputed on every request.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::InventoryItem;
use crate::UNCATEGORIZED_LABEL;

/// One bar of the category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// One slice of the status chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StatusCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub total_collaborators: usize,
    pub low_stock: usize,
    pub movements: usize,
    pub by_category: Vec<CategoryCount>,
    pub by_status: Vec<StatusCount>,
}

/// Builds the dashboard summary.
///
/// ```rust
/// use inventory_core::dashboard::summarize;
///
/// let summary = summarize(&[], 3, 7);
/// assert_eq!(summary.total_items, 0);
/// assert_eq!(summary.total_collaborators, 3);
/// assert_eq!(summary.movements, 7);
/// assert!(summary.by_category.is_empty());
/// ```
pub fn summarize(
    items: &[InventoryItem],
    collaborators: usize,
    movements: usize,
) -> DashboardSummary {
    let mut by_category: Vec<CategoryCount> = Vec::new();
    let mut by_status: Vec<StatusCount> = Vec::new();

    for item in items {
        let category = item
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED_LABEL);
        match by_category.iter_mut().find(|c| c.name == category) {
            Some(entry) => entry.count += 1,
            None => by_category.push(CategoryCount {
                name: category.to_string(),
                count: 1,
            }),
        }

        let label = item.status.label();
        match by_status.iter_mut().find(|s| s.name == label) {
            Some(entry) => entry.value += 1,
            None => by_status.push(StatusCount {
                name: label.to_string(),
                value: 1,
            }),
        }
    }

    DashboardSummary {
        total_items: items.len(),
        total_collaborators: collaborators,
        low_stock: items.iter().filter(|i| i.is_low_stock()).count(),
        movements,
        by_category,
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemStatus;
    use chrono::Utc;

    fn item(category: Option<&str>, status: &str, quantity: i64, minimum: i64) -> InventoryItem {
        InventoryItem {
            id: uuid::Uuid::new_v4().to_string(),
            patrimony_number: uuid::Uuid::new_v4().to_string(),
            name: "thing".to_string(),
            description: None,
            category: category.map(str::to_string),
            quantity,
            minimum_stock: minimum,
            location: None,
            status: ItemStatus::from(status),
            collaborator_id: None,
            ticket_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_count_matches_row_flag() {
        let items = vec![
            item(None, "available", 2, 2),
            item(None, "available", 5, 1),
            item(None, "available", 0, 3),
        ];
        let summary = summarize(&items, 0, 0);
        let flagged = items.iter().filter(|i| i.is_low_stock()).count();
        assert_eq!(summary.low_stock, 2);
        assert_eq!(summary.low_stock, flagged);
    }

    #[test]
    fn test_category_groups_first_seen_order() {
        let items = vec![
            item(Some("Furniture"), "available", 1, 0),
            item(None, "available", 1, 0),
            item(Some("Electronics"), "available", 1, 0),
            item(Some(""), "available", 1, 0),
            item(Some("Furniture"), "available", 1, 0),
        ];
        let summary = summarize(&items, 0, 0);
        assert_eq!(
            summary.by_category,
            vec![
                CategoryCount { name: "Furniture".into(), count: 2 },
                CategoryCount { name: "Uncategorized".into(), count: 2 },
                CategoryCount { name: "Electronics".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_status_groups_use_labels_and_pass_unknown_through() {
        let items = vec![
            item(None, "in_use", 1, 0),
            item(None, "on_loan", 1, 0),
            item(None, "in_use", 1, 0),
            item(None, "maintenance", 1, 0),
        ];
        let summary = summarize(&items, 0, 0);
        assert_eq!(
            summary.by_status,
            vec![
                StatusCount { name: "In use".into(), value: 2 },
                StatusCount { name: "on_loan".into(), value: 1 },
                StatusCount { name: "Maintenance".into(), value: 1 },
            ]
        );
        assert_eq!(summary.total_items, 4);
    }
}

//! # Export Sheet Layout
//!
//! Describes what goes into a downloaded spreadsheet: sheet name, file name,
//! header row, and one row per visible table row, in table order. Encoding
//! the workbook is left to the server; this module only decides the cells.

use std::collections::HashMap;

use serde::Serialize;

use crate::types::{Collaborator, InventoryItem};

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        CellValue::Text(value.unwrap_or_default().to_string())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

/// One worksheet plus the file name it is downloaded under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSheet {
    pub sheet_name: String,
    pub file_name: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<CellValue>>,
}

pub const INVENTORY_HEADERS: [&str; 9] = [
    "Patrimony No.",
    "Name",
    "Category",
    "Quantity",
    "Minimum Stock",
    "Location",
    "Status",
    "Ticket No.",
    "Collaborator",
];

pub const COLLABORATOR_HEADERS: [&str; 4] = ["Name", "Email", "Department", "Position"];

/// Inventory sheet. `collaborators` is used only to resolve names; an
/// unassigned item (or a dangling reference) gets an empty cell.
pub fn inventory_sheet(items: &[InventoryItem], collaborators: &[Collaborator]) -> ExportSheet {
    let names: HashMap<&str, &str> = collaborators
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();

    let rows = items
        .iter()
        .map(|item| {
            let collaborator = item
                .collaborator_id
                .as_deref()
                .and_then(|id| names.get(id).copied());
            vec![
                CellValue::from(item.patrimony_number.as_str()),
                CellValue::from(item.name.as_str()),
                CellValue::from(item.category.as_deref()),
                CellValue::from(item.quantity),
                CellValue::from(item.minimum_stock),
                CellValue::from(item.location.as_deref()),
                CellValue::from(item.status.label()),
                CellValue::from(item.ticket_number.as_deref()),
                CellValue::from(collaborator),
            ]
        })
        .collect();

    ExportSheet {
        sheet_name: "Inventory".to_string(),
        file_name: "inventory.xlsx".to_string(),
        headers: INVENTORY_HEADERS.to_vec(),
        rows,
    }
}

pub fn collaborator_sheet(collaborators: &[Collaborator]) -> ExportSheet {
    let rows = collaborators
        .iter()
        .map(|c| {
            vec![
                CellValue::from(c.name.as_str()),
                CellValue::from(c.email.as_deref()),
                CellValue::from(c.department.as_deref()),
                CellValue::from(c.position.as_deref()),
            ]
        })
        .collect();

    ExportSheet {
        sheet_name: "Collaborators".to_string(),
        file_name: "collaborators.xlsx".to_string(),
        headers: COLLABORATOR_HEADERS.to_vec(),
        rows,
    }
}

//! # Search
//!
//! Client-side style filtering: the whole table is loaded, then narrowed in
//! memory by a case-insensitive substring match over a fixed set of fields.
//!
//! ```text
//!   rows (storage order) ──► filter_rows(rows, "lap") ──► matching rows
//!                                                         (same order)
//! ```
//!
//! The filter is a pure function of `(rows, query)`. An empty (or
//! whitespace-only) query returns the input untouched.

use crate::types::{Collaborator, InventoryItem, Profile};

/// A row type that can be matched by the search box.
pub trait Searchable {
    /// Fields the query is matched against. Missing optional fields are
    /// simply skipped.
    fn search_fields(&self) -> Vec<&str>;

    /// True when any search field contains `needle`, which must already be
    /// lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

impl Searchable for InventoryItem {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.patrimony_number.as_str()];
        fields.extend(self.category.as_deref());
        fields
    }
}

impl Searchable for Collaborator {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.department.as_deref());
        fields
    }
}

impl Searchable for Profile {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str(), self.email.as_str()];
        fields.extend(self.department.as_deref());
        fields
    }
}

/// Keeps the rows matching `query`, preserving their order.
///
/// The query is trimmed and lowercased first, so `" lap"` and `"lap"` select
/// the same rows and a blank query keeps everything.
pub fn filter_rows<T: Searchable>(rows: Vec<T>, query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows;
    }
    rows.into_iter().filter(|row| row.matches(&needle)).collect()
}

//! # Form State
//!
//! Every entity screen uses one form object for both "add" and "edit":
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Add:   ItemForm::empty()        ──┐                                   │
//! │                                    ├──► user edits ──► into_draft()    │
//! │  Edit:  ItemForm::from_item(&row) ─┘                        │          │
//! │                                                             ▼          │
//! │                                        ItemDraft (validated, typed)    │
//! │                                                             │          │
//! │                               no id tracked ──► insert      │          │
//! │                               id tracked    ──► update(id) ◄┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Form fields are plain strings (unset optionals are `""`), so a prefilled
//! edit form round-trips exactly. Conversion to a draft trims text, turns
//! `""` into `None`, and coerces the numeric fields.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Collaborator, InventoryItem, ItemStatus, MovementKind, Profile};
use crate::validation::{
    validate_email, validate_movement_quantity, validate_name, validate_password,
    validate_patrimony_number, validate_status, validate_stock_count, ValidationResult,
};

// =============================================================================
// Numeric Coercion
// =============================================================================

/// A numeric form value as it arrives from a browser input.
///
/// Inputs may post the number itself or the raw text of the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Int(value)
    }
}

impl NumericInput {
    /// Coerces to an integer.
    ///
    /// ## Rules
    /// - integers pass through
    /// - floats are accepted only when integral (`5.0`)
    /// - text is trimmed; `""` is zero, otherwise it must parse as an
    ///   integer or an integral decimal
    ///
    /// ```rust
    /// use inventory_core::form::NumericInput;
    ///
    /// assert_eq!(NumericInput::Text(" 7 ".into()).coerce("quantity").unwrap(), 7);
    /// assert_eq!(NumericInput::Text("".into()).coerce("quantity").unwrap(), 0);
    /// assert!(NumericInput::Text("seven".into()).coerce("quantity").is_err());
    /// assert!(NumericInput::Float(1.5).coerce("quantity").is_err());
    /// ```
    pub fn coerce(&self, field: &str) -> ValidationResult<i64> {
        match self {
            NumericInput::Int(value) => Ok(*value),
            NumericInput::Float(value) => integral(field, *value),
            NumericInput::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(0);
                }
                if let Ok(value) = text.parse::<i64>() {
                    return Ok(value);
                }
                match text.parse::<f64>() {
                    Ok(value) => integral(field, value),
                    Err(_) => Err(ValidationError::InvalidFormat {
                        field: field.to_string(),
                        reason: format!("'{text}' is not a number"),
                    }),
                }
            }
        }
    }
}

fn integral(field: &str, value: f64) -> ValidationResult<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > i64::MAX as f64 {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a whole number".to_string(),
        });
    }
    Ok(value as i64)
}

/// Missing or `null` counts as zero, then the count must not be negative.
fn coerce_count(field: &str, input: Option<&NumericInput>) -> ValidationResult<i64> {
    let value = match input {
        Some(input) => input.coerce(field)?,
        None => 0,
    };
    validate_stock_count(field, value)
}

/// `""` (after trimming) becomes `None`.
fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =============================================================================
// Inventory Item Form
// =============================================================================

/// Add/edit form for an inventory item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ItemForm {
    pub patrimony_number: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[ts(type = "number | string | null")]
    pub quantity: Option<NumericInput>,
    #[ts(type = "number | string | null")]
    pub minimum_stock: Option<NumericInput>,
    pub location: String,
    pub status: String,
    /// Selected collaborator id; `""` means unassigned.
    pub collaborator_id: String,
    pub ticket_number: String,
}

impl Default for ItemForm {
    fn default() -> Self {
        Self::empty()
    }
}

impl ItemForm {
    /// Defaults for the "add item" form.
    pub fn empty() -> Self {
        Self {
            patrimony_number: String::new(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            quantity: Some(NumericInput::Int(0)),
            minimum_stock: Some(NumericInput::Int(0)),
            location: String::new(),
            status: ItemStatus::Available.as_str().to_string(),
            collaborator_id: String::new(),
            ticket_number: String::new(),
        }
    }

    /// Prefills the form from an existing row. Unset optionals become `""`.
    ///
    /// A status outside the known set prefills as `available` so the form
    /// can be saved without re-choosing it.
    pub fn from_item(item: &InventoryItem) -> Self {
        let status = if item.status.is_known() {
            item.status.as_str()
        } else {
            ItemStatus::Available.as_str()
        };
        Self {
            patrimony_number: item.patrimony_number.clone(),
            name: item.name.clone(),
            description: item.description.clone().unwrap_or_default(),
            category: item.category.clone().unwrap_or_default(),
            quantity: Some(NumericInput::Int(item.quantity)),
            minimum_stock: Some(NumericInput::Int(item.minimum_stock)),
            location: item.location.clone().unwrap_or_default(),
            status: status.to_string(),
            collaborator_id: item.collaborator_id.clone().unwrap_or_default(),
            ticket_number: item.ticket_number.clone().unwrap_or_default(),
        }
    }

    /// Validates and converts the submitted form into a write payload.
    pub fn into_draft(self) -> ValidationResult<ItemDraft> {
        Ok(ItemDraft {
            patrimony_number: validate_patrimony_number(&self.patrimony_number)?,
            name: validate_name("name", &self.name)?,
            description: optional(&self.description),
            category: optional(&self.category),
            quantity: coerce_count("quantity", self.quantity.as_ref())?,
            minimum_stock: coerce_count("minimum_stock", self.minimum_stock.as_ref())?,
            location: optional(&self.location),
            status: validate_status(&self.status)?,
            collaborator_id: optional(&self.collaborator_id),
            ticket_number: optional(&self.ticket_number),
        })
    }
}

/// A validated item ready for insert or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub patrimony_number: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
    pub minimum_stock: i64,
    pub location: Option<String>,
    pub status: ItemStatus,
    pub collaborator_id: Option<String>,
    pub ticket_number: Option<String>,
}

// =============================================================================
// Collaborator Form
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct CollaboratorForm {
    pub name: String,
    pub email: String,
    pub department: String,
    pub position: String,
}

impl CollaboratorForm {
    pub fn from_collaborator(row: &Collaborator) -> Self {
        Self {
            name: row.name.clone(),
            email: row.email.clone().unwrap_or_default(),
            department: row.department.clone().unwrap_or_default(),
            position: row.position.clone().unwrap_or_default(),
        }
    }

    /// Only the name is required; email is stored as typed.
    pub fn into_draft(self) -> ValidationResult<CollaboratorDraft> {
        Ok(CollaboratorDraft {
            name: validate_name("name", &self.name)?,
            email: optional(&self.email),
            department: optional(&self.department),
            position: optional(&self.position),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollaboratorDraft {
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
}

// =============================================================================
// Account Forms
// =============================================================================

/// Sign-up, also used by the Users screen to create an account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Written to the new profile after the account exists.
    pub department: String,
}

impl SignUpForm {
    pub fn into_account(self) -> ValidationResult<NewAccount> {
        validate_password(&self.password)?;
        Ok(NewAccount {
            email: validate_email(&self.email)?,
            password: self.password,
            full_name: self.full_name.trim().to_string(),
            department: optional(&self.department),
        })
    }
}

/// A validated account request. The password is still plaintext here.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub department: Option<String>,
}

/// Password change from the settings screen.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PasswordChange {
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    /// Mismatch is reported before length.
    ///
    /// ```rust
    /// use inventory_core::form::PasswordChange;
    ///
    /// let change = PasswordChange {
    ///     new_password: "secret1".into(),
    ///     confirm_password: "secret2".into(),
    /// };
    /// assert!(change.validate().is_err());
    /// ```
    pub fn validate(&self) -> ValidationResult<&str> {
        if self.new_password != self.confirm_password {
            return Err(ValidationError::Mismatch {
                field: "password".to_string(),
            });
        }
        validate_password(&self.new_password)?;
        Ok(&self.new_password)
    }
}

/// Edit form for a user's profile (the Users screen).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct ProfileForm {
    pub full_name: String,
    pub department: String,
}

impl ProfileForm {
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            department: profile.department.clone().unwrap_or_default(),
        }
    }

    pub fn into_draft(self) -> ValidationResult<ProfileDraft> {
        Ok(ProfileDraft {
            full_name: validate_name("full_name", &self.full_name)?,
            department: optional(&self.department),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDraft {
    pub full_name: String,
    pub department: Option<String>,
}

// =============================================================================
// Stock Movement Form
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MovementForm {
    pub kind: MovementKind,
    pub quantity: Option<NumericInput>,
    #[serde(default)]
    pub reason: String,
}

impl MovementForm {
    pub fn into_draft(self) -> ValidationResult<MovementDraft> {
        let quantity = match &self.quantity {
            Some(input) => input.coerce("quantity")?,
            None => 0,
        };
        validate_movement_quantity(quantity, self.kind == MovementKind::Adjustment)?;
        Ok(MovementDraft {
            kind: self.kind,
            quantity,
            reason: optional(&self.reason),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovementDraft {
    pub kind: MovementKind,
    pub quantity: i64,
    pub reason: Option<String>,
}

impl MovementDraft {
    #[inline]
    pub fn delta(&self) -> Option<i64> {
        self.kind.delta(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn laptop() -> InventoryItem {
        InventoryItem {
            id: "i1".to_string(),
            patrimony_number: "PAT-0001".to_string(),
            name: "Laptop".to_string(),
            description: None,
            category: Some("Electronics".to_string()),
            quantity: 5,
            minimum_stock: 1,
            location: None,
            status: ItemStatus::InUse,
            collaborator_id: None,
            ticket_number: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_form_defaults() {
        let form = ItemForm::empty();
        assert_eq!(form.status, "available");
        assert_eq!(form.quantity, Some(NumericInput::Int(0)));
        assert_eq!(form.collaborator_id, "");
    }

    #[test]
    fn test_edit_prefill_is_exact() {
        let form = ItemForm::from_item(&laptop());
        assert_eq!(form.patrimony_number, "PAT-0001");
        assert_eq!(form.quantity, Some(NumericInput::Int(5)));
        assert_eq!(form.description, "");
        assert_eq!(form.location, "");
        assert_eq!(form.ticket_number, "");
        assert_eq!(form.category, "Electronics");
        assert_eq!(form.status, "in_use");
    }

    #[test]
    fn test_prefill_then_submit_is_identity() {
        let item = laptop();
        let draft = ItemForm::from_item(&item).into_draft().unwrap();
        assert_eq!(draft.patrimony_number, item.patrimony_number);
        assert_eq!(draft.quantity, 5);
        assert_eq!(draft.description, None);
        assert_eq!(draft.category.as_deref(), Some("Electronics"));
        assert_eq!(draft.status, ItemStatus::InUse);
        assert_eq!(draft.collaborator_id, None);
    }

    #[test]
    fn test_unknown_status_prefills_as_available() {
        let item = InventoryItem {
            status: ItemStatus::from("lost"),
            ..laptop()
        };
        let form = ItemForm::from_item(&item);
        assert_eq!(form.status, "available");
        assert_eq!(form.into_draft().unwrap().status, ItemStatus::Available);
    }

    #[test]
    fn test_numeric_coercion_from_json() {
        let form: ItemForm = serde_json::from_str(
            r#"{"patrimony_number":"PAT-2","name":"Mouse","quantity":"12","minimum_stock":3.0}"#,
        )
        .unwrap();
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.quantity, 12);
        assert_eq!(draft.minimum_stock, 3);
        assert_eq!(draft.status, ItemStatus::Available);
    }

    #[test]
    fn test_null_and_empty_quantity_are_zero() {
        let form: ItemForm = serde_json::from_str(
            r#"{"patrimony_number":"PAT-3","name":"Cable","quantity":null,"minimum_stock":""}"#,
        )
        .unwrap();
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.quantity, 0);
        assert_eq!(draft.minimum_stock, 0);
    }

    #[test]
    fn test_negative_and_fractional_rejected() {
        let mut form = ItemForm::from_item(&laptop());
        form.quantity = Some(NumericInput::Int(-1));
        assert!(matches!(
            form.clone().into_draft(),
            Err(ValidationError::Negative { .. })
        ));

        form.quantity = Some(NumericInput::Text("2.5".to_string()));
        assert!(matches!(
            form.into_draft(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_empty_collaborator_becomes_none() {
        let mut form = ItemForm::from_item(&laptop());
        form.collaborator_id = "  ".to_string();
        assert_eq!(form.into_draft().unwrap().collaborator_id, None);
    }

    #[test]
    fn test_password_change_rules() {
        let mismatch = PasswordChange {
            new_password: "abcdef".to_string(),
            confirm_password: "abcdeg".to_string(),
        };
        assert!(matches!(
            mismatch.validate(),
            Err(ValidationError::Mismatch { .. })
        ));

        let short = PasswordChange {
            new_password: "abc".to_string(),
            confirm_password: "abc".to_string(),
        };
        assert!(matches!(short.validate(), Err(ValidationError::TooShort { .. })));

        let ok = PasswordChange {
            new_password: "abcdef".to_string(),
            confirm_password: "abcdef".to_string(),
        };
        assert_eq!(ok.validate().unwrap(), "abcdef");
    }

    #[test]
    fn test_sign_up_form() {
        let account = SignUpForm {
            email: " ana@example.com ".to_string(),
            password: "secret1".to_string(),
            full_name: "Ana".to_string(),
            department: "".to_string(),
        }
        .into_account()
        .unwrap();
        assert_eq!(account.email, "ana@example.com");
        assert_eq!(account.department, None);
    }

    #[test]
    fn test_movement_form() {
        let form: MovementForm =
            serde_json::from_str(r#"{"kind":"out","quantity":"2","reason":"loan"}"#).unwrap();
        let draft = form.into_draft().unwrap();
        assert_eq!(draft.delta(), Some(-2));
        assert_eq!(draft.reason.as_deref(), Some("loan"));

        let zero: MovementForm = serde_json::from_str(r#"{"kind":"in","quantity":0}"#).unwrap();
        assert!(zero.into_draft().is_err());
    }
}

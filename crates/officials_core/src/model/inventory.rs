//! Inventory assigned to officials.
//!
//! # Invariants
//! - Every item belongs to exactly one official.
//! - A stored `value` may be null; sums treat it as zero.

use crate::model::official::OfficialId;
use crate::model::validation::{finish, require_text, MissingFieldsError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type InventoryItemId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub official_id: OfficialId,
    pub description: String,
    pub code: String,
    /// Monetary value in whole currency units.
    pub value: Option<i64>,
    pub assigned_at: DateTime<Utc>,
}

/// Creation input for an inventory item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInventoryItem {
    pub official_id: Option<OfficialId>,
    pub description: String,
    pub code: String,
    pub value: Option<i64>,
}

impl NewInventoryItem {
    /// Validates required fields and builds an item with a fresh id.
    pub fn into_item(self, assigned_at: DateTime<Utc>) -> Result<InventoryItem, MissingFieldsError> {
        let mut missing = Vec::new();
        if self.official_id.is_none() {
            missing.push("official_id");
        }
        require_text(&mut missing, "description", &self.description);
        require_text(&mut missing, "code", &self.code);
        if self.value.is_none() {
            missing.push("value");
        }
        finish(missing)?;

        match self.official_id {
            Some(official_id) => Ok(InventoryItem {
                id: Uuid::new_v4(),
                official_id,
                description: self.description.trim().to_string(),
                code: self.code.trim().to_string(),
                value: self.value,
                assigned_at,
            }),
            None => Err(MissingFieldsError::new(vec!["official_id"])),
        }
    }
}

/// Partial update of an inventory item. Ownership cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub description: Option<String>,
    pub code: Option<String>,
    pub value: Option<i64>,
}

impl InventoryUpdate {
    pub fn validate(&self) -> Result<(), MissingFieldsError> {
        let mut missing = Vec::new();
        if let Some(description) = &self.description {
            require_text(&mut missing, "description", description);
        }
        if let Some(code) = &self.code {
            require_text(&mut missing, "code", code);
        }
        finish(missing)
    }

    pub fn apply_to(&self, item: &mut InventoryItem) {
        if let Some(description) = &self.description {
            item.description = description.trim().to_string();
        }
        if let Some(code) = &self.code {
            item.code = code.trim().to_string();
        }
        if let Some(value) = self.value {
            item.value = Some(value);
        }
    }
}

/// Owner columns shown next to an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryOwner {
    pub id: OfficialId,
    pub full_name: String,
    pub document_id: String,
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryWithOwner {
    pub item: InventoryItem,
    pub owner: InventoryOwner,
}

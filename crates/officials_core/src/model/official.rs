//! Official domain model.
//!
//! # Responsibility
//! - Define the canonical personnel record and its employment status.
//! - Validate creation drafts and partial updates before persistence.
//!
//! # Invariants
//! - `id` is stable and never reused for another official.
//! - Required identity fields are non-blank after trim.
//! - `status` only changes through the lifecycle service, never via
//!   `OfficialUpdate`.

use crate::model::validation::{finish, require_text, MissingFieldsError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an official.
pub type OfficialId = Uuid;

/// Employment status of an official.
///
/// Any status may be set to any other; see `service::transitions` for which
/// pairs carry side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    /// Temporarily appointed.
    Provisional,
    /// Permanently appointed.
    Positioned,
    /// No longer working for the organization.
    Inactive,
    /// Under follow-up.
    FollowUp,
}

impl EmploymentStatus {
    /// Every status, in display order.
    pub const ALL: [EmploymentStatus; 4] = [
        EmploymentStatus::Provisional,
        EmploymentStatus::Positioned,
        EmploymentStatus::Inactive,
        EmploymentStatus::FollowUp,
    ];

    /// Stable storage/wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Provisional => "PROVISIONAL",
            Self::Positioned => "POSITIONED",
            Self::Inactive => "INACTIVE",
            Self::FollowUp => "FOLLOW_UP",
        }
    }

    /// Parses a stored status name. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "PROVISIONAL" => Some(Self::Provisional),
            "POSITIONED" => Some(Self::Positioned),
            "INACTIVE" => Some(Self::Inactive),
            "FOLLOW_UP" => Some(Self::FollowUp),
            _ => None,
        }
    }
}

impl Display for EmploymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted personnel record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Official {
    pub id: OfficialId,
    pub full_name: String,
    pub age: Option<u32>,
    pub document_id: String,
    pub position: String,
    pub profession: String,
    pub procedure: String,
    pub status: EmploymentStatus,
    /// Calendar date the official joined. Anchor for every scheduled event.
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated creation input.
///
/// `status` and `entry_date` are optional so a missing value can be reported
/// by name instead of being defaulted silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialDraft {
    pub full_name: String,
    pub age: Option<u32>,
    pub document_id: String,
    pub position: String,
    pub profession: String,
    pub procedure: String,
    pub status: Option<EmploymentStatus>,
    pub entry_date: Option<NaiveDate>,
}

impl OfficialDraft {
    /// Validates required fields and builds a record with a fresh id.
    ///
    /// # Errors
    /// - Returns `MissingFieldsError` naming every blank or absent required
    ///   field, in declaration order.
    pub fn into_official(self, created_at: DateTime<Utc>) -> Result<Official, MissingFieldsError> {
        let mut missing = Vec::new();
        require_text(&mut missing, "full_name", &self.full_name);
        require_text(&mut missing, "document_id", &self.document_id);
        require_text(&mut missing, "position", &self.position);
        require_text(&mut missing, "procedure", &self.procedure);
        if self.entry_date.is_none() {
            missing.push("entry_date");
        }
        if self.status.is_none() {
            missing.push("status");
        }

        match (self.status, self.entry_date) {
            (Some(status), Some(entry_date)) if missing.is_empty() => Ok(Official {
                id: Uuid::new_v4(),
                full_name: self.full_name.trim().to_string(),
                age: self.age,
                document_id: self.document_id.trim().to_string(),
                position: self.position.trim().to_string(),
                profession: self.profession.trim().to_string(),
                procedure: self.procedure.trim().to_string(),
                status,
                entry_date,
                created_at,
            }),
            _ => Err(MissingFieldsError::new(missing)),
        }
    }
}

/// Partial update of identity fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialUpdate {
    pub full_name: Option<String>,
    pub age: Option<Option<u32>>,
    pub document_id: Option<String>,
    pub position: Option<String>,
    pub profession: Option<String>,
    pub procedure: Option<String>,
    pub entry_date: Option<NaiveDate>,
}

impl OfficialUpdate {
    /// Returns whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.age.is_none()
            && self.document_id.is_none()
            && self.position.is_none()
            && self.profession.is_none()
            && self.procedure.is_none()
            && self.entry_date.is_none()
    }

    /// Rejects updates that would blank a required field.
    pub fn validate(&self) -> Result<(), MissingFieldsError> {
        let mut missing = Vec::new();
        let required = [
            ("full_name", &self.full_name),
            ("document_id", &self.document_id),
            ("position", &self.position),
            ("procedure", &self.procedure),
        ];
        for (field, value) in required {
            if let Some(value) = value {
                require_text(&mut missing, field, value);
            }
        }
        finish(missing)
    }

    /// Applies the update onto a loaded record.
    pub fn apply_to(&self, official: &mut Official) {
        if let Some(value) = &self.full_name {
            official.full_name = value.trim().to_string();
        }
        if let Some(value) = self.age {
            official.age = value;
        }
        if let Some(value) = &self.document_id {
            official.document_id = value.trim().to_string();
        }
        if let Some(value) = &self.position {
            official.position = value.trim().to_string();
        }
        if let Some(value) = &self.profession {
            official.profession = value.trim().to_string();
        }
        if let Some(value) = &self.procedure {
            official.procedure = value.trim().to_string();
        }
        if let Some(value) = self.entry_date {
            official.entry_date = value;
        }
    }
}

/// Filter options for listing officials.
#[derive(Debug, Clone, Default)]
pub struct OfficialListQuery {
    /// Case-insensitive match against name, document id, or position.
    pub search: Option<String>,
    pub status: Option<EmploymentStatus>,
    pub procedure: Option<String>,
}

impl OfficialListQuery {
    /// Returns whether `official` passes every configured filter.
    pub fn matches(&self, official: &Official) -> bool {
        if let Some(status) = self.status {
            if official.status != status {
                return false;
            }
        }
        if let Some(procedure) = &self.procedure {
            if official.procedure != *procedure {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                official.full_name.to_lowercase().contains(&term)
                    || official.document_id.to_lowercase().contains(&term)
                    || official.position.to_lowercase().contains(&term)
            }
        }
    }
}

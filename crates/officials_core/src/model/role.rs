//! Systems catalog and official role grants.

use crate::model::official::OfficialId;
use crate::model::validation::{finish, require_text, MissingFieldsError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type SystemId = Uuid;
pub type RoleId = Uuid;

/// Named system that roles grant access to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub id: SystemId,
    pub name: String,
    pub description: String,
}

impl SystemInfo {
    /// Builds a catalog entry with a fresh id.
    ///
    /// # Errors
    /// - Returns `MissingFieldsError` when `name` is blank.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, MissingFieldsError> {
        let name = name.into();
        let mut missing = Vec::new();
        require_text(&mut missing, "name", &name);
        finish(missing)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            description: description.into().trim().to_string(),
        })
    }
}

/// Access role of an official on one system.
///
/// `system` is resolved by join on read; it is not stored on the role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialRole {
    pub id: RoleId,
    pub official_id: OfficialId,
    pub system_id: SystemId,
    pub system: SystemInfo,
    pub granted_at: DateTime<Utc>,
}

/// Role row as written. The joined `SystemInfo` is only available on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGrant {
    pub id: RoleId,
    pub official_id: OfficialId,
    pub system_id: SystemId,
    pub granted_at: DateTime<Utc>,
}

impl RoleGrant {
    pub fn new(official_id: OfficialId, system_id: SystemId, granted_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            official_id,
            system_id,
            granted_at,
        }
    }
}

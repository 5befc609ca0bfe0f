//! Role grants and inventory assignment.
//!
//! # Responsibility
//! - Grant and revoke system roles for officials.
//! - Add, update, and remove inventory items held by officials.
//!
//! # Invariants
//! - A grant or item is only written for an official that exists.
//! - Item ownership is fixed at creation.

use crate::model::inventory::{
    InventoryItem, InventoryItemId, InventoryUpdate, InventoryWithOwner, NewInventoryItem,
};
use crate::model::official::OfficialId;
use crate::model::role::{OfficialRole, RoleGrant, RoleId, SystemId};
use crate::model::validation::MissingFieldsError;
use crate::repo::{Collection, RecordStore, RepoError};
use chrono::Utc;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
pub enum AssignmentError {
    Validation(MissingFieldsError),
    /// The referenced record does not exist.
    NotFound { collection: Collection, id: Uuid },
    Store(RepoError),
}

impl Display for AssignmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AssignmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RepoError> for AssignmentError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { collection, id } => Self::NotFound { collection, id },
            other => Self::Store(other),
        }
    }
}

impl From<MissingFieldsError> for AssignmentError {
    fn from(value: MissingFieldsError) -> Self {
        Self::Validation(value)
    }
}

pub struct AssignmentService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> AssignmentService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Grants `official_id` a role on `system_id`, stamped with the current
    /// time.
    pub async fn grant_role(
        &self,
        official_id: OfficialId,
        system_id: SystemId,
    ) -> Result<OfficialRole, AssignmentError> {
        self.ensure_official(official_id).await?;
        if self.store.get_system(system_id).await?.is_none() {
            return Err(AssignmentError::NotFound {
                collection: Collection::Systems,
                id: system_id,
            });
        }

        let grant = RoleGrant::new(official_id, system_id, Utc::now());
        let role_id = self.store.insert_role(&grant).await?;
        let role = self
            .store
            .get_role(role_id)
            .await?
            .ok_or(AssignmentError::NotFound {
                collection: Collection::OfficialRoles,
                id: role_id,
            })?;
        info!(
            "event=role_grant module=assignment status=ok official_id={official_id} system_id={system_id} role_id={role_id}"
        );
        Ok(role)
    }

    pub async fn revoke_role(&self, role_id: RoleId) -> Result<(), AssignmentError> {
        self.store.delete_role(role_id).await?;
        info!("event=role_revoke module=assignment status=ok role_id={role_id}");
        Ok(())
    }

    pub async fn list_roles(
        &self,
        official_id: Option<OfficialId>,
    ) -> Result<Vec<OfficialRole>, AssignmentError> {
        Ok(self.store.list_roles(official_id).await?)
    }

    /// Validates and stores a new item for an existing official.
    pub async fn add_inventory_item(
        &self,
        input: NewInventoryItem,
    ) -> Result<InventoryItem, AssignmentError> {
        let item = input.into_item(Utc::now())?;
        self.ensure_official(item.official_id).await?;
        let item_id = self.store.insert_inventory_item(&item).await?;
        let stored = self
            .store
            .get_inventory_item(item_id)
            .await?
            .ok_or(AssignmentError::NotFound {
                collection: Collection::Inventory,
                id: item_id,
            })?;
        info!(
            "event=inventory_add module=assignment status=ok official_id={} item_id={item_id}",
            stored.official_id
        );
        Ok(stored)
    }

    pub async fn update_inventory_item(
        &self,
        item_id: InventoryItemId,
        update: &InventoryUpdate,
    ) -> Result<InventoryItem, AssignmentError> {
        update.validate()?;
        let mut item = self
            .store
            .get_inventory_item(item_id)
            .await?
            .ok_or(AssignmentError::NotFound {
                collection: Collection::Inventory,
                id: item_id,
            })?;
        update.apply_to(&mut item);
        self.store.update_inventory_item(&item).await?;
        info!("event=inventory_update module=assignment status=ok item_id={item_id}");
        Ok(item)
    }

    pub async fn remove_inventory_item(
        &self,
        item_id: InventoryItemId,
    ) -> Result<(), AssignmentError> {
        self.store.delete_inventory_item(item_id).await?;
        info!("event=inventory_remove module=assignment status=ok item_id={item_id}");
        Ok(())
    }

    /// Items newest first, optionally for one official.
    pub async fn list_inventory(
        &self,
        official_id: Option<OfficialId>,
    ) -> Result<Vec<InventoryItem>, AssignmentError> {
        Ok(self.store.list_inventory(official_id).await?)
    }

    pub async fn list_inventory_with_owner(
        &self,
    ) -> Result<Vec<InventoryWithOwner>, AssignmentError> {
        Ok(self.store.list_inventory_with_owner().await?)
    }

    async fn ensure_official(&self, official_id: OfficialId) -> Result<(), AssignmentError> {
        if self.store.official_exists(official_id).await? {
            Ok(())
        } else {
            Err(AssignmentError::NotFound {
                collection: Collection::Officials,
                id: official_id,
            })
        }
    }
}

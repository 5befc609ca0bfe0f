//! Systems catalog service.

use crate::model::role::{SystemId, SystemInfo};
use crate::model::validation::{finish, require_text, MissingFieldsError};
use crate::repo::{Collection, RecordStore, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug)]
pub enum SystemServiceError {
    Validation(MissingFieldsError),
    NotFound(SystemId),
    /// Includes deleting a system that still has role grants.
    Store(RepoError),
}

impl Display for SystemServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "system not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SystemServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<RepoError> for SystemServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                collection: Collection::Systems,
                id,
            } => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<MissingFieldsError> for SystemServiceError {
    fn from(value: MissingFieldsError) -> Self {
        Self::Validation(value)
    }
}

pub struct SystemService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> SystemService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn create_system(
        &self,
        name: &str,
        description: &str,
    ) -> Result<SystemInfo, SystemServiceError> {
        let system = SystemInfo::new(name, description)?;
        self.store.insert_system(&system).await?;
        info!("event=system_create module=systems status=ok system_id={}", system.id);
        Ok(system)
    }

    /// Replaces name and description. `name` must not be blank.
    pub async fn update_system(
        &self,
        id: SystemId,
        name: &str,
        description: &str,
    ) -> Result<SystemInfo, SystemServiceError> {
        let mut missing = Vec::new();
        require_text(&mut missing, "name", name);
        finish(missing)?;

        let system = SystemInfo {
            id,
            name: name.trim().to_string(),
            description: description.trim().to_string(),
        };
        self.store.update_system(&system).await?;
        info!("event=system_update module=systems status=ok system_id={id}");
        Ok(system)
    }

    pub async fn delete_system(&self, id: SystemId) -> Result<(), SystemServiceError> {
        self.store.delete_system(id).await?;
        info!("event=system_delete module=systems status=ok system_id={id}");
        Ok(())
    }

    pub async fn get_system(&self, id: SystemId) -> Result<SystemInfo, SystemServiceError> {
        self.store
            .get_system(id)
            .await?
            .ok_or(SystemServiceError::NotFound(id))
    }

    /// Systems ordered by name.
    pub async fn list_systems(&self) -> Result<Vec<SystemInfo>, SystemServiceError> {
        Ok(self.store.list_systems().await?)
    }
}

//! Record store error model.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RepoResult<T> = Result<T, RepoError>;

/// Addressable collections of the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Officials,
    OfficialRoles,
    Inventory,
    OfficialEvents,
    Systems,
}

impl Collection {
    /// Table name backing the collection.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Officials => "officials",
            Self::OfficialRoles => "official_roles",
            Self::Inventory => "inventory",
            Self::OfficialEvents => "official_events",
            Self::Systems => "systems",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic store error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying storage failure; keeps the backend's own cause.
    Db(DbError),
    NotFound { collection: Collection, id: Uuid },
    InvalidData(String),
}

impl RepoError {
    pub fn not_found(collection: Collection, id: Uuid) -> Self {
        Self::NotFound { collection, id }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

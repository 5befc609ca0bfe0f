//! Systems catalog repository.

use crate::model::role::{SystemId, SystemInfo};
use crate::repo::error::{Collection, RepoError, RepoResult};
use crate::repo::sqlite::{uuid_from_db, SqliteRecordStore};
use async_trait::async_trait;
use rusqlite::{params, Row};

#[async_trait]
pub trait SystemRepository: Send + Sync {
    async fn insert_system(&self, system: &SystemInfo) -> RepoResult<SystemId>;
    async fn get_system(&self, id: SystemId) -> RepoResult<Option<SystemInfo>>;
    /// Lists systems ordered by name.
    async fn list_systems(&self) -> RepoResult<Vec<SystemInfo>>;
    async fn update_system(&self, system: &SystemInfo) -> RepoResult<()>;
    async fn delete_system(&self, id: SystemId) -> RepoResult<()>;
}

#[async_trait]
impl SystemRepository for SqliteRecordStore {
    async fn insert_system(&self, system: &SystemInfo) -> RepoResult<SystemId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO systems (id, name, description) VALUES (?1, ?2, ?3);",
                params![
                    system.id.to_string(),
                    system.name.as_str(),
                    system.description.as_str()
                ],
            )?;
            Ok(system.id)
        })
    }

    async fn get_system(&self, id: SystemId) -> RepoResult<Option<SystemInfo>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, description FROM systems WHERE id = ?1;")?;
            let mut rows = stmt.query([id.to_string()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_system_row(row)?));
            }
            Ok(None)
        })
    }

    async fn list_systems(&self) -> RepoResult<Vec<SystemInfo>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, description FROM systems ORDER BY name ASC, id ASC;")?;
            let mut rows = stmt.query([])?;
            let mut systems = Vec::new();
            while let Some(row) = rows.next()? {
                systems.push(parse_system_row(row)?);
            }
            Ok(systems)
        })
    }

    async fn update_system(&self, system: &SystemInfo) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE systems SET name = ?1, description = ?2 WHERE id = ?3;",
                params![
                    system.name.as_str(),
                    system.description.as_str(),
                    system.id.to_string()
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Systems, system.id));
            }
            Ok(())
        })
    }

    async fn delete_system(&self, id: SystemId) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM systems WHERE id = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Systems, id));
            }
            Ok(())
        })
    }
}

fn parse_system_row(row: &Row<'_>) -> RepoResult<SystemInfo> {
    let id_text: String = row.get("id")?;
    Ok(SystemInfo {
        id: uuid_from_db(&id_text, "systems.id")?,
        name: row.get("name")?,
        description: row.get("description")?,
    })
}

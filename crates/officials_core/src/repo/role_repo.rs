//! Role grants (`official_roles`) repository.
//!
//! Reads always resolve the referenced system, so callers never see a role
//! without its `SystemInfo`.

use crate::model::official::OfficialId;
use crate::model::role::{OfficialRole, RoleGrant, RoleId, SystemInfo};
use crate::repo::error::{Collection, RepoError, RepoResult};
use crate::repo::sqlite::{
    count_from_db, timestamp_from_db, timestamp_to_db, uuid_from_db, SqliteRecordStore,
};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const ROLE_SELECT_SQL: &str = "SELECT
    r.id,
    r.official_id,
    r.system_id,
    r.granted_at,
    s.name AS system_name,
    s.description AS system_description
FROM official_roles r
JOIN systems s ON s.id = r.system_id";

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn insert_role(&self, grant: &RoleGrant) -> RepoResult<RoleId>;
    async fn get_role(&self, id: RoleId) -> RepoResult<Option<OfficialRole>>;
    /// Lists roles joined with their system, optionally for one official.
    async fn list_roles(&self, official_id: Option<OfficialId>) -> RepoResult<Vec<OfficialRole>>;
    async fn delete_role(&self, id: RoleId) -> RepoResult<()>;
    /// Removes every role of `official_id` and returns how many were removed.
    async fn delete_roles_for(&self, official_id: OfficialId) -> RepoResult<u64>;
    async fn count_roles(&self) -> RepoResult<u64>;
}

#[async_trait]
impl RoleRepository for SqliteRecordStore {
    async fn insert_role(&self, grant: &RoleGrant) -> RepoResult<RoleId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO official_roles (id, official_id, system_id, granted_at)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    grant.id.to_string(),
                    grant.official_id.to_string(),
                    grant.system_id.to_string(),
                    timestamp_to_db(grant.granted_at),
                ],
            )?;
            Ok(grant.id)
        })
    }

    async fn get_role(&self, id: RoleId) -> RepoResult<Option<OfficialRole>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{ROLE_SELECT_SQL} WHERE r.id = ?1;"))?;
            let mut rows = stmt.query([id.to_string()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_role_row(row)?));
            }
            Ok(None)
        })
    }

    async fn list_roles(&self, official_id: Option<OfficialId>) -> RepoResult<Vec<OfficialRole>> {
        self.with_conn(|conn| {
            let mut sql = ROLE_SELECT_SQL.to_string();
            let mut bind_values: Vec<Value> = Vec::new();
            if let Some(official_id) = official_id {
                sql.push_str(" WHERE r.official_id = ?");
                bind_values.push(Value::Text(official_id.to_string()));
            }
            sql.push_str(" ORDER BY r.granted_at ASC, r.id ASC");

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut roles = Vec::new();
            while let Some(row) = rows.next()? {
                roles.push(parse_role_row(row)?);
            }
            Ok(roles)
        })
    }

    async fn delete_role(&self, id: RoleId) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed =
                conn.execute("DELETE FROM official_roles WHERE id = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::OfficialRoles, id));
            }
            Ok(())
        })
    }

    async fn delete_roles_for(&self, official_id: OfficialId) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM official_roles WHERE official_id = ?1;",
                [official_id.to_string()],
            )?;
            Ok(removed as u64)
        })
    }

    async fn count_roles(&self) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM official_roles;", [], |row| row.get(0))?;
            Ok(count_from_db(count))
        })
    }
}

fn parse_role_row(row: &Row<'_>) -> RepoResult<OfficialRole> {
    let id_text: String = row.get("id")?;
    let official_text: String = row.get("official_id")?;
    let system_text: String = row.get("system_id")?;
    let system_id = uuid_from_db(&system_text, "official_roles.system_id")?;

    Ok(OfficialRole {
        id: uuid_from_db(&id_text, "official_roles.id")?,
        official_id: uuid_from_db(&official_text, "official_roles.official_id")?,
        system_id,
        system: SystemInfo {
            id: system_id,
            name: row.get("system_name")?,
            description: row.get("system_description")?,
        },
        granted_at: timestamp_from_db(row.get("granted_at")?, "official_roles.granted_at")?,
    })
}

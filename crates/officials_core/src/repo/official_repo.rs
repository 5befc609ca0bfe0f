//! Official repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `officials` collection.
//! - Expose the raw count/status reads used by dashboard metrics.
//!
//! # Invariants
//! - `update_official` never writes `status`; status has its own write path.
//! - Read paths reject unknown persisted statuses, except
//!   `list_official_statuses`, which returns raw values for the caller to
//!   bucket.

use crate::model::official::{EmploymentStatus, Official, OfficialId};
use crate::repo::error::{Collection, RepoError, RepoResult};
use crate::repo::sqlite::{
    count_from_db, date_from_db, date_to_db, timestamp_from_db, timestamp_to_db, uuid_from_db,
    SqliteRecordStore,
};
use async_trait::async_trait;
use rusqlite::{params, Row};

const OFFICIAL_SELECT_SQL: &str = "SELECT
    id,
    full_name,
    age,
    document_id,
    position,
    profession,
    procedure,
    status,
    entry_date,
    created_at
FROM officials";

#[async_trait]
pub trait OfficialRepository: Send + Sync {
    async fn insert_official(&self, official: &Official) -> RepoResult<OfficialId>;
    async fn get_official(&self, id: OfficialId) -> RepoResult<Option<Official>>;
    async fn official_exists(&self, id: OfficialId) -> RepoResult<bool>;
    /// Lists every official ordered by full name.
    async fn list_officials(&self) -> RepoResult<Vec<Official>>;
    /// Rewrites identity fields. Returns `NotFound` when no row matches.
    async fn update_official(&self, official: &Official) -> RepoResult<()>;
    async fn update_official_status(
        &self,
        id: OfficialId,
        status: EmploymentStatus,
    ) -> RepoResult<()>;
    async fn delete_official(&self, id: OfficialId) -> RepoResult<()>;
    async fn count_officials(&self) -> RepoResult<u64>;
    /// Raw stored status values, one per official.
    async fn list_official_statuses(&self) -> RepoResult<Vec<String>>;
}

#[async_trait]
impl OfficialRepository for SqliteRecordStore {
    async fn insert_official(&self, official: &Official) -> RepoResult<OfficialId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO officials (
                    id,
                    full_name,
                    age,
                    document_id,
                    position,
                    profession,
                    procedure,
                    status,
                    entry_date,
                    created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
                params![
                    official.id.to_string(),
                    official.full_name.as_str(),
                    official.age,
                    official.document_id.as_str(),
                    official.position.as_str(),
                    official.profession.as_str(),
                    official.procedure.as_str(),
                    official.status.as_str(),
                    date_to_db(official.entry_date),
                    timestamp_to_db(official.created_at),
                ],
            )?;
            Ok(official.id)
        })
    }

    async fn get_official(&self, id: OfficialId) -> RepoResult<Option<Official>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{OFFICIAL_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id.to_string()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_official_row(row)?));
            }
            Ok(None)
        })
    }

    async fn official_exists(&self, id: OfficialId) -> RepoResult<bool> {
        self.with_conn(|conn| {
            let exists: i64 = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM officials WHERE id = ?1);",
                [id.to_string()],
                |row| row.get(0),
            )?;
            Ok(exists == 1)
        })
    }

    async fn list_officials(&self) -> RepoResult<Vec<Official>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{OFFICIAL_SELECT_SQL} ORDER BY full_name ASC, id ASC;"
            ))?;
            let mut rows = stmt.query([])?;
            let mut officials = Vec::new();
            while let Some(row) = rows.next()? {
                officials.push(parse_official_row(row)?);
            }
            Ok(officials)
        })
    }

    async fn update_official(&self, official: &Official) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE officials
                 SET
                    full_name = ?1,
                    age = ?2,
                    document_id = ?3,
                    position = ?4,
                    profession = ?5,
                    procedure = ?6,
                    entry_date = ?7
                 WHERE id = ?8;",
                params![
                    official.full_name.as_str(),
                    official.age,
                    official.document_id.as_str(),
                    official.position.as_str(),
                    official.profession.as_str(),
                    official.procedure.as_str(),
                    date_to_db(official.entry_date),
                    official.id.to_string(),
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Officials, official.id));
            }
            Ok(())
        })
    }

    async fn update_official_status(
        &self,
        id: OfficialId,
        status: EmploymentStatus,
    ) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE officials SET status = ?1 WHERE id = ?2;",
                params![status.as_str(), id.to_string()],
            )?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Officials, id));
            }
            Ok(())
        })
    }

    async fn delete_official(&self, id: OfficialId) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM officials WHERE id = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Officials, id));
            }
            Ok(())
        })
    }

    async fn count_officials(&self) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM officials;", [], |row| row.get(0))?;
            Ok(count_from_db(count))
        })
    }

    async fn list_official_statuses(&self) -> RepoResult<Vec<String>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT status FROM officials;")?;
            let statuses = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(statuses)
        })
    }
}

fn parse_official_row(row: &Row<'_>) -> RepoResult<Official> {
    let id_text: String = row.get("id")?;
    let status_text: String = row.get("status")?;
    let status = EmploymentStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in officials.status"
        ))
    })?;
    let entry_date_text: String = row.get("entry_date")?;

    Ok(Official {
        id: uuid_from_db(&id_text, "officials.id")?,
        full_name: row.get("full_name")?,
        age: row.get("age")?,
        document_id: row.get("document_id")?,
        position: row.get("position")?,
        profession: row.get("profession")?,
        procedure: row.get("procedure")?,
        status,
        entry_date: date_from_db(&entry_date_text, "officials.entry_date")?,
        created_at: timestamp_from_db(row.get("created_at")?, "officials.created_at")?,
    })
}

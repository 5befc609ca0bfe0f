//! Inventory repository contract and SQLite implementation.

use crate::model::inventory::{InventoryItem, InventoryItemId, InventoryOwner, InventoryWithOwner};
use crate::model::official::OfficialId;
use crate::repo::error::{Collection, RepoError, RepoResult};
use crate::repo::sqlite::{timestamp_from_db, timestamp_to_db, uuid_from_db, SqliteRecordStore};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const INVENTORY_SELECT_SQL: &str = "SELECT
    i.id,
    i.official_id,
    i.description,
    i.code,
    i.value,
    i.assigned_at
FROM inventory i";

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn insert_inventory_item(&self, item: &InventoryItem) -> RepoResult<InventoryItemId>;
    async fn get_inventory_item(&self, id: InventoryItemId) -> RepoResult<Option<InventoryItem>>;
    /// Rewrites description, code, and value. Ownership is immutable.
    async fn update_inventory_item(&self, item: &InventoryItem) -> RepoResult<()>;
    async fn delete_inventory_item(&self, id: InventoryItemId) -> RepoResult<()>;
    /// Removes every item of `official_id` and returns how many were removed.
    async fn delete_inventory_for(&self, official_id: OfficialId) -> RepoResult<u64>;
    /// Lists items newest first, optionally for one official.
    async fn list_inventory(&self, official_id: Option<OfficialId>)
        -> RepoResult<Vec<InventoryItem>>;
    /// Lists every item joined with its owner, newest first.
    async fn list_inventory_with_owner(&self) -> RepoResult<Vec<InventoryWithOwner>>;
    /// Raw stored values, null included.
    async fn list_inventory_values(&self) -> RepoResult<Vec<Option<i64>>>;
}

#[async_trait]
impl InventoryRepository for SqliteRecordStore {
    async fn insert_inventory_item(&self, item: &InventoryItem) -> RepoResult<InventoryItemId> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inventory (id, official_id, description, code, value, assigned_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    item.id.to_string(),
                    item.official_id.to_string(),
                    item.description.as_str(),
                    item.code.as_str(),
                    item.value,
                    timestamp_to_db(item.assigned_at),
                ],
            )?;
            Ok(item.id)
        })
    }

    async fn get_inventory_item(&self, id: InventoryItemId) -> RepoResult<Option<InventoryItem>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{INVENTORY_SELECT_SQL} WHERE i.id = ?1;"))?;
            let mut rows = stmt.query([id.to_string()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_item_row(row)?));
            }
            Ok(None)
        })
    }

    async fn update_inventory_item(&self, item: &InventoryItem) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE inventory
                 SET description = ?1, code = ?2, value = ?3
                 WHERE id = ?4;",
                params![
                    item.description.as_str(),
                    item.code.as_str(),
                    item.value,
                    item.id.to_string(),
                ],
            )?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Inventory, item.id));
            }
            Ok(())
        })
    }

    async fn delete_inventory_item(&self, id: InventoryItemId) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute("DELETE FROM inventory WHERE id = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::Inventory, id));
            }
            Ok(())
        })
    }

    async fn delete_inventory_for(&self, official_id: OfficialId) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM inventory WHERE official_id = ?1;",
                [official_id.to_string()],
            )?;
            Ok(removed as u64)
        })
    }

    async fn list_inventory(
        &self,
        official_id: Option<OfficialId>,
    ) -> RepoResult<Vec<InventoryItem>> {
        self.with_conn(|conn| {
            let mut sql = INVENTORY_SELECT_SQL.to_string();
            let mut bind_values: Vec<Value> = Vec::new();
            if let Some(official_id) = official_id {
                sql.push_str(" WHERE i.official_id = ?");
                bind_values.push(Value::Text(official_id.to_string()));
            }
            sql.push_str(" ORDER BY i.assigned_at DESC, i.id ASC");

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                items.push(parse_item_row(row)?);
            }
            Ok(items)
        })
    }

    async fn list_inventory_with_owner(&self) -> RepoResult<Vec<InventoryWithOwner>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT
                    i.id,
                    i.official_id,
                    i.description,
                    i.code,
                    i.value,
                    i.assigned_at,
                    o.full_name AS owner_full_name,
                    o.document_id AS owner_document_id,
                    o.position AS owner_position
                 FROM inventory i
                 JOIN officials o ON o.id = i.official_id
                 ORDER BY i.assigned_at DESC, i.id ASC;",
            )?;
            let mut rows = stmt.query([])?;
            let mut items = Vec::new();
            while let Some(row) = rows.next()? {
                let item = parse_item_row(row)?;
                let owner = InventoryOwner {
                    id: item.official_id,
                    full_name: row.get("owner_full_name")?,
                    document_id: row.get("owner_document_id")?,
                    position: row.get("owner_position")?,
                };
                items.push(InventoryWithOwner { item, owner });
            }
            Ok(items)
        })
    }

    async fn list_inventory_values(&self) -> RepoResult<Vec<Option<i64>>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT value FROM inventory;")?;
            let values = stmt
                .query_map([], |row| row.get::<_, Option<i64>>(0))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(values)
        })
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<InventoryItem> {
    let id_text: String = row.get("id")?;
    let official_text: String = row.get("official_id")?;

    Ok(InventoryItem {
        id: uuid_from_db(&id_text, "inventory.id")?,
        official_id: uuid_from_db(&official_text, "inventory.official_id")?,
        description: row.get("description")?,
        code: row.get("code")?,
        value: row.get("value")?,
        assigned_at: timestamp_from_db(row.get("assigned_at")?, "inventory.assigned_at")?,
    })
}

//! Official events repository contract and SQLite implementation.
//!
//! # Invariants
//! - `insert_events` is all-or-nothing for one batch.
//! - Pending-window counts use strict bounds on both ends.

use crate::model::event::{EventId, EventOrigin, EventType, OfficialEvent};
use crate::model::official::OfficialId;
use crate::repo::error::{Collection, RepoError, RepoResult};
use crate::repo::sqlite::{
    bool_to_int, count_from_db, int_to_bool, optional_timestamp_from_db, timestamp_from_db,
    timestamp_to_db, uuid_from_db, SqliteRecordStore,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    official_id,
    event_type,
    scheduled_at,
    completed,
    completed_at,
    notes,
    origin,
    created_at
FROM official_events";

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn insert_events(&self, events: &[OfficialEvent]) -> RepoResult<()>;
    async fn get_event(&self, id: EventId) -> RepoResult<Option<OfficialEvent>>;
    /// Lists events by ascending scheduled date, optionally for one official.
    async fn list_events(&self, official_id: Option<OfficialId>)
        -> RepoResult<Vec<OfficialEvent>>;
    /// Marks an event completed. A repeated call keeps the first
    /// `completed_at`; `notes` replaces existing notes only when given.
    async fn complete_event(
        &self,
        id: EventId,
        completed_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> RepoResult<()>;
    /// Removes every event of `official_id` and returns how many were removed.
    async fn delete_events_for(&self, official_id: OfficialId) -> RepoResult<u64>;
    /// Counts incomplete events with `after < scheduled_date < before`.
    async fn count_pending_events_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> RepoResult<u64>;
}

#[async_trait]
impl EventRepository for SqliteRecordStore {
    async fn insert_events(&self, events: &[OfficialEvent]) -> RepoResult<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            for event in events {
                tx.execute(
                    "INSERT INTO official_events (
                        id,
                        official_id,
                        event_type,
                        scheduled_at,
                        completed,
                        completed_at,
                        notes,
                        origin,
                        created_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                    params![
                        event.id.to_string(),
                        event.official_id.to_string(),
                        event.event_type.as_str(),
                        timestamp_to_db(event.scheduled_date),
                        bool_to_int(event.completed),
                        event.completed_at.map(timestamp_to_db),
                        event.notes.as_deref(),
                        event.origin.key(),
                        timestamp_to_db(event.created_at),
                    ],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    async fn get_event(&self, id: EventId) -> RepoResult<Option<OfficialEvent>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id.to_string()])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_event_row(row)?));
            }
            Ok(None)
        })
    }

    async fn list_events(
        &self,
        official_id: Option<OfficialId>,
    ) -> RepoResult<Vec<OfficialEvent>> {
        self.with_conn(|conn| {
            let mut sql = EVENT_SELECT_SQL.to_string();
            let mut bind_values: Vec<Value> = Vec::new();
            if let Some(official_id) = official_id {
                sql.push_str(" WHERE official_id = ?");
                bind_values.push(Value::Text(official_id.to_string()));
            }
            sql.push_str(" ORDER BY scheduled_at ASC, created_at ASC, id ASC");

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(parse_event_row(row)?);
            }
            Ok(events)
        })
    }

    async fn complete_event(
        &self,
        id: EventId,
        completed_at: DateTime<Utc>,
        notes: Option<&str>,
    ) -> RepoResult<()> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE official_events
                 SET completed = 1,
                     completed_at = COALESCE(completed_at, ?1),
                     notes = COALESCE(?2, notes)
                 WHERE id = ?3;",
                params![timestamp_to_db(completed_at), notes, id.to_string()],
            )?;
            if changed == 0 {
                return Err(RepoError::not_found(Collection::OfficialEvents, id));
            }
            Ok(())
        })
    }

    async fn delete_events_for(&self, official_id: OfficialId) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM official_events WHERE official_id = ?1;",
                [official_id.to_string()],
            )?;
            Ok(removed as u64)
        })
    }

    async fn count_pending_events_between(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
    ) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*)
                 FROM official_events
                 WHERE completed = 0
                   AND scheduled_at > ?1
                   AND scheduled_at < ?2;",
                params![timestamp_to_db(after), timestamp_to_db(before)],
                |row| row.get(0),
            )?;
            Ok(count_from_db(count))
        })
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<OfficialEvent> {
    let id_text: String = row.get("id")?;
    let official_text: String = row.get("official_id")?;

    let type_text: String = row.get("event_type")?;
    let event_type = EventType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid event type `{type_text}` in official_events.event_type"
        ))
    })?;

    let origin_text: String = row.get("origin")?;
    let origin = EventOrigin::parse(&origin_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid origin `{origin_text}` in official_events.origin"
        ))
    })?;

    Ok(OfficialEvent {
        id: uuid_from_db(&id_text, "official_events.id")?,
        official_id: uuid_from_db(&official_text, "official_events.official_id")?,
        event_type,
        scheduled_date: timestamp_from_db(
            row.get("scheduled_at")?,
            "official_events.scheduled_at",
        )?,
        completed: int_to_bool(row.get("completed")?, "official_events.completed")?,
        completed_at: optional_timestamp_from_db(
            row.get("completed_at")?,
            "official_events.completed_at",
        )?,
        notes: row.get("notes")?,
        origin,
        created_at: timestamp_from_db(row.get("created_at")?, "official_events.created_at")?,
    })
}

//! SQLite-backed record store.
//!
//! # Responsibility
//! - Own the single connection used by every repository implementation.
//! - Provide value codecs shared by the per-collection SQL.
//!
//! # Invariants
//! - The connection is only reachable through `with_conn`, so the lock is
//!   never held across an `.await`.
//! - Timestamps are stored as UTC epoch milliseconds, dates as `YYYY-MM-DD`.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::repo::error::{RepoError, RepoResult};
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Record store over one migrated SQLite connection.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Wraps an already migrated connection (see `db::open_db`).
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens a database file and applies pending migrations.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens a private in-memory database with all migrations applied.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut conn = self.conn.lock();
        f(&mut conn)
    }
}

pub(crate) fn timestamp_to_db(value: DateTime<Utc>) -> i64 {
    value.timestamp_millis()
}

pub(crate) fn timestamp_from_db(value: i64, column: &str) -> RepoResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(value).ok_or_else(|| {
        RepoError::InvalidData(format!("timestamp `{value}` out of range in {column}"))
    })
}

pub(crate) fn optional_timestamp_from_db(
    value: Option<i64>,
    column: &str,
) -> RepoResult<Option<DateTime<Utc>>> {
    value
        .map(|millis| timestamp_from_db(millis, column))
        .transpose()
}

pub(crate) fn date_to_db(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub(crate) fn date_from_db(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepoError::InvalidData(format!("invalid date `{value}` in {column}")))
}

pub(crate) fn uuid_from_db(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn count_from_db(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{date_from_db, date_to_db, int_to_bool, timestamp_from_db, timestamp_to_db};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn dates_use_iso_calendar_format() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(date_to_db(date), "2024-02-29");
        assert_eq!(date_from_db("2024-02-29", "officials.entry_date").unwrap(), date);
        assert!(date_from_db("29/02/2024", "officials.entry_date").is_err());
    }

    #[test]
    fn timestamps_keep_millisecond_precision() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        let stored = timestamp_to_db(instant);
        assert_eq!(timestamp_from_db(stored, "t").unwrap(), instant);
    }

    #[test]
    fn int_to_bool_rejects_out_of_domain_values() {
        assert!(!int_to_bool(0, "c").unwrap());
        assert!(int_to_bool(1, "c").unwrap());
        assert!(int_to_bool(2, "c").is_err());
    }
}

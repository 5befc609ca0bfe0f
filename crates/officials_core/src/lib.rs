//! Core domain logic for the officials lifecycle engine.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::event::{EventId, EventOrigin, EventType, OfficialEvent, PlannedEvent};
pub use model::inventory::{
    InventoryItem, InventoryItemId, InventoryOwner, InventoryUpdate, InventoryWithOwner,
    NewInventoryItem,
};
pub use model::metrics::{DashboardMetrics, StatusCounts};
pub use model::official::{
    EmploymentStatus, Official, OfficialDraft, OfficialId, OfficialListQuery, OfficialUpdate,
};
pub use model::role::{OfficialRole, RoleGrant, RoleId, SystemId, SystemInfo};
pub use model::validation::MissingFieldsError;
pub use repo::{Collection, RecordStore, RepoError, RepoResult, SqliteRecordStore};
pub use service::assignment_service::{AssignmentError, AssignmentService};
pub use service::event_scheduler::schedule;
pub use service::lifecycle_service::{
    CascadeStep, DeletionSummary, LifecycleError, LifecycleService, OfficialRecords, StatusChange,
};
pub use service::metrics_service::{DashboardReport, MetricsService, UPCOMING_EVENT_WINDOW_DAYS};
pub use service::system_service::{SystemService, SystemServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

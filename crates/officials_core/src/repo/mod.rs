//! Record store abstractions and the SQLite implementation.
//!
//! # Responsibility
//! - Define one async repository contract per collection (`officials`,
//!   `official_roles`, `inventory`, `official_events`, `systems`).
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Each write is one independent call; no transaction spans two calls.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Foreign keys make dependents-before-owner the only valid delete order.

pub mod error;
pub mod event_repo;
pub mod inventory_repo;
pub mod official_repo;
pub mod role_repo;
pub mod sqlite;
pub mod system_repo;

pub use error::{Collection, RepoError, RepoResult};
pub use event_repo::EventRepository;
pub use inventory_repo::InventoryRepository;
pub use official_repo::OfficialRepository;
pub use role_repo::RoleRepository;
pub use sqlite::SqliteRecordStore;
pub use system_repo::SystemRepository;

/// Every collection the lifecycle engine reads or writes.
pub trait RecordStore:
    OfficialRepository + RoleRepository + InventoryRepository + EventRepository + SystemRepository
{
}

impl<T> RecordStore for T where
    T: OfficialRepository
        + RoleRepository
        + InventoryRepository
        + EventRepository
        + SystemRepository
{
}

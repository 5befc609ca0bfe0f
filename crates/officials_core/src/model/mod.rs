//! Domain model for officials and the records attached to them.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Validate caller input before it reaches the record store.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - Roles, inventory, and events reference exactly one official and never
//!   outlive it.

pub mod event;
pub mod inventory;
pub mod metrics;
pub mod official;
pub mod role;
pub mod validation;

//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record store calls into use-case level APIs.
//! - Keep the CLI and other callers decoupled from storage details.
//!
//! # Invariants
//! - Services hold an injected `Arc<S: RecordStore>`; there is no global store.

pub mod assignment_service;
pub mod event_scheduler;
pub mod lifecycle_service;
pub mod metrics_service;
pub mod system_service;
pub mod transitions;

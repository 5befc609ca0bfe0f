//! Official lifecycle use-case service.
//!
//! # Responsibility
//! - Create officials and persist their initial event schedule.
//! - Apply status transitions and their table-driven side effects.
//! - Delete officials together with every dependent record.
//! - Provide read projections over an official's records.
//!
//! # Invariants
//! - Validation runs before any write.
//! - The official row exists before any event row referencing it is written.
//! - Dependents are deleted before their official; a failed dependent delete
//!   stops the cascade with the official intact.
//! - No compensation: partial failures are reported with distinct variants.

use crate::model::event::{EventId, EventOrigin, OfficialEvent};
use crate::model::inventory::InventoryItem;
use crate::model::official::{
    EmploymentStatus, Official, OfficialDraft, OfficialId, OfficialListQuery, OfficialUpdate,
};
use crate::model::role::OfficialRole;
use crate::model::validation::MissingFieldsError;
use crate::repo::{Collection, RecordStore, RepoError, RepoResult};
use crate::service::event_scheduler;
use crate::service::transitions::{effect_for, TransitionEffect};
use chrono::{NaiveDate, Utc};
use log::{error, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

/// Dependent collection removed during official deletion, in removal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeStep {
    Roles,
    Inventory,
    Events,
}

impl CascadeStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Roles => "roles",
            Self::Inventory => "inventory",
            Self::Events => "events",
        }
    }
}

/// Errors from lifecycle operations.
#[derive(Debug)]
pub enum LifecycleError {
    /// Required input missing; nothing was written.
    Validation(MissingFieldsError),
    NotFound(OfficialId),
    EventNotFound(EventId),
    Store(RepoError),
    /// The official was written but its events were not.
    SchedulingFailed {
        official_id: OfficialId,
        source: RepoError,
    },
    /// A dependent delete failed; the official and later dependents remain.
    CascadeInterrupted {
        official_id: OfficialId,
        step: CascadeStep,
        source: RepoError,
    },
    /// Every dependent was removed but the official row could not be.
    OrphanedDependents {
        official_id: OfficialId,
        source: RepoError,
    },
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "official not found: {id}"),
            Self::EventNotFound(id) => write!(f, "official event not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::SchedulingFailed {
                official_id,
                source,
            } => write!(
                f,
                "official {official_id} was saved but its events could not be scheduled: {source}"
            ),
            Self::CascadeInterrupted {
                official_id,
                step,
                source,
            } => write!(
                f,
                "deleting official {official_id} stopped while removing {}: {source}",
                step.as_str()
            ),
            Self::OrphanedDependents {
                official_id,
                source,
            } => write!(
                f,
                "dependents of official {official_id} were removed but the official remains: {source}"
            ),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err)
            | Self::SchedulingFailed { source: err, .. }
            | Self::CascadeInterrupted { source: err, .. }
            | Self::OrphanedDependents { source: err, .. } => Some(err),
            Self::NotFound(_) | Self::EventNotFound(_) => None,
        }
    }
}

impl From<RepoError> for LifecycleError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound {
                collection: Collection::Officials,
                id,
            } => Self::NotFound(id),
            RepoError::NotFound {
                collection: Collection::OfficialEvents,
                id,
            } => Self::EventNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<MissingFieldsError> for LifecycleError {
    fn from(value: MissingFieldsError) -> Self {
        Self::Validation(value)
    }
}

/// Outcome of a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub official_id: OfficialId,
    pub from: EmploymentStatus,
    pub to: EmploymentStatus,
    /// Events persisted by the transition's effect; empty when none applied.
    pub scheduled_events: Vec<OfficialEvent>,
}

/// Rows removed by a completed deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    pub roles_removed: u64,
    pub inventory_removed: u64,
    pub events_removed: u64,
}

/// Read projection of the record collections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficialRecords {
    pub officials: Vec<Official>,
    pub roles: Vec<OfficialRole>,
    pub inventory: Vec<InventoryItem>,
    pub events: Vec<OfficialEvent>,
}

/// Lifecycle service facade over an injected record store.
pub struct LifecycleService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> LifecycleService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates an official and persists the schedule for its status.
    ///
    /// # Contract
    /// - Rejects drafts with missing required fields before any write.
    /// - Writes the official first, then its events in one batch.
    /// - On event failure the official is kept and `SchedulingFailed` carries
    ///   its id.
    pub async fn create_official(&self, draft: OfficialDraft) -> Result<OfficialId, LifecycleError> {
        let started_at = Instant::now();
        let official = match draft.into_official(Utc::now()) {
            Ok(official) => official,
            Err(err) => {
                warn!(
                    "event=official_create module=lifecycle status=rejected missing_fields={}",
                    err.fields().join(",")
                );
                return Err(err.into());
            }
        };

        let official_id = self.store.insert_official(&official).await.map_err(|err| {
            error!(
                "event=official_create module=lifecycle status=error phase=insert_official error={err}"
            );
            LifecycleError::from(err)
        })?;

        let events = self
            .persist_schedule(
                official_id,
                official.entry_date,
                official.status,
                EventOrigin::OfficialCreated,
            )
            .await
            .map_err(|source| {
                error!(
                    "event=official_create module=lifecycle status=error phase=schedule_events official_id={official_id} error={source}"
                );
                LifecycleError::SchedulingFailed {
                    official_id,
                    source,
                }
            })?;

        info!(
            "event=official_create module=lifecycle status=ok official_id={official_id} official_status={} events={} duration_ms={}",
            official.status,
            events.len(),
            started_at.elapsed().as_millis()
        );
        Ok(official_id)
    }

    /// Sets a new status and applies the transition's side effect.
    ///
    /// # Contract
    /// - Any status may follow any status.
    /// - Scheduling effects use the official's original entry date.
    /// - Already persisted events are never deduplicated.
    pub async fn change_status(
        &self,
        official_id: OfficialId,
        new_status: EmploymentStatus,
    ) -> Result<StatusChange, LifecycleError> {
        let current = self.get_official(official_id).await.map_err(|err| {
            log_failure("official_status", "load", Some(official_id), &err);
            err
        })?;

        self.store
            .update_official_status(official_id, new_status)
            .await
            .map_err(|err| {
                error!(
                    "event=official_status module=lifecycle status=error phase=update_status official_id={official_id} error={err}"
                );
                LifecycleError::from(err)
            })?;

        let scheduled_events = match effect_for(current.status, new_status) {
            Some(TransitionEffect::ScheduleEvents { as_status }) => self
                .persist_schedule(
                    official_id,
                    current.entry_date,
                    as_status,
                    EventOrigin::StatusTransition {
                        from: current.status,
                        to: new_status,
                    },
                )
                .await
                .map_err(|source| {
                    error!(
                        "event=official_status module=lifecycle status=error phase=schedule_events official_id={official_id} error={source}"
                    );
                    LifecycleError::SchedulingFailed {
                        official_id,
                        source,
                    }
                })?,
            None => Vec::new(),
        };

        info!(
            "event=official_status module=lifecycle status=ok official_id={official_id} from={} to={} events={}",
            current.status,
            new_status,
            scheduled_events.len()
        );
        Ok(StatusChange {
            official_id,
            from: current.status,
            to: new_status,
            scheduled_events,
        })
    }

    /// Deletes an official after removing roles, inventory, and events.
    ///
    /// # Contract
    /// - Each removal is a separate store call; nothing is restored on
    ///   failure.
    /// - A failed dependent removal stops before the official is touched.
    pub async fn delete_official(
        &self,
        official_id: OfficialId,
    ) -> Result<DeletionSummary, LifecycleError> {
        let exists = self
            .store
            .official_exists(official_id)
            .await
            .map_err(LifecycleError::from)
            .and_then(|exists| {
                exists
                    .then_some(())
                    .ok_or(LifecycleError::NotFound(official_id))
            });
        if let Err(err) = exists {
            log_failure("official_delete", "exists", Some(official_id), &err);
            return Err(err);
        }

        let interrupted = |step: CascadeStep| {
            move |source: RepoError| {
                error!(
                    "event=official_delete module=lifecycle status=error phase={} official_id={official_id} error={source}",
                    step.as_str()
                );
                LifecycleError::CascadeInterrupted {
                    official_id,
                    step,
                    source,
                }
            }
        };

        let roles_removed = self
            .store
            .delete_roles_for(official_id)
            .await
            .map_err(interrupted(CascadeStep::Roles))?;
        let inventory_removed = self
            .store
            .delete_inventory_for(official_id)
            .await
            .map_err(interrupted(CascadeStep::Inventory))?;
        let events_removed = self
            .store
            .delete_events_for(official_id)
            .await
            .map_err(interrupted(CascadeStep::Events))?;

        self.store
            .delete_official(official_id)
            .await
            .map_err(|source| {
                error!(
                    "event=official_delete module=lifecycle status=error phase=official official_id={official_id} error={source}"
                );
                LifecycleError::OrphanedDependents {
                    official_id,
                    source,
                }
            })?;

        let summary = DeletionSummary {
            roles_removed,
            inventory_removed,
            events_removed,
        };
        info!(
            "event=official_delete module=lifecycle status=ok official_id={official_id} roles={} inventory={} events={}",
            summary.roles_removed, summary.inventory_removed, summary.events_removed
        );
        Ok(summary)
    }

    /// Returns the records of one official, or of every official.
    ///
    /// Returns `NotFound` when `official_id` is given but absent.
    pub async fn list_for(
        &self,
        official_id: Option<OfficialId>,
    ) -> Result<OfficialRecords, LifecycleError> {
        self.load_records(official_id).await.map_err(|err| {
            log_failure("official_list", "load", official_id, &err);
            err
        })
    }

    async fn load_records(
        &self,
        official_id: Option<OfficialId>,
    ) -> Result<OfficialRecords, LifecycleError> {
        let officials = match official_id {
            Some(id) => vec![self.get_official(id).await?],
            None => self.store.list_officials().await?,
        };

        let (roles, inventory, events) = tokio::try_join!(
            self.store.list_roles(official_id),
            self.store.list_inventory(official_id),
            self.store.list_events(official_id),
        )?;

        Ok(OfficialRecords {
            officials,
            roles,
            inventory,
            events,
        })
    }

    pub async fn get_official(&self, official_id: OfficialId) -> Result<Official, LifecycleError> {
        self.store
            .get_official(official_id)
            .await?
            .ok_or(LifecycleError::NotFound(official_id))
    }

    /// Lists officials ordered by name, filtered by `query`.
    pub async fn list_officials(
        &self,
        query: &OfficialListQuery,
    ) -> Result<Vec<Official>, LifecycleError> {
        let officials = self.store.list_officials().await?;
        Ok(officials
            .into_iter()
            .filter(|official| query.matches(official))
            .collect())
    }

    /// Distinct procedure names in ascending order.
    pub async fn procedures(&self) -> Result<Vec<String>, LifecycleError> {
        let officials = self.store.list_officials().await?;
        let procedures: BTreeSet<String> = officials
            .into_iter()
            .map(|official| official.procedure)
            .collect();
        Ok(procedures.into_iter().collect())
    }

    /// Updates identity fields. Status and schedule are left untouched.
    pub async fn update_official(
        &self,
        official_id: OfficialId,
        update: &OfficialUpdate,
    ) -> Result<Official, LifecycleError> {
        update.validate()?;
        let mut official = self.get_official(official_id).await?;
        if update.is_empty() {
            return Ok(official);
        }

        update.apply_to(&mut official);
        self.store.update_official(&official).await?;
        info!("event=official_update module=lifecycle status=ok official_id={official_id}");
        Ok(official)
    }

    /// Events ordered by scheduled date, optionally for one official.
    pub async fn list_events(
        &self,
        official_id: Option<OfficialId>,
    ) -> Result<Vec<OfficialEvent>, LifecycleError> {
        Ok(self.store.list_events(official_id).await?)
    }

    /// Marks an event completed now. Completing it again keeps the original
    /// completion time; existing notes are kept when `notes` is `None`.
    pub async fn complete_event(
        &self,
        event_id: EventId,
        notes: Option<String>,
    ) -> Result<OfficialEvent, LifecycleError> {
        self.store
            .complete_event(event_id, Utc::now(), notes.as_deref())
            .await?;
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or(LifecycleError::EventNotFound(event_id))?;
        info!(
            "event=event_complete module=lifecycle status=ok event_id={event_id} official_id={}",
            event.official_id
        );
        Ok(event)
    }

    async fn persist_schedule(
        &self,
        official_id: OfficialId,
        entry_date: NaiveDate,
        status: EmploymentStatus,
        origin: EventOrigin,
    ) -> RepoResult<Vec<OfficialEvent>> {
        let planned = event_scheduler::schedule(entry_date, status);
        if planned.is_empty() {
            return Ok(Vec::new());
        }

        let created_at = Utc::now();
        let events: Vec<OfficialEvent> = planned
            .into_iter()
            .map(|plan| OfficialEvent::from_plan(official_id, plan, origin, created_at))
            .collect();
        self.store.insert_events(&events).await?;
        Ok(events)
    }
}

/// Logs a failed operation once. Missing records and rejected input are
/// warnings; store failures are errors.
fn log_failure(event: &str, phase: &str, official_id: Option<OfficialId>, err: &LifecycleError) {
    let target = official_id.map_or_else(|| "all".to_string(), |id| id.to_string());
    match err {
        LifecycleError::Validation(_)
        | LifecycleError::NotFound(_)
        | LifecycleError::EventNotFound(_) => warn!(
            "event={event} module=lifecycle status=error phase={phase} official_id={target} error={err}"
        ),
        _ => error!(
            "event={event} module=lifecycle status=error phase={phase} official_id={target} error={err}"
        ),
    }
}

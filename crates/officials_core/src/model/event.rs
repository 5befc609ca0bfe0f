//! Follow-up and evaluation events attached to an official.
//!
//! # Invariants
//! - Events are only created from scheduler output persisted by the lifecycle
//!   service.
//! - `completed_at` is set iff `completed` is true.
//! - Events are removed only as part of deleting their official.

use crate::model::official::{EmploymentStatus, OfficialId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an official event.
pub type EventId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    FollowUp,
    TrialPeriodEvaluation,
    AnnualEvaluation,
}

impl EventType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FollowUp => "FOLLOW_UP",
            Self::TrialPeriodEvaluation => "TRIAL_PERIOD_EVALUATION",
            Self::AnnualEvaluation => "ANNUAL_EVALUATION",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "FOLLOW_UP" => Some(Self::FollowUp),
            "TRIAL_PERIOD_EVALUATION" => Some(Self::TrialPeriodEvaluation),
            "ANNUAL_EVALUATION" => Some(Self::AnnualEvaluation),
            _ => None,
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance of a generated event.
///
/// Stored alongside each row so repeated generation for the same official can
/// be told apart later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum EventOrigin {
    /// Generated while creating the official.
    OfficialCreated,
    /// Generated by a status transition with a scheduling effect.
    StatusTransition {
        from: EmploymentStatus,
        to: EmploymentStatus,
    },
}

const ORIGIN_CREATED: &str = "official_created";
const ORIGIN_TRANSITION_PREFIX: &str = "status_transition:";

impl EventOrigin {
    /// Storage key, e.g. `status_transition:PROVISIONAL:POSITIONED`.
    pub fn key(self) -> String {
        match self {
            Self::OfficialCreated => ORIGIN_CREATED.to_string(),
            Self::StatusTransition { from, to } => {
                format!("{ORIGIN_TRANSITION_PREFIX}{from}:{to}")
            }
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value == ORIGIN_CREATED {
            return Some(Self::OfficialCreated);
        }
        let (from, to) = value.strip_prefix(ORIGIN_TRANSITION_PREFIX)?.split_once(':')?;
        Some(Self::StatusTransition {
            from: EmploymentStatus::parse(from)?,
            to: EmploymentStatus::parse(to)?,
        })
    }
}

impl From<EventOrigin> for String {
    fn from(value: EventOrigin) -> Self {
        value.key()
    }
}

impl TryFrom<String> for EventOrigin {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("unknown event origin `{value}`"))
    }
}

/// One event produced by the scheduler, before it is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedEvent {
    pub event_type: EventType,
    pub scheduled_date: NaiveDate,
}

/// Persisted event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialEvent {
    pub id: EventId,
    pub official_id: OfficialId,
    pub event_type: EventType,
    /// UTC midnight of the planned calendar date.
    pub scheduled_date: DateTime<Utc>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub origin: EventOrigin,
    pub created_at: DateTime<Utc>,
}

impl OfficialEvent {
    /// Builds an uncompleted event row from scheduler output.
    pub fn from_plan(
        official_id: OfficialId,
        planned: PlannedEvent,
        origin: EventOrigin,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            official_id,
            event_type: planned.event_type,
            scheduled_date: planned.scheduled_date.and_time(NaiveTime::MIN).and_utc(),
            completed: false,
            completed_at: None,
            notes: None,
            origin,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventOrigin, EventType, OfficialEvent, PlannedEvent};
    use crate::model::official::EmploymentStatus;
    use chrono::{NaiveDate, Utc};
    use uuid::Uuid;

    #[test]
    fn origin_keys_parse_back() {
        let transition = EventOrigin::StatusTransition {
            from: EmploymentStatus::Provisional,
            to: EmploymentStatus::Positioned,
        };
        assert_eq!(transition.key(), "status_transition:PROVISIONAL:POSITIONED");
        assert_eq!(EventOrigin::parse(&transition.key()), Some(transition));
        assert_eq!(
            EventOrigin::parse("official_created"),
            Some(EventOrigin::OfficialCreated)
        );
        assert_eq!(EventOrigin::parse("status_transition:PROVISIONAL"), None);
        assert_eq!(EventOrigin::parse("manual"), None);
    }

    #[test]
    fn event_type_rejects_unknown_names() {
        assert_eq!(EventType::parse("ANNUAL_EVALUATION"), Some(EventType::AnnualEvaluation));
        assert_eq!(EventType::parse("ONBOARDING"), None);
    }

    #[test]
    fn planned_event_is_anchored_at_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
        let event = OfficialEvent::from_plan(
            Uuid::new_v4(),
            PlannedEvent {
                event_type: EventType::FollowUp,
                scheduled_date: date,
            },
            EventOrigin::OfficialCreated,
            Utc::now(),
        );
        assert_eq!(event.scheduled_date.date_naive(), date);
        assert_eq!(event.scheduled_date.to_rfc3339(), "2024-04-15T00:00:00+00:00");
        assert!(!event.completed);
        assert!(event.completed_at.is_none());
    }
}

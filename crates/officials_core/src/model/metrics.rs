//! Dashboard summary structure. Derived on demand, never persisted.

use crate::model::official::EmploymentStatus;
use serde::{Deserialize, Serialize};

/// Per-status official counts. Unknown stored statuses have no bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StatusCounts {
    pub provisional: u64,
    pub positioned: u64,
    pub inactive: u64,
    pub follow_up: u64,
}

impl StatusCounts {
    pub fn increment(&mut self, status: EmploymentStatus) {
        *self.bucket_mut(status) += 1;
    }

    pub fn get(&self, status: EmploymentStatus) -> u64 {
        match status {
            EmploymentStatus::Provisional => self.provisional,
            EmploymentStatus::Positioned => self.positioned,
            EmploymentStatus::Inactive => self.inactive,
            EmploymentStatus::FollowUp => self.follow_up,
        }
    }

    pub fn total(&self) -> u64 {
        self.provisional + self.positioned + self.inactive + self.follow_up
    }

    fn bucket_mut(&mut self, status: EmploymentStatus) -> &mut u64 {
        match status {
            EmploymentStatus::Provisional => &mut self.provisional,
            EmploymentStatus::Positioned => &mut self.positioned,
            EmploymentStatus::Inactive => &mut self.inactive,
            EmploymentStatus::FollowUp => &mut self.follow_up,
        }
    }
}

/// Summary metrics. `Default` is the all-zero structure reported on failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub officials_count: u64,
    /// Every role row counts; there is no separate "active" flag.
    pub active_roles_count: u64,
    pub total_inventory_value: i64,
    pub status_counts: StatusCounts,
    /// Incomplete events strictly inside `(now, now + 30 days)`.
    pub upcoming_events: u64,
}

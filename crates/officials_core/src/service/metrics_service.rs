//! Dashboard metrics aggregation.
//!
//! # Invariants
//! - Metrics are a snapshot reduced from independent reads; nothing is cached.
//! - A failed read yields the all-zero structure, never a partial aggregate.

use crate::model::metrics::{DashboardMetrics, StatusCounts};
use crate::model::official::EmploymentStatus;
use crate::repo::{RecordStore, RepoError};
use chrono::{DateTime, Duration, Utc};
use log::{error, info};
use std::sync::Arc;
use std::time::Instant;

/// Width of the upcoming-event window, counted from "now".
pub const UPCOMING_EVENT_WINDOW_DAYS: i64 = 30;

/// Metrics together with the read failure that zeroed them, if any.
#[derive(Debug)]
pub struct DashboardReport {
    pub metrics: DashboardMetrics,
    pub error: Option<RepoError>,
}

impl DashboardReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct MetricsService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> MetricsService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Aggregates metrics relative to the current time.
    pub async fn aggregate(&self) -> DashboardReport {
        self.aggregate_at(Utc::now()).await
    }

    /// Aggregates metrics relative to `now`, zeroing them on any read failure.
    pub async fn aggregate_at(&self, now: DateTime<Utc>) -> DashboardReport {
        let started_at = Instant::now();
        match self.try_aggregate_at(now).await {
            Ok(metrics) => {
                info!(
                    "event=metrics_aggregate module=metrics status=ok officials={} upcoming_events={} duration_ms={}",
                    metrics.officials_count,
                    metrics.upcoming_events,
                    started_at.elapsed().as_millis()
                );
                DashboardReport {
                    metrics,
                    error: None,
                }
            }
            Err(err) => {
                error!("event=metrics_aggregate module=metrics status=error error={err}");
                DashboardReport {
                    metrics: DashboardMetrics::default(),
                    error: Some(err),
                }
            }
        }
    }

    /// Aggregates metrics relative to `now`, returning the first read failure.
    pub async fn try_aggregate_at(&self, now: DateTime<Utc>) -> Result<DashboardMetrics, RepoError> {
        let window_end = now + Duration::days(UPCOMING_EVENT_WINDOW_DAYS);
        let (officials_count, active_roles_count, values, statuses, upcoming_events) = tokio::try_join!(
            self.store.count_officials(),
            self.store.count_roles(),
            self.store.list_inventory_values(),
            self.store.list_official_statuses(),
            self.store.count_pending_events_between(now, window_end),
        )?;

        Ok(DashboardMetrics {
            officials_count,
            active_roles_count,
            total_inventory_value: sum_values(&values),
            status_counts: count_statuses(&statuses),
            upcoming_events,
        })
    }
}

fn sum_values(values: &[Option<i64>]) -> i64 {
    values
        .iter()
        .fold(0i64, |total, value| total.saturating_add(value.unwrap_or(0)))
}

fn count_statuses(statuses: &[String]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for status in statuses.iter().filter_map(|raw| EmploymentStatus::parse(raw)) {
        counts.increment(status);
    }
    counts
}

//! JSON envelopes printed by the CLI.

use officials_core::{DashboardMetrics, DashboardReport, OfficialId};
use serde::Serialize;

/// Result of a write command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    /// Affected official, when one was written.
    pub official_id: Option<String>,
    /// Operation-scoped message for diagnostics.
    pub message: String,
}

impl ActionResponse {
    pub fn success(message: impl Into<String>, official_id: OfficialId) -> Self {
        Self {
            ok: true,
            official_id: Some(official_id.to_string()),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            official_id: None,
            message: message.into(),
        }
    }

    /// Failure that still names a persisted official.
    pub fn partial(message: impl Into<String>, official_id: OfficialId) -> Self {
        Self {
            ok: false,
            official_id: Some(official_id.to_string()),
            message: message.into(),
        }
    }
}

/// Metrics output; `error` is set when the metrics were zeroed.
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub ok: bool,
    pub metrics: DashboardMetrics,
    pub error: Option<String>,
}

impl From<DashboardReport> for MetricsResponse {
    fn from(report: DashboardReport) -> Self {
        Self {
            ok: report.error.is_none(),
            metrics: report.metrics,
            error: report.error.map(|err| err.to_string()),
        }
    }
}

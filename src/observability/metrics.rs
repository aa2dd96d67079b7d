//! Metrics for the submission gateway
//!
//! Recording goes through the `metrics` facade; without an installed recorder
//! every call is a no-op, which is what the tests rely on.

use std::fmt;
use std::net::SocketAddr;

use tracing::info;

/// All metric names used by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Submission metrics
    SubmissionsAccepted,
    SubmissionsFailed,
    SubmissionsRejected,
    RequestDuration,
    TransportErrors,

    // Gate metrics
    GateRateLimited,
    GateWaitSeconds,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::SubmissionsAccepted => "crpt_submissions_accepted_total",
            MetricName::SubmissionsFailed => "crpt_submissions_failed_total",
            MetricName::SubmissionsRejected => "crpt_submissions_rejected_total",
            MetricName::RequestDuration => "crpt_request_duration_seconds",
            MetricName::TransportErrors => "crpt_transport_errors_total",
            MetricName::GateRateLimited => "crpt_gate_rate_limited_total",
            MetricName::GateWaitSeconds => "crpt_gate_wait_seconds",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            SubmissionsAccepted,
            SubmissionsFailed,
            SubmissionsRejected,
            RequestDuration,
            TransportErrors,
            GateRateLimited,
            GateWaitSeconds,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Install the Prometheus recorder with a scrape endpoint on `listen`.
/// Must be called from inside a tokio runtime.
pub fn init(listen: SocketAddr) -> Result<(), Box<dyn std::error::Error>> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(listen)
        .install()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;

    info!(%listen, "Metrics system initialized");
    Ok(())
}

// ============================================================================
// Submission Metrics
// ============================================================================

pub mod submission {
    use super::MetricName;

    /// The API answered with a 2xx status
    pub fn accepted() {
        ::metrics::counter!(MetricName::SubmissionsAccepted.as_str()).increment(1);
    }

    /// The API answered with any other status
    pub fn failed(status: u16) {
        ::metrics::counter!(MetricName::SubmissionsFailed.as_str(), "status" => status.to_string())
            .increment(1);
    }

    /// Refused before reaching the network (validation, format, gate)
    pub fn rejected(reason: &'static str) {
        ::metrics::counter!(MetricName::SubmissionsRejected.as_str(), "reason" => reason).increment(1);
    }

    pub fn transport_error() {
        ::metrics::counter!(MetricName::TransportErrors.as_str()).increment(1);
    }

    pub fn request_duration(secs: f64) {
        ::metrics::histogram!(MetricName::RequestDuration.as_str()).record(secs);
    }
}

// ============================================================================
// Gate Metrics
// ============================================================================

pub mod gate {
    use super::MetricName;

    pub fn rate_limited() {
        ::metrics::counter!(MetricName::GateRateLimited.as_str()).increment(1);
    }

    pub fn wait_seconds(secs: f64) {
        ::metrics::histogram!(MetricName::GateWaitSeconds.as_str()).record(secs);
    }
}

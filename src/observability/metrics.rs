//! Submission metrics.
//!
//! # Metrics
//! - `form_submissions_total` (counter): submissions by endpoint, outcome
//! - `form_submission_duration_seconds` (histogram): time from submit to render

use std::time::Instant;

/// Record one finished submission.
pub fn record_submission(endpoint: &str, outcome: &'static str, start: Instant) {
    metrics::counter!(
        "form_submissions_total",
        "endpoint" => endpoint.to_string(),
        "outcome" => outcome
    )
    .increment(1);

    metrics::histogram!(
        "form_submission_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Every submission produces:
//!     → logging.rs (structured log events, stderr)
//!     → metrics.rs (counters, histograms)
//! ```
//!
//! # Design Decisions
//! - Logs go to stderr; stdout is reserved for rendered results in the CLI
//! - Submission ID flows through every log event of one submission
//! - Metrics go through the `metrics` facade; without a recorder they are no-ops

pub mod logging;
pub mod metrics;

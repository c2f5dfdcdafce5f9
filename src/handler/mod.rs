//! Submission handler subsystem.
//!
//! # Data Flow
//! ```text
//! SubmitEvent
//!     → submission.rs (prevent default, snapshot form, POST multipart)
//!     → await response
//!     → ResponseMode::render (pretty JSON or verbatim text)
//!     → ResultRegion::replace (one write)
//!
//! On failure:
//!     → error.rs (SubmitError)
//!     → tracing::error! (diagnostic log), region untouched
//! ```

pub mod client;
pub mod error;
pub mod event;
pub mod export;
pub mod submission;

pub use client::{build_client, endpoint_url};
pub use error::{SubmitError, SubmitResult};
pub use event::{SubmitEvent, SubmitOutcome};
pub use export::export;
pub use submission::{FailurePolicy, ResponseMode, SubmissionHandler};

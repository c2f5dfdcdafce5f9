//! Form subsystem.
//!
//! # Data Flow
//! ```text
//! submit event
//!     → FormSource::snapshot (current field values)
//!     → FormPayload (owned by one submission)
//!     → into_multipart (request body)
//! ```

pub mod payload;
pub mod source;

pub use payload::{FormField, FormPayload};
pub use source::{FormSource, StaticForm};

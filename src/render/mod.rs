//! Rendering subsystem.
//!
//! A handler performs exactly one region write per successful submission.
//! Regions are injected, never looked up globally.

pub mod json;
pub mod region;

pub use json::to_js_pretty;
pub use region::{MemoryRegion, ResultRegion, WriterRegion};

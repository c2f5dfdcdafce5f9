//! Form submission relay.
//!
//! Binds submit handlers to forms, posts their fields as multipart bodies to
//! the `/documentos` and `/validar` endpoints, and renders the responses into
//! an injected result region.

pub mod config;
pub mod form;
pub mod handler;
pub mod observability;
pub mod page;
pub mod render;

pub use config::RelayConfig;
pub use handler::SubmissionHandler;
pub use page::Page;

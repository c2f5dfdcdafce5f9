//! Export capability.
//!
//! Declared alongside the validar handler but never given behavior; no
//! contract is assumed.

use crate::handler::error::{SubmitError, SubmitResult};

/// Always fails with [`SubmitError::NotImplemented`].
pub fn export() -> SubmitResult<()> {
    tracing::warn!("Export requested but not implemented");
    Err(SubmitError::NotImplemented("export"))
}

//! Submit events and their outcomes.

use crate::handler::error::SubmitError;

/// A form submit event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitEvent {
    form_id: String,
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            default_prevented: false,
        }
    }

    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Suppress the default navigation (page reload) for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// What a handler did with one submit event.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The result region was replaced with the rendered response.
    Rendered,
    /// The submission failed; the error was logged.
    Failed(SubmitError),
}

impl SubmitOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SubmitOutcome::Rendered)
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmitOutcome::Rendered => None,
            SubmitOutcome::Failed(e) => Some(e),
        }
    }
}

//! Page wiring.
//!
//! A `Page` owns the result region and the submit bindings of its forms.
//! Elements are passed in explicitly; nothing is looked up globally.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::RelayConfig;
use crate::form::FormSource;
use crate::handler::{build_client, SubmissionHandler, SubmitEvent, SubmitOutcome};
use crate::render::ResultRegion;

/// Id of the form posted to the documentos endpoint.
pub const FORM_ID: &str = "form";
/// Id of the form posted to the validar endpoint.
pub const DOCUMENTOS_FORM_ID: &str = "form-documentos";
/// Id of the result region.
pub const RESULT_ID: &str = "result";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("no element with id '{0}'")]
    MissingElement(String),

    #[error("expected element '{expected}', got '{found}'")]
    UnexpectedElement { expected: &'static str, found: String },

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

pub struct Page {
    region: Arc<dyn ResultRegion>,
    bindings: HashMap<String, Arc<SubmissionHandler>>,
}

impl Page {
    pub fn new(region: Arc<dyn ResultRegion>) -> Self {
        Self {
            region,
            bindings: HashMap::new(),
        }
    }

    /// Build the page with both standard handlers bound.
    ///
    /// `form` must have id `form` and `documentos_form` id `form-documentos`.
    pub fn standard(
        config: &RelayConfig,
        region: Arc<dyn ResultRegion>,
        form: Arc<dyn FormSource>,
        documentos_form: Arc<dyn FormSource>,
    ) -> Result<Self, PageError> {
        expect_id(form.as_ref(), FORM_ID)?;
        expect_id(documentos_form.as_ref(), DOCUMENTOS_FORM_ID)?;

        let client = build_client(&config.server, &config.timeouts)?;
        let mut page = Self::new(region.clone());
        page.bind(SubmissionHandler::documentos(config, client.clone(), form, region.clone())?);
        page.bind(SubmissionHandler::validar(config, client, documentos_form, region)?);

        tracing::debug!(base_url = %config.server.base_url, "Page wired");
        Ok(page)
    }

    /// Attach a handler to its form's submit event, replacing any previous one.
    pub fn bind(&mut self, handler: SubmissionHandler) {
        let id = handler.form_id().to_string();
        if self.bindings.insert(id.clone(), Arc::new(handler)).is_some() {
            tracing::warn!(form = %id, "Replaced existing submit handler");
        }
    }

    pub fn handler(&self, form_id: &str) -> Result<Arc<SubmissionHandler>, PageError> {
        self.bindings
            .get(form_id)
            .cloned()
            .ok_or_else(|| PageError::MissingElement(form_id.to_string()))
    }

    pub fn region(&self) -> &Arc<dyn ResultRegion> {
        &self.region
    }

    /// Fire a submit event on a form and run its handler to completion.
    pub async fn submit(&self, form_id: &str) -> Result<(SubmitEvent, SubmitOutcome), PageError> {
        let handler = self.handler(form_id)?;
        let mut event = SubmitEvent::new(form_id);
        let outcome = handler.on_submit(&mut event).await;
        Ok((event, outcome))
    }
}

fn expect_id(form: &dyn FormSource, expected: &'static str) -> Result<(), PageError> {
    if form.id() == expected {
        Ok(())
    } else {
        Err(PageError::UnexpectedElement {
            expected,
            found: form.id().to_string(),
        })
    }
}

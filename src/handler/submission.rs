//! Submission handlers.
//!
//! # Responsibilities
//! - Prevent the default navigation of the submit event
//! - Snapshot the bound form into a multipart payload
//! - POST it to the handler's endpoint (the only suspension point)
//! - Render the response into the result region (exactly one write)
//! - Route failures to the diagnostic log
//!
//! # Design Decisions
//! - No retry and no cancellation; concurrent submissions render in
//!   completion order, last write wins
//! - Non-2xx responses are failures and leave the region untouched

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tracing::Instrument;
use url::Url;
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::form::{FormPayload, FormSource};
use crate::handler::client::endpoint_url;
use crate::handler::error::{SubmitError, SubmitResult};
use crate::handler::event::{SubmitEvent, SubmitOutcome};
use crate::observability::metrics;
use crate::render::{to_js_pretty, ResultRegion};

/// Header carrying the per-submission correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How a response body becomes region content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// Parse as JSON and pretty-print with 2-space indentation.
    PrettyJson,
    /// Insert the body text unchanged.
    Verbatim,
}

impl ResponseMode {
    /// Turn a response body into region content. A leading UTF-8 BOM is dropped.
    pub fn render(self, body: &[u8]) -> SubmitResult<String> {
        let body = body.strip_prefix(UTF8_BOM).unwrap_or(body);
        match self {
            ResponseMode::PrettyJson => {
                let value: serde_json::Value = serde_json::from_slice(body)?;
                Ok(to_js_pretty(&value)?)
            }
            ResponseMode::Verbatim => Ok(String::from_utf8_lossy(body).into_owned()),
        }
    }
}

/// What happens to the result region when a submission fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log only; the region keeps its previous content.
    #[default]
    Silent,
    /// Log and write `Error: <message>` into the region.
    Surface,
}

impl FailurePolicy {
    pub fn from_config(surface_errors: bool) -> Self {
        if surface_errors {
            FailurePolicy::Surface
        } else {
            FailurePolicy::Silent
        }
    }
}

/// A handler bound to one form, one endpoint, and one result region.
pub struct SubmissionHandler {
    client: Client,
    endpoint: Url,
    mode: ResponseMode,
    failure_policy: FailurePolicy,
    form: Arc<dyn FormSource>,
    region: Arc<dyn ResultRegion>,
}

impl SubmissionHandler {
    pub fn new(
        client: Client,
        endpoint: Url,
        mode: ResponseMode,
        form: Arc<dyn FormSource>,
        region: Arc<dyn ResultRegion>,
    ) -> Self {
        Self {
            client,
            endpoint,
            mode,
            failure_policy: FailurePolicy::default(),
            form,
            region,
        }
    }

    /// Handler posting to the documentos endpoint and rendering pretty JSON.
    pub fn documentos(
        config: &RelayConfig,
        client: Client,
        form: Arc<dyn FormSource>,
        region: Arc<dyn ResultRegion>,
    ) -> Result<Self, url::ParseError> {
        let endpoint = endpoint_url(&config.server.base_url, &config.handlers.documentos_endpoint)?;
        Ok(Self::new(client, endpoint, ResponseMode::PrettyJson, form, region)
            .with_failure_policy(FailurePolicy::from_config(config.handlers.surface_errors)))
    }

    /// Handler posting to the validar endpoint and rendering text verbatim.
    pub fn validar(
        config: &RelayConfig,
        client: Client,
        form: Arc<dyn FormSource>,
        region: Arc<dyn ResultRegion>,
    ) -> Result<Self, url::ParseError> {
        let endpoint = endpoint_url(&config.server.base_url, &config.handlers.validar_endpoint)?;
        Ok(Self::new(client, endpoint, ResponseMode::Verbatim, form, region)
            .with_failure_policy(FailurePolicy::from_config(config.handlers.surface_errors)))
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn form_id(&self) -> &str {
        self.form.id()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    /// Handle one submit event of the bound form.
    ///
    /// Never returns an error: failures are logged and reported in the
    /// outcome.
    pub async fn on_submit(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let submission_id = Uuid::new_v4();
        let payload = self.form.snapshot();
        let span = tracing::info_span!(
            "submission",
            %submission_id,
            form = %self.form.id(),
            endpoint = %self.endpoint.path()
        );

        async move {
            let start = Instant::now();
            tracing::debug!(
                fields = payload.len(),
                files = payload.file_count(),
                "Submitting form"
            );

            let outcome = match self.submit(payload, submission_id).await {
                Ok(rendered) => {
                    self.region.replace(rendered);
                    tracing::info!(
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Response rendered"
                    );
                    SubmitOutcome::Rendered
                }
                Err(e) => {
                    tracing::error!(error = %e, kind = e.kind(), "Submission failed");
                    if self.failure_policy == FailurePolicy::Surface {
                        self.region.replace(format!("Error: {}", e));
                    }
                    SubmitOutcome::Failed(e)
                }
            };

            let label = match &outcome {
                SubmitOutcome::Rendered => "rendered",
                SubmitOutcome::Failed(e) => e.kind(),
            };
            metrics::record_submission(self.endpoint.path(), label, start);
            outcome
        }
        .instrument(span)
        .await
    }

    /// Send a payload and render the response, without touching the region.
    pub async fn submit(&self, payload: FormPayload, submission_id: Uuid) -> SubmitResult<String> {
        let body = payload.into_multipart().map_err(SubmitError::Encode)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(REQUEST_ID_HEADER, submission_id.to_string())
            .multipart(body)
            .send()
            .await
            .map_err(|source| SubmitError::Transport {
                endpoint: self.endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                endpoint: self.endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await.map_err(SubmitError::Body)?;
        self.mode.render(&bytes)
    }
}

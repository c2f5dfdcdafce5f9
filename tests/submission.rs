//! Submission handler tests against mock endpoints.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Multipart;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use form_relay::form::{FormField, FormPayload, StaticForm};
use form_relay::handler::{
    build_client, FailurePolicy, SubmissionHandler, SubmitError, SubmitEvent, SubmitOutcome,
};
use form_relay::render::{MemoryRegion, ResultRegion};
use form_relay::RelayConfig;
use serde_json::{json, Value};

mod common;

fn documentos(config: &RelayConfig, form: StaticForm, region: &MemoryRegion) -> SubmissionHandler {
    let client = build_client(&config.server, &config.timeouts).unwrap();
    SubmissionHandler::documentos(config, client, Arc::new(form), Arc::new(region.clone())).unwrap()
}

fn validar(config: &RelayConfig, form: StaticForm, region: &MemoryRegion) -> SubmissionHandler {
    let client = build_client(&config.server, &config.timeouts).unwrap();
    SubmissionHandler::validar(config, client, Arc::new(form), Arc::new(region.clone())).unwrap()
}

#[tokio::test]
async fn test_documentos_renders_pretty_json() {
    let addr = common::start_programmable_endpoint("/documentos", || async {
        (200, r#"{"a":1}"#.to_string())
    })
    .await;
    let region = MemoryRegion::new();
    let handler = documentos(&common::test_config(addr), StaticForm::new("form"), &region);

    let mut event = SubmitEvent::new("form");
    let outcome = handler.on_submit(&mut event).await;

    assert!(event.default_prevented(), "Default navigation must be prevented");
    assert!(outcome.is_rendered(), "unexpected outcome: {:?}", outcome);
    assert_eq!(region.content(), "{\n  \"a\": 1\n}");
}

#[tokio::test]
async fn test_validar_renders_text_verbatim() {
    let addr = common::start_programmable_endpoint("/validar", || async { (200, "OK".to_string()) }).await;
    let region = MemoryRegion::with_content("previous");
    let handler = validar(&common::test_config(addr), StaticForm::new("form-documentos"), &region);

    let mut event = SubmitEvent::new("form-documentos");
    let outcome = handler.on_submit(&mut event).await;

    assert!(event.default_prevented());
    assert!(outcome.is_rendered());
    assert_eq!(region.content(), "OK");
}

#[tokio::test]
async fn test_error_status_leaves_region_unchanged() {
    let addr = common::start_programmable_endpoint("/validar", || async {
        (500, "Internal Server Error".to_string())
    })
    .await;
    let region = MemoryRegion::with_content("previous");
    let handler = validar(&common::test_config(addr), StaticForm::new("form-documentos"), &region);

    let mut event = SubmitEvent::new("form-documentos");
    let outcome = handler.on_submit(&mut event).await;

    assert!(event.default_prevented());
    assert!(matches!(outcome.error(), Some(SubmitError::Status { status: 500, .. })));
    assert_eq!(region.content(), "previous");
}

#[tokio::test]
async fn test_documentos_error_status_with_json_body_leaves_region_unchanged() {
    let addr = common::start_programmable_endpoint("/documentos", || async {
        (400, r#"{"erro":"x"}"#.to_string())
    })
    .await;
    let region = MemoryRegion::with_content("previous");
    let handler = documentos(&common::test_config(addr), StaticForm::new("form"), &region);

    let mut event = SubmitEvent::new("form");
    let outcome = handler.on_submit(&mut event).await;

    assert!(event.default_prevented());
    assert!(matches!(outcome.error(), Some(SubmitError::Status { status: 400, .. })));
    assert_eq!(region.content(), "previous");
}

#[tokio::test]
async fn test_malformed_json_leaves_region_unchanged() {
    let addr = common::start_programmable_endpoint("/documentos", || async {
        (200, "<html>not json</html>".to_string())
    })
    .await;
    let region = MemoryRegion::with_content("previous");
    let handler = documentos(&common::test_config(addr), StaticForm::new("form"), &region);

    let outcome = handler.on_submit(&mut SubmitEvent::new("form")).await;

    assert!(matches!(outcome, SubmitOutcome::Failed(SubmitError::Parse(_))));
    assert_eq!(region.content(), "previous");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let addr = common::closed_addr().await;
    let region = MemoryRegion::with_content("previous");
    let handler = documentos(&common::test_config(addr), StaticForm::new("form"), &region);

    let mut event = SubmitEvent::new("form");
    let outcome = handler.on_submit(&mut event).await;

    assert!(event.default_prevented());
    assert_eq!(outcome.error().map(SubmitError::kind), Some("transport"));
    assert_eq!(region.content(), "previous");
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let addr = common::start_programmable_endpoint("/validar", || async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, "late".to_string())
    })
    .await;
    let mut config = common::test_config(addr);
    config.timeouts.request_secs = 1;
    let region = MemoryRegion::with_content("previous");
    let handler = validar(&config, StaticForm::new("form-documentos"), &region);

    let outcome = handler.on_submit(&mut SubmitEvent::new("form-documentos")).await;

    assert_eq!(outcome.error().map(SubmitError::kind), Some("transport"));
    assert_eq!(region.content(), "previous");
}

#[tokio::test]
async fn test_surface_policy_writes_error() {
    let addr = common::start_programmable_endpoint("/validar", || async {
        (503, "Service Unavailable".to_string())
    })
    .await;
    let mut config = common::test_config(addr);
    config.handlers.surface_errors = true;
    let region = MemoryRegion::with_content("previous");
    let handler = validar(&config, StaticForm::new("form-documentos"), &region);

    let outcome = handler.on_submit(&mut SubmitEvent::new("form-documentos")).await;

    assert!(!outcome.is_rendered());
    assert!(region.content().starts_with("Error: "));
    assert!(region.content().contains("503"));
}

#[tokio::test]
async fn test_explicit_silent_policy_overrides_config() {
    let addr = common::start_programmable_endpoint("/validar", || async { (404, String::new()) }).await;
    let mut config = common::test_config(addr);
    config.handlers.surface_errors = true;
    let region = MemoryRegion::with_content("previous");
    let handler = validar(&config, StaticForm::new("form-documentos"), &region)
        .with_failure_policy(FailurePolicy::Silent);

    handler.on_submit(&mut SubmitEvent::new("form-documentos")).await;

    assert_eq!(region.content(), "previous");
}

async fn echo_multipart(headers: HeaderMap, mut multipart: Multipart) -> Json<Value> {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        fields.push(json!({
            "name": name,
            "file_name": file_name,
            "content_type": content_type,
            "value": String::from_utf8_lossy(&bytes),
        }));
    }
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    Json(json!({ "request_id": request_id, "fields": fields }))
}

#[tokio::test]
async fn test_multipart_body_carries_fields_and_files() {
    let addr = common::start_mock_server(Router::new().route("/documentos", post(echo_multipart))).await;
    let form = StaticForm::with_payload(
        "form",
        FormPayload::new()
            .with("fornecedor", FormField::text("ACME"))
            .with("documentos_files", FormField::file("DOC.DBF", b"dbf-bytes".to_vec()))
            .with("documentos_files", FormField::file("DOC.FPT", b"fpt-bytes".to_vec())),
    );
    let region = MemoryRegion::new();
    let handler = documentos(&common::test_config(addr), form, &region);

    let outcome = handler.on_submit(&mut SubmitEvent::new("form")).await;
    assert!(outcome.is_rendered(), "unexpected outcome: {:?}", outcome);

    let echoed: Value = serde_json::from_str(&region.content()).unwrap();
    let fields = echoed["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0]["name"], "fornecedor");
    assert_eq!(fields[0]["value"], "ACME");
    assert_eq!(fields[0]["file_name"], Value::Null);
    assert_eq!(fields[1]["name"], "documentos_files");
    assert_eq!(fields[1]["file_name"], "DOC.DBF");
    assert_eq!(fields[1]["content_type"], "application/dbase");
    assert_eq!(fields[1]["value"], "dbf-bytes");
    assert_eq!(fields[2]["file_name"], "DOC.FPT");

    let request_id = echoed["request_id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(request_id).is_ok(), "bad request id: {}", request_id);
}

#[tokio::test]
async fn test_empty_form_is_submitted() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();
    let addr = common::start_programmable_endpoint("/validar", move || {
        let c = c.clone();
        async move {
            c.fetch_add(1, Ordering::SeqCst);
            (200, "vazio".to_string())
        }
    })
    .await;
    let region = MemoryRegion::new();
    let handler = validar(&common::test_config(addr), StaticForm::new("form-documentos"), &region);

    let outcome = handler.on_submit(&mut SubmitEvent::new("form-documentos")).await;

    assert!(outcome.is_rendered());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(region.content(), "vazio");
}

#[tokio::test]
async fn test_last_response_to_arrive_wins() {
    let calls = Arc::new(AtomicU32::new(0));
    let c = calls.clone();
    let addr = common::start_programmable_endpoint("/validar", move || {
        let c = c.clone();
        async move {
            if c.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(500)).await;
                (200, "first submission".to_string())
            } else {
                (200, "second submission".to_string())
            }
        }
    })
    .await;
    let region = MemoryRegion::new();
    let handler = Arc::new(validar(
        &common::test_config(addr),
        StaticForm::new("form-documentos"),
        &region,
    ));

    let slow = {
        let handler = handler.clone();
        tokio::spawn(async move { handler.on_submit(&mut SubmitEvent::new("form-documentos")).await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    let fast = handler.on_submit(&mut SubmitEvent::new("form-documentos")).await;
    assert!(fast.is_rendered());
    assert_eq!(region.content(), "second submission");

    assert!(slow.await.unwrap().is_rendered());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    // The earlier submission finished last, so its response is what remains.
    assert_eq!(region.content(), "first submission");
}

//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use form_relay::RelayConfig;
use tokio::net::TcpListener;

/// Serve a router on an ephemeral local port.
pub async fn start_mock_server(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

/// Serve one POST endpoint whose status and body come from `f`.
#[allow(dead_code)]
pub async fn start_programmable_endpoint<F, Fut>(path: &str, f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let f = Arc::new(f);
    let router = Router::new().route(
        path,
        post(move || {
            let f = f.clone();
            async move {
                let (status, body) = f().await;
                (StatusCode::from_u16(status).unwrap(), body)
            }
        }),
    );
    start_mock_server(router).await
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Defaults pointed at a local mock, bypassing any environment proxy.
pub fn test_config(addr: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.server.base_url = format!("http://{}", addr);
    config.server.system_proxy = false;
    config.timeouts.request_secs = 5;
    config
}

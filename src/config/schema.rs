//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the form relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Server the forms are submitted to.
    pub server: ServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Submission handler settings.
    pub handlers: HandlerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Target server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the endpoint paths are joined onto (e.g., "http://127.0.0.1:5000").
    pub base_url: String,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            system_proxy: true,
        }
    }
}

/// Timeout configuration for outgoing submissions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Endpoint paths and failure behavior of the two handlers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Path the `form` element is posted to.
    pub documentos_endpoint: String,

    /// Path the `form-documentos` element is posted to.
    pub validar_endpoint: String,

    /// Write failures into the result region instead of only logging them.
    pub surface_errors: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            documentos_endpoint: "/documentos".to_string(),
            validar_endpoint: "/validar".to_string(),
            surface_errors: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

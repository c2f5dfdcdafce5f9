//! HTTP client construction and endpoint resolution.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::{ServerConfig, TimeoutConfig};

/// Build the client shared by every handler of a page.
pub fn build_client(server: &ServerConfig, timeouts: &TimeoutConfig) -> reqwest::Result<Client> {
    let mut builder = Client::builder()
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .timeout(Duration::from_secs(timeouts.request_secs));
    if !server.system_proxy {
        builder = builder.no_proxy();
    }
    builder.build()
}

/// Resolve an endpoint path against the server base URL.
///
/// Absolute paths replace the base path, as a browser resolves `fetch('/x')`.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
    Url::parse(base_url)?.join(path)
}

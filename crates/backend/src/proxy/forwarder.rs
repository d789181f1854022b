use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{HeaderMap, Method};
use axum::response::{IntoResponse, Response};

use super::error::ProxyError;
use super::{headers, path_guard};
use crate::shared::config::ProxyConfig;
use crate::shared::format::truncate_for_log;

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
];

/// Shared state of the proxy route
pub struct ProxyState {
    client: reqwest::Client,
    prefix: String,
    base_url: String,
    timeout: Duration,
    allowed_prefixes: Vec<String>,
}

impl ProxyState {
    pub fn new(config: &ProxyConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            prefix: config.prefix.clone(),
            base_url: config.internal_base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(config.timeout_ms),
            allowed_prefixes: config.allowed_prefixes.clone(),
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }

    /// Request path with the public prefix removed
    fn remaining_path<'a>(&self, full_path: &'a str) -> &'a str {
        full_path.strip_prefix(self.prefix.as_str()).unwrap_or(full_path)
    }
}

/// Handler for every request under the proxy prefix
pub async fn forward(
    State(state): State<Arc<ProxyState>>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    inbound_headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    if !ALLOWED_METHODS.contains(&method) {
        return Err(ProxyError::MethodNotAllowed(method));
    }

    let path = path_guard::validate_path(state.remaining_path(uri.path()), &state.allowed_prefixes)
        .map_err(|reason| {
            tracing::warn!("Proxy rejected path {}: {}", uri.path(), reason);
            ProxyError::from(reason)
        })?;

    let mut url = format!("{}/{}", state.base_url, path);
    if let Some(query) = uri.query() {
        url.push('?');
        url.push_str(query);
    }

    let mut request = state
        .client
        .request(method.clone(), &url)
        .headers(headers::forwarded_request_headers(&inbound_headers));
    if method != Method::GET && !body.is_empty() {
        request = request.body(body);
    }

    let exchange = async move {
        let response = request.send().await?;
        let status = response.status();
        let upstream_headers = response.headers().clone();
        let bytes = response.bytes().await?;
        Ok::<_, reqwest::Error>((status, upstream_headers, bytes))
    };

    match tokio::time::timeout(state.timeout, exchange).await {
        Err(_) => {
            tracing::warn!(
                "Proxy timeout after {} ms: {} {}",
                state.timeout_ms(),
                method,
                path
            );
            Err(ProxyError::Timeout(state.timeout_ms()))
        }
        Ok(Err(e)) => {
            tracing::error!(
                "Proxy transport error for {} {}: {}",
                method,
                path,
                truncate_for_log(&e.to_string(), 300)
            );
            Err(ProxyError::Upstream(e.to_string()))
        }
        Ok(Ok((status, upstream_headers, bytes))) => {
            if status.is_server_error() {
                tracing::warn!("Internal service answered {} for {} {}", status, method, path);
            }
            Ok((status, headers::response_headers(&upstream_headers), bytes).into_response())
        }
    }
}

use super::scrub::sanitize_error_text;
use crate::config::HttpConfig;
use crate::error::{FetchError, Result};
use crate::request::RequestSpec;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub fn build_http_client(config: &HttpConfig) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(config.user_agent.as_str())
        .pool_max_idle_per_host(2)
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Executes a [`RequestSpec`] and decodes the JSON reply.
///
/// A non-2xx status, a network error, and an undecodable body all collapse
/// into [`FetchError::RequestFailed`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Self {
        Self {
            client: build_http_client(config),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn execute(&self, spec: &RequestSpec) -> Result<Value> {
        let credential = spec
            .header("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "));
        let fail = |message: String| {
            FetchError::RequestFailed(sanitize_error_text(&message, credential))
        };

        let mut request = self
            .client
            .request(spec.method.to_reqwest(), spec.url.as_str());
        for (name, value) in &spec.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &spec.body {
            request = request.body(body.clone());
        }

        tracing::info!(
            method = %spec.method,
            host = spec.url.host_str().unwrap_or_default(),
            path = spec.url.path(),
            "sending request"
        );

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "request transport failure");
            fail(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "upstream returned non-success status");
            let reason = status.canonical_reason().unwrap_or_default();
            return Err(fail(
                format!("API request failed: {} {reason}", status.as_u16())
                    .trim_end()
                    .to_string(),
            ));
        }

        let value = response.json::<Value>().await.map_err(|e| {
            tracing::warn!(error = %e, "response body is not JSON");
            fail(format!("invalid JSON response: {e}"))
        })?;

        tracing::info!(status = status.as_u16(), "request succeeded");
        Ok(value)
    }
}

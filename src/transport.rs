/*!
 * HTTP transport seam.
 *
 * The retrieval pipeline never talks to reqwest directly; it goes through
 * the `Transport` trait so tests can script responses and host
 * applications can plug in their own client (pooling, proxies, retries at
 * the socket level all live behind this seam). `HttpTransport` is the
 * production implementation.
 */

use std::fmt::Debug;
use std::time::Duration;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// Minimal view of an HTTP response, enough for the pipeline to act on
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status_code: u16,
    /// Reason phrase for the status, empty if the transport has none
    pub reason_phrase: String,
    /// Response body decoded as text
    pub body: String,
}

impl TransportResponse {
    /// True if the status code indicates a failed request
    pub fn is_error(&self) -> bool {
        self.status_code >= 400
    }
}

/// Common trait for HTTP transports used by the pipeline
///
/// One call maps to one request attempt. Timeouts, cancellation and
/// transient-failure retries are the implementation's business; the
/// pipeline treats every call as blocking to completion or failure.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
    /// Send a request and return the response, however unsuccessful.
    ///
    /// # Arguments
    /// * `method` - HTTP method name, e.g. "GET"
    /// * `url` - Absolute request URL
    /// * `headers` - Header name/value pairs to attach
    ///
    /// # Returns
    /// * `Result<TransportResponse>` - The response, or an error if the
    ///   request could not be completed at all
    async fn send(
        &self,
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse>;
}

/// Production transport backed by a pooled reqwest client
#[derive(Debug)]
pub struct HttpTransport {
    /// HTTP client for making requests
    client: Client,
}

impl HttpTransport {
    /// Default request timeout in seconds
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Create a transport with the default timeout
    pub fn new() -> Self {
        Self::with_config(Self::DEFAULT_TIMEOUT_SECS)
    }

    /// Create a transport with an explicit request timeout
    ///
    /// Uses connection pooling and TCP keepalive so that the watch-page
    /// fetch, the consent retry and the caption-track fetches reuse one
    /// connection where possible.
    pub fn with_config(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        method: &str,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse> {
        let method = method
            .parse::<reqwest::Method>()
            .map_err(|_| anyhow!("Unsupported HTTP method: {}", method))?;

        let mut request = self.client.request(method, url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        debug!("Sending request to {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Failed to send request to {}: {}", url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read response body from {}: {}", url, e))?;

        Ok(TransportResponse {
            status_code: status.as_u16(),
            reason_phrase: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

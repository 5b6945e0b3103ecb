//! HTTP/2 transport seam.
//!
//! [`Transport`] is the boundary between request assembly and the network.
//! The production implementation is [`ReqwestTransport`]; tests substitute
//! stubs to exercise the orchestration without sockets.

use std::time::Duration;

use async_trait::async_trait;

use crate::request::AssembledRequest;

/// A raw gateway response, before interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// The echoed `apns-id` response header, if present.
    pub apns_id: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

/// Errors surfaced by a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The deadline elapsed before a response arrived.
    #[error("request deadline elapsed")]
    Timeout,
    /// Connection, TLS, or stream failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Executes assembled requests against the gateway.
///
/// Implementations must honor the deadline by failing with
/// [`TransportError::Timeout`] instead of blocking indefinitely, and are
/// expected to multiplex concurrent sends over their connections.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute one request and return the raw response.
    async fn execute(
        &self,
        request: &AssembledRequest,
        deadline: Duration,
    ) -> Result<RawResponse, TransportError>;
}

/// Production transport speaking HTTP/2 to the gateway host.
pub struct ReqwestTransport {
    client: reqwest::Client,
    host: String,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Build a transport for the given gateway host.
    ///
    /// APNs requires HTTP/2. Force it via `http2_prior_knowledge` — ALPN
    /// alone isn't enough because reqwest defaults to HTTP/1.1 unless told
    /// otherwise.
    pub fn new(host: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .http2_prior_knowledge()
            .build()?;
        Ok(Self {
            client,
            host: host.into(),
        })
    }

    /// Build a transport around an existing client, e.g. one shared across
    /// services.
    #[must_use]
    pub fn with_client(client: reqwest::Client, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("https://{}:443{}", self.host, path)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: &AssembledRequest,
        deadline: Duration,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .request(request.method.clone(), self.url_for(&request.path))
            .headers(request.headers.clone())
            .body(request.body.clone())
            .timeout(deadline)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let apns_id = response
            .headers()
            .get("apns-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let body = response.bytes().await.map_err(classify)?.to_vec();

        Ok(RawResponse {
            status,
            apns_id,
            body,
        })
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Http(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_http2_client() {
        let transport = ReqwestTransport::new("api.sandbox.push.apple.com");
        assert!(transport.is_ok());
    }

    #[test]
    fn url_includes_host_port_and_path() {
        let transport = ReqwestTransport::new("api.push.apple.com").unwrap();
        assert_eq!(
            transport.url_for("/3/device/abc123"),
            "https://api.push.apple.com:443/3/device/abc123"
        );
    }
}

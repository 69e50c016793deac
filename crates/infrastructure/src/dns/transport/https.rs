//! HTTPS Transport for DNS queries: DNS-over-HTTPS (RFC 8484)
//!
//! Sends DNS queries as HTTP POST requests with `application/dns-message` content type.
//! The request body is the raw DNS wire format message, and the response body
//! contains the raw DNS wire format response.
//!
//! Wire format (HTTP):
//! ```text
//! POST /dns-query HTTP/2
//! Content-Type: application/dns-message
//! Accept: application/dns-message
//!
//! <raw DNS message bytes>
//! ```
//!
//! Redirects are never followed. A 3xx is reported as a failure like any
//! other non-200.

use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::UpstreamExchange;
use ferrous_doh_domain::DomainError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{redirect, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// Expected content type for DNS-over-HTTPS messages (RFC 8484 §4.2.1)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// Bytes of a non-200 body kept for the debug log.
const MAX_ERROR_BODY_CAPTURE: usize = 512;

const MAX_IDLE_CONNECTIONS: usize = 4;

/// DNS-over-HTTPS transport (RFC 8484)
pub struct HttpsTransport {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpsTransport {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        let url = url.into();
        Url::parse(&url)
            .map_err(|e| DomainError::InvalidUpstreamUrl(format!("{}: {}", url, e)))?;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .connect_timeout(timeout)
            .redirect(redirect::Policy::none())
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .build()
            .map_err(|e| DomainError::UpstreamRequest {
                url: url.clone(),
                reason: format!("failed to build HTTPS client: {}", e),
            })?;

        Ok(Self {
            url,
            timeout,
            client,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::UpstreamTimeout {
                url: self.url.clone(),
            }
        } else {
            DomainError::UpstreamRequest {
                url: self.url.clone(),
                reason: e.to_string(),
            }
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::UpstreamTimeout {
            url: self.url.clone(),
        }
    }

    /// Best-effort read of an error body for diagnostics; failures are ignored.
    async fn log_error_body(&self, mut response: reqwest::Response) {
        let mut captured = Vec::new();
        while captured.len() < MAX_ERROR_BODY_CAPTURE {
            match tokio::time::timeout(self.timeout, response.chunk()).await {
                Ok(Ok(Some(chunk))) => captured.extend_from_slice(&chunk),
                _ => break,
            }
        }
        captured.truncate(MAX_ERROR_BODY_CAPTURE);

        if !captured.is_empty() {
            debug!(
                url = %self.url,
                body = %String::from_utf8_lossy(&captured),
                "DoH error body"
            );
        }
    }
}

#[async_trait]
impl UpstreamExchange for HttpsTransport {
    async fn exchange(&self, query: &[u8]) -> Result<Bytes, DomainError> {
        debug!(
            url = %self.url,
            message_len = query.len(),
            "Sending DoH query"
        );

        // POST with application/dns-message (RFC 8484 §4.1)
        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(&self.url)
                .header(CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
                .header(ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
                .body(Bytes::copy_from_slice(query))
                .send(),
        )
        .await
        .map_err(|_| self.timeout_error())?
        .map_err(|e| self.request_error(e))?;

        let status = response.status();

        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("<none>")
                .to_string();
            return Err(DomainError::UpstreamRedirect {
                url: self.url.clone(),
                status: status.as_u16(),
                location,
            });
        }

        if status != StatusCode::OK {
            self.log_error_body(response).await;
            return Err(DomainError::UpstreamStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        // Read response body (raw DNS message)
        let response_bytes = tokio::time::timeout(self.timeout, response.bytes())
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| self.request_error(e))?;

        if response_bytes.is_empty() {
            return Err(DomainError::EmptyUpstreamResponse {
                url: self.url.clone(),
            });
        }

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        Ok(response_bytes)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_transport_creation() {
        let transport =
            HttpsTransport::new("https://1.1.1.1/dns-query", Duration::from_secs(4)).unwrap();
        assert_eq!(transport.endpoint(), "https://1.1.1.1/dns-query");
        assert_eq!(transport.timeout(), Duration::from_secs(4));
    }

    #[test]
    fn test_https_transport_google() {
        let transport =
            HttpsTransport::new("https://dns.google/dns-query", Duration::from_secs(4)).unwrap();
        assert_eq!(transport.endpoint(), "https://dns.google/dns-query");
    }

    #[test]
    fn test_https_transport_rejects_unparseable_url() {
        let result = HttpsTransport::new("not a url", Duration::from_secs(4));
        assert!(matches!(result, Err(DomainError::InvalidUpstreamUrl(_))));
    }
}

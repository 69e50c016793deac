use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_domain::DomainError;

/// One request/response round trip with the upstream resolver.
///
/// Implementations forward `query` unmodified and return the raw response
/// message. They do not retry; every timeout or transport error is an `Err`.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(&self, query: &[u8]) -> Result<Bytes, DomainError>;

    /// Human-readable endpoint for logs.
    fn endpoint(&self) -> &str;
}

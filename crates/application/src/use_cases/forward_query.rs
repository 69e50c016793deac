use crate::ports::UpstreamExchange;
use bytes::Bytes;
use ferrous_doh_domain::dns_wire::{build_servfail, inspect_question};
use ferrous_doh_domain::ClientEndpoint;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// What goes back to the client for one query, before transport shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyReply {
    /// Upstream response, byte-for-byte as received.
    Answer(Bytes),
    /// Synthesized SERVFAIL echoing the client's question.
    ServFail(Vec<u8>),
}

impl ProxyReply {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Answer(bytes) => &bytes[..],
            Self::ServFail(bytes) => &bytes[..],
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_servfail(&self) -> bool {
        matches!(self, Self::ServFail(_))
    }
}

/// Forwards one query to the DoH upstream and decides the reply.
///
/// Upstream failures never escape: any `Err` from the port becomes a
/// SERVFAIL built from the query itself.
pub struct ForwardQueryUseCase {
    upstream: Arc<dyn UpstreamExchange>,
}

impl ForwardQueryUseCase {
    pub fn new(upstream: Arc<dyn UpstreamExchange>) -> Self {
        Self { upstream }
    }

    pub async fn execute(&self, query: &[u8], client: &ClientEndpoint) -> ProxyReply {
        let question = inspect_question(query);
        info!(
            client = %client.addr,
            transport = %client.transport,
            question = %question,
            "DNS query received"
        );

        let start = Instant::now();
        match self.upstream.exchange(query).await {
            Ok(response) => {
                debug!(
                    upstream = self.upstream.endpoint(),
                    response_len = response.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "DoH exchange completed"
                );
                ProxyReply::Answer(response)
            }
            Err(e) => {
                warn!(
                    client = %client.addr,
                    transport = %client.transport,
                    question = %question,
                    error = %e,
                    "DoH exchange failed, answering SERVFAIL"
                );
                Self::servfail(query)
            }
        }
    }

    pub fn servfail(query: &[u8]) -> ProxyReply {
        ProxyReply::ServFail(build_servfail(query))
    }
}

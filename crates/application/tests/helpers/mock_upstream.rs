#![allow(dead_code)]
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::UpstreamExchange;
use ferrous_doh_domain::DomainError;
use std::sync::Mutex;

pub const MOCK_ENDPOINT: &str = "https://mock.invalid/dns-query";

pub struct MockUpstream {
    response: Result<Bytes, DomainError>,
    received: Mutex<Vec<Vec<u8>>>,
}

impl MockUpstream {
    pub fn answering(response: impl Into<Bytes>) -> Self {
        Self {
            response: Ok(response.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            response: Err(error),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out() -> Self {
        Self::failing(DomainError::UpstreamTimeout {
            url: MOCK_ENDPOINT.to_string(),
        })
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstream {
    async fn exchange(&self, query: &[u8]) -> Result<Bytes, DomainError> {
        self.received.lock().unwrap().push(query.to_vec());
        self.response.clone()
    }

    fn endpoint(&self) -> &str {
        MOCK_ENDPOINT
    }
}

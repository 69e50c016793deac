#![allow(dead_code)]
use async_trait::async_trait;
use bytes::Bytes;
use ferrous_doh_application::ports::UpstreamExchange;
use ferrous_doh_domain::dns_wire::transaction_id;
use ferrous_doh_domain::DomainError;
use std::sync::Mutex;

pub const MOCK_ENDPOINT: &str = "https://mock.invalid/dns-query";

enum Behavior {
    Answer(Bytes),
    Fail,
    /// Hangs forever on the given transaction ID, answers everything else.
    StallOn { id: u16, answer: Bytes },
}

pub struct MockUpstream {
    behavior: Behavior,
    received: Mutex<Vec<Vec<u8>>>,
}

impl MockUpstream {
    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(response: impl Into<Bytes>) -> Self {
        Self::with(Behavior::Answer(response.into()))
    }

    pub fn failing() -> Self {
        Self::with(Behavior::Fail)
    }

    pub fn stalling_on(id: u16, answer: impl Into<Bytes>) -> Self {
        Self::with(Behavior::StallOn {
            id,
            answer: answer.into(),
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

        match &self.behavior {
            Behavior::Answer(answer) => Ok(answer.clone()),
            Behavior::Fail => Err(DomainError::UpstreamTimeout {
                url: MOCK_ENDPOINT.to_string(),
            }),
            Behavior::StallOn { id, answer } => {
                if transaction_id(query) == Some(*id) {
                    std::future::pending::<()>().await;
                }
                Ok(answer.clone())
            }
        }
    }

    fn endpoint(&self) -> &str {
        MOCK_ENDPOINT
    }
}

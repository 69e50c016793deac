use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The single DoH endpoint every query is forwarded to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UpstreamConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Applies to connecting and to reading the response, separately.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_url() -> String {
    "https://dns.google/dns-query".to_string()
}

fn default_timeout_ms() -> u64 {
    4000
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Shared by the UDP and TCP listeners.
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// Upper bound on exchanges processed at once, across both listeners.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Size of the datagram read buffer. Longer datagrams are cut to this size.
    #[serde(default = "default_udp_recv_buffer")]
    pub udp_recv_buffer: usize,

    /// Bound on reading one framed query from a TCP client.
    #[serde(default = "default_tcp_read_timeout_ms")]
    pub tcp_read_timeout_ms: u64,
}

impl ServerConfig {
    pub fn listen_address(&self) -> String {
        if self.bind_address.contains(':') && !self.bind_address.starts_with('[') {
            format!("[{}]:{}", self.bind_address, self.dns_port)
        } else {
            format!("{}:{}", self.bind_address, self.dns_port)
        }
    }

    pub fn tcp_read_timeout(&self) -> Duration {
        Duration::from_millis(self.tcp_read_timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            dns_port: default_dns_port(),
            workers: default_workers(),
            udp_recv_buffer: default_udp_recv_buffer(),
            tcp_read_timeout_ms: default_tcp_read_timeout_ms(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_workers() -> usize {
    8
}

fn default_udp_recv_buffer() -> usize {
    4096
}

fn default_tcp_read_timeout_ms() -> u64 {
    10_000
}

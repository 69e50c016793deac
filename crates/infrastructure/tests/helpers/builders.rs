#![allow(dead_code)]
use super::mock_upstream::MockUpstream;
use ferrous_doh_application::use_cases::ForwardQueryUseCase;
use ferrous_doh_infrastructure::dns::{TcpDnsListener, UdpListener, WorkerPool};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub const TCP_READ_TIMEOUT: Duration = Duration::from_secs(2);

/// `example.com A` query, RD set: 29 bytes.
pub fn example_query(id: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(29);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    buf.extend_from_slice(b"\x07example\x03com\x00");
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    buf
}

/// A plausible response of `len` bytes: response header, then filler.
pub fn upstream_response(id: u16, len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len.max(12)];
    buf[..2].copy_from_slice(&id.to_be_bytes());
    buf[2] = 0x81;
    buf[3] = 0x80;
    for (i, byte) in buf.iter_mut().enumerate().skip(12) {
        *byte = (i % 251) as u8;
    }
    buf.truncate(len);
    buf
}

fn loopback() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

pub async fn start_udp(upstream: Arc<MockUpstream>, workers: usize) -> SocketAddr {
    let handler = Arc::new(ForwardQueryUseCase::new(upstream));
    let listener = UdpListener::bind(loopback(), 4096, handler, WorkerPool::new(workers)).unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener.run());
    addr
}

pub async fn start_tcp(upstream: Arc<MockUpstream>, workers: usize) -> SocketAddr {
    let handler = Arc::new(ForwardQueryUseCase::new(upstream));
    let listener =
        TcpDnsListener::bind(loopback(), TCP_READ_TIMEOUT, handler, WorkerPool::new(workers))
            .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(listener.run());
    addr
}

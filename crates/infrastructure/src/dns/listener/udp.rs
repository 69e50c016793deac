use super::socket::bind_udp;
use crate::dns::worker_pool::WorkerPool;
use ferrous_doh_application::use_cases::{ForwardQueryUseCase, ProxyReply};
use ferrous_doh_domain::dns_wire::{FLAG_TC, MAX_UDP_PAYLOAD};
use ferrous_doh_domain::{ClientEndpoint, DomainError};
use std::borrow::Cow;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

/// How a datagram was answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UdpReplyKind {
    Full,
    Truncated,
    ServFail,
}

/// Applies the 512-byte UDP limit to a reply.
///
/// Upstream answers above the limit are cut to exactly 512 bytes with the TC
/// bit set so the client retries over TCP. SERVFAIL replies are sent as built.
pub fn shape_udp_reply(reply: &ProxyReply) -> (UdpReplyKind, Cow<'_, [u8]>) {
    match reply {
        ProxyReply::ServFail(bytes) => (UdpReplyKind::ServFail, Cow::Borrowed(&bytes[..])),
        ProxyReply::Answer(bytes) if bytes.len() <= MAX_UDP_PAYLOAD => {
            (UdpReplyKind::Full, Cow::Borrowed(&bytes[..]))
        }
        ProxyReply::Answer(bytes) => {
            let mut truncated = bytes[..MAX_UDP_PAYLOAD].to_vec();
            truncated[2] |= FLAG_TC;
            (UdpReplyKind::Truncated, Cow::Owned(truncated))
        }
    }
}

pub struct UdpListener {
    socket: Arc<UdpSocket>,
    handler: Arc<ForwardQueryUseCase>,
    workers: WorkerPool,
    recv_buffer_size: usize,
}

impl UdpListener {
    pub fn bind(
        socket_addr: SocketAddr,
        recv_buffer_size: usize,
        handler: Arc<ForwardQueryUseCase>,
        workers: WorkerPool,
    ) -> Result<Self, DomainError> {
        let socket = bind_udp(socket_addr)?;
        info!(bind_address = %socket_addr, "UDP socket bound");

        Ok(Self {
            socket: Arc::new(socket),
            handler,
            workers,
            recv_buffer_size,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::IoError(format!("UDP local address: {}", e)))
    }

    /// Receives datagrams until the socket fails.
    ///
    /// Each datagram is handed to the worker pool right away; the DoH exchange
    /// never runs on this loop.
    pub async fn run(self) -> Result<(), DomainError> {
        let mut recv_buf = vec![0u8; self.recv_buffer_size];

        loop {
            match self.socket.recv_from(&mut recv_buf).await {
                Ok((n, from)) => {
                    let query = recv_buf[..n].to_vec();
                    let socket = self.socket.clone();
                    let handler = self.handler.clone();
                    self.workers.submit(async move {
                        handle_datagram(socket, handler, query, from).await;
                    });
                }
                Err(e) if is_per_datagram_error(&e) => {
                    debug!(error = %e, "Ignoring UDP receive error");
                }
                Err(e) => {
                    error!(error = %e, "UDP listener stopped");
                    return Err(DomainError::IoError(format!("UDP receive failed: {}", e)));
                }
            }
        }
    }
}

async fn handle_datagram(
    socket: Arc<UdpSocket>,
    handler: Arc<ForwardQueryUseCase>,
    query: Vec<u8>,
    from: SocketAddr,
) {
    let client = ClientEndpoint::udp(from);
    let reply = handler.execute(&query, &client).await;
    let (kind, payload) = shape_udp_reply(&reply);

    match socket.send_to(&payload, from).await {
        Ok(sent) => info!(client = %from, bytes = sent, reply = ?kind, "Sent UDP response"),
        Err(e) => warn!(client = %from, error = %e, "Failed to send UDP response"),
    }
}

/// Errors that concern one datagram (e.g. an ICMP port-unreachable surfacing
/// as a reset on some platforms), not the socket.
fn is_per_datagram_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionRefused
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}

use super::framing::{
    read_framed_query, write_framed, FrameRead, WriteOutcome, MAX_TCP_MESSAGE_SIZE,
};
use super::socket::bind_tcp;
use crate::dns::worker_pool::WorkerPool;
use ferrous_doh_application::use_cases::ForwardQueryUseCase;
use ferrous_doh_domain::{ClientEndpoint, DomainError};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

/// Accepts DNS-over-TCP connections, one query and one response each.
pub struct TcpDnsListener {
    listener: TcpListener,
    handler: Arc<ForwardQueryUseCase>,
    workers: WorkerPool,
    read_timeout: Duration,
}

impl TcpDnsListener {
    pub fn bind(
        socket_addr: SocketAddr,
        read_timeout: Duration,
        handler: Arc<ForwardQueryUseCase>,
        workers: WorkerPool,
    ) -> Result<Self, DomainError> {
        let listener = bind_tcp(socket_addr)?;
        info!(bind_address = %socket_addr, "TCP socket bound");

        Ok(Self {
            listener,
            handler,
            workers,
            read_timeout,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.listener
            .local_addr()
            .map_err(|e| DomainError::IoError(format!("TCP local address: {}", e)))
    }

    /// Accepts connections until the listener fails. Every connection is
    /// handed to the worker pool; no client I/O happens on this loop.
    pub async fn run(self) -> Result<(), DomainError> {
        loop {
            match self.listener.accept().await {
                Ok((stream, peer)) => {
                    let handler = self.handler.clone();
                    let read_timeout = self.read_timeout;
                    self.workers.submit(async move {
                        handle_connection(stream, peer, handler, read_timeout).await;
                    });
                }
                Err(e) if is_per_connection_error(&e) => {
                    debug!(error = %e, "Connection failed during accept");
                }
                Err(e) => {
                    error!(error = %e, "TCP listener stopped");
                    return Err(DomainError::IoError(format!("TCP accept failed: {}", e)));
                }
            }
        }
    }
}

async fn handle_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: Arc<ForwardQueryUseCase>,
    read_timeout: Duration,
) {
    let client = ClientEndpoint::tcp(peer);

    let query = match read_framed_query(&mut stream, read_timeout).await {
        FrameRead::Query(query) => query,
        abandoned => {
            debug!(
                client = %peer,
                reason = ?abandoned,
                "Abandoning TCP connection without response"
            );
            return;
        }
    };

    let mut reply = handler.execute(&query, &client).await;
    if reply.len() > MAX_TCP_MESSAGE_SIZE {
        warn!(
            client = %peer,
            response_len = reply.len(),
            "Upstream response does not fit a TCP frame, answering SERVFAIL"
        );
        reply = ForwardQueryUseCase::servfail(&query);
    }

    match write_framed(&mut stream, reply.as_bytes()).await {
        Ok(WriteOutcome::Delivered) => info!(
            client = %peer,
            bytes = reply.len(),
            servfail = reply.is_servfail(),
            "Sent TCP response"
        ),
        Ok(WriteOutcome::PeerGone) => {
            info!(client = %peer, "Client closed TCP connection before the response")
        }
        Err(e) => warn!(client = %peer, error = %e, "TCP write error"),
    }

    let _ = stream.shutdown().await;
}

fn is_per_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}

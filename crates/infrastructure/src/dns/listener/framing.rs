//! DNS-over-TCP message framing (RFC 1035 §4.2.2): a 2-byte big-endian
//! length followed by the message, in both directions.

use ferrous_doh_domain::DomainError;
use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

pub const MAX_TCP_MESSAGE_SIZE: usize = 65535;

/// Result of reading one framed query. Every variant other than `Query`
/// means the connection is abandoned without a response.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameRead {
    Query(Vec<u8>),
    /// Peer closed before both length bytes arrived.
    ShortPrefix,
    ZeroLength,
    /// Peer closed before `expected` body bytes arrived.
    TruncatedBody { expected: usize, received: usize },
    TimedOut,
}

/// How a response write ended. A peer that went away is an expected outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Delivered,
    PeerGone,
}

pub async fn read_framed_query<S>(stream: &mut S, timeout: Duration) -> FrameRead
where
    S: AsyncRead + Unpin,
{
    tokio::time::timeout(timeout, read_frame(stream))
        .await
        .unwrap_or(FrameRead::TimedOut)
}

async fn read_frame<S>(stream: &mut S) -> FrameRead
where
    S: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    if stream.read_exact(&mut len_buf).await.is_err() {
        return FrameRead::ShortPrefix;
    }

    let expected = u16::from_be_bytes(len_buf) as usize;
    if expected == 0 {
        return FrameRead::ZeroLength;
    }

    let mut body = vec![0u8; expected];
    let mut received = 0;
    while received < expected {
        match stream.read(&mut body[received..]).await {
            Ok(0) | Err(_) => return FrameRead::TruncatedBody { expected, received },
            Ok(n) => received += n,
        }
    }

    FrameRead::Query(body)
}

/// Writes `message` behind its length prefix and flushes.
///
/// Messages that do not fit a 2-byte length are refused before anything is
/// written.
pub async fn write_framed<S>(stream: &mut S, message: &[u8]) -> Result<WriteOutcome, DomainError>
where
    S: AsyncWrite + Unpin,
{
    let length = u16::try_from(message.len()).map_err(|_| {
        DomainError::IoError(format!(
            "DNS message of {} bytes exceeds the {}-byte TCP frame limit",
            message.len(),
            MAX_TCP_MESSAGE_SIZE
        ))
    })?;

    let mut frame = Vec::with_capacity(2 + message.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message);

    if let Err(e) = stream.write_all(&frame).await {
        return classify_write_error(e);
    }
    if let Err(e) = stream.flush().await {
        return classify_write_error(e);
    }

    Ok(WriteOutcome::Delivered)
}

fn classify_write_error(e: io::Error) -> Result<WriteOutcome, DomainError> {
    if is_peer_gone(&e) {
        Ok(WriteOutcome::PeerGone)
    } else {
        Err(DomainError::IoError(format!(
            "Failed to write DNS response: {}",
            e
        )))
    }
}

pub fn is_peer_gone(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::BrokenPipe
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::NotConnected
            | io::ErrorKind::WriteZero
            | io::ErrorKind::UnexpectedEof
    )
}

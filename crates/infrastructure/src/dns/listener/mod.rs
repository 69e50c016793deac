pub mod framing;
pub mod socket;
pub mod tcp;
pub mod udp;

pub use framing::{FrameRead, WriteOutcome, MAX_TCP_MESSAGE_SIZE};
pub use tcp::TcpDnsListener;
pub use udp::{shape_udp_reply, UdpListener, UdpReplyKind};

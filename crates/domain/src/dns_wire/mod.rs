//! Minimal DNS wire-format knowledge.
//!
//! Only the 12-byte header and the first question entry are ever looked at.
//! Resource records are never decoded; the proxy forwards messages as opaque
//! bytes and needs the question only for logging and for SERVFAIL synthesis.
//!
//! Header layout (RFC 1035 §4.1.1):
//! ```text
//! 0..2   ID
//! 2      QR | OPCODE(4) | AA | TC | RD
//! 3      RA | Z(3)      | RCODE(4)
//! 4..6   QDCOUNT
//! 6..8   ANCOUNT
//! 8..10  NSCOUNT
//! 10..12 ARCOUNT
//! ```

pub mod inspector;
pub mod servfail;

pub use inspector::{inspect_question, question_end, QuestionSummary};
pub use servfail::build_servfail;

pub const HEADER_LEN: usize = 12;

/// Longest label allowed by RFC 1035 §2.3.4. Larger length bytes are
/// compression pointers or garbage, and end the scan.
pub const MAX_LABEL_LEN: usize = 63;

/// Classic UDP payload limit (RFC 1035 §4.2.1).
pub const MAX_UDP_PAYLOAD: usize = 512;

// Byte 2 of the header.
pub const FLAG_QR: u8 = 0x80;
pub const FLAG_TC: u8 = 0x02;
pub const FLAG_RD: u8 = 0x01;

// Byte 3 of the header.
pub const FLAG_RA: u8 = 0x80;
pub const RCODE_SERVFAIL: u8 = 0x02;

pub fn transaction_id(message: &[u8]) -> Option<u16> {
    read_u16(message, 0)
}

pub fn question_count(message: &[u8]) -> Option<u16> {
    read_u16(message, 4)
}

pub fn is_truncated(message: &[u8]) -> bool {
    message.get(2).is_some_and(|flags| flags & FLAG_TC != 0)
}

fn read_u16(message: &[u8], offset: usize) -> Option<u16> {
    let bytes = message.get(offset..offset + 2)?;
    Some(u16::from_be_bytes([bytes[0], bytes[1]]))
}

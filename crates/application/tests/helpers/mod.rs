pub mod mock_upstream;

pub use mock_upstream::{MockUpstream, MOCK_ENDPOINT};

/// 29-byte `example.com A` query, RD set.
pub fn example_query(id: u16) -> Vec<u8> {
    let mut buf = Vec::with_capacity(29);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.extend_from_slice(&[0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    buf.extend_from_slice(b"\x07example\x03com\x00");
    buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]);
    buf
}

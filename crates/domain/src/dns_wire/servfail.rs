use super::{
    question_count, question_end, FLAG_QR, FLAG_RA, FLAG_RD, HEADER_LEN, RCODE_SERVFAIL,
};

/// How many bytes after the header are echoed when the question boundary
/// cannot be found.
pub const FALLBACK_QUESTION_LEN: usize = 5;

/// Builds a SERVFAIL reply to `request`.
///
/// The reply keeps the transaction ID, the RD bit and QDCOUNT of the request,
/// sets QR and RA, and echoes the request's first question byte-for-byte so
/// stub resolvers match it to their query. No records follow the question,
/// so ANCOUNT, NSCOUNT and ARCOUNT are zero.
///
/// Requests shorter than a header get a 12-byte all-zero message. This
/// function never panics: it runs on the failure path, where a second failure
/// would leave the client with no reply at all.
pub fn build_servfail(request: &[u8]) -> Vec<u8> {
    if request.len() < HEADER_LEN {
        return vec![0; HEADER_LEN];
    }

    let echo_end = if question_count(request) == Some(0) {
        HEADER_LEN
    } else {
        question_end(request)
            .unwrap_or_else(|| request.len().min(HEADER_LEN + FALLBACK_QUESTION_LEN))
    };

    let mut response = Vec::with_capacity(echo_end);
    response.extend_from_slice(&request[..HEADER_LEN]);

    response[2] = FLAG_QR | (request[2] & FLAG_RD);
    response[3] = FLAG_RA | RCODE_SERVFAIL;
    response[6..HEADER_LEN].fill(0);

    response.extend_from_slice(&request[HEADER_LEN..echo_end]);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_request_gets_zero_header() {
        assert_eq!(build_servfail(&[]), vec![0; 12]);
        assert_eq!(build_servfail(&[0x12, 0x34, 0x01]), vec![0; 12]);
    }

    #[test]
    fn test_header_only_request() {
        let request = [0x12, 0x34, 0x01, 0x20, 0x00, 0x00, 0, 1, 0, 1, 0, 1];
        let response = build_servfail(&request);
        assert_eq!(
            response,
            vec![0x12, 0x34, 0x81, 0x82, 0x00, 0x00, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_rd_cleared_stays_cleared() {
        let mut request = vec![0xbe, 0xef, 0x00, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        request.extend_from_slice(&[0x00, 0x00, 0x01, 0x00, 0x01]);
        let response = build_servfail(&request);
        assert_eq!(response[2], 0x80);
        assert_eq!(response[3], 0x82);
        assert_eq!(&response[12..], &request[12..]);
    }

    #[test]
    fn test_fallback_echoes_at_most_five_bytes() {
        let mut request = vec![0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0];
        // Label claims 40 bytes but only 9 follow.
        request.push(40);
        request.extend_from_slice(b"truncated");
        let response = build_servfail(&request);
        assert_eq!(response.len(), 12 + FALLBACK_QUESTION_LEN);
        assert_eq!(&response[12..], &request[12..17]);
    }

    #[test]
    fn test_fallback_on_tiny_tail() {
        let request = [0x00, 0x01, 0x01, 0x00, 0x00, 0x01, 0, 0, 0, 0, 0, 0, 0x07];
        let response = build_servfail(&request);
        assert_eq!(response.len(), 13);
    }
}

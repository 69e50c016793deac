use super::{question_count, read_u16, HEADER_LEN, MAX_LABEL_LEN};
use std::fmt;

/// Best-effort view of the first question of a message.
///
/// Each field is `None` when the bytes did not allow it to be read safely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSummary {
    /// Dot-joined labels without the trailing dot; the root name is `""`.
    pub name: Option<String>,
    pub qtype: Option<u16>,
}

impl fmt::Display for QuestionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name.as_deref() {
            Some("") => f.write_str(".")?,
            Some(name) => f.write_str(name)?,
            None => f.write_str("<unknown>")?,
        }
        match self.qtype {
            Some(qtype) => write!(f, " type={}", qtype),
            None => f.write_str(" type=?"),
        }
    }
}

/// Walk of the first QNAME.
struct NameScan<'a> {
    labels: Vec<&'a [u8]>,
    /// Offset just past the zero-length terminator.
    end: usize,
}

/// The one QNAME walker used by both the inspector and SERVFAIL synthesis.
///
/// Returns `None` when the message carries no question, a length byte is
/// above 63, or a label runs past the end of the buffer.
fn scan_name(message: &[u8]) -> Option<NameScan<'_>> {
    if question_count(message)? == 0 {
        return None;
    }

    let mut labels = Vec::new();
    let mut pos = HEADER_LEN;

    loop {
        let len = *message.get(pos)? as usize;
        pos += 1;

        if len == 0 {
            return Some(NameScan { labels, end: pos });
        }
        if len > MAX_LABEL_LEN {
            return None;
        }

        labels.push(message.get(pos..pos + len)?);
        pos += len;
    }
}

/// Extracts QNAME and QTYPE of the first question. Never panics.
///
/// Only the first question is looked at, whatever QDCOUNT says.
pub fn inspect_question(message: &[u8]) -> QuestionSummary {
    let Some(scan) = scan_name(message) else {
        return QuestionSummary::default();
    };

    let name = scan
        .labels
        .iter()
        .map(|label| String::from_utf8_lossy(label))
        .collect::<Vec<_>>()
        .join(".");

    QuestionSummary {
        name: Some(name),
        qtype: read_u16(message, scan.end),
    }
}

/// Offset just past QTYPE and QCLASS of the first question.
///
/// `None` when the question is absent or not complete in the buffer.
pub fn question_end(message: &[u8]) -> Option<usize> {
    let end = scan_name(message)?.end + 4;
    (end <= message.len()).then_some(end)
}

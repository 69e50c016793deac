#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Hand-assembled query bytes, for shapes a real encoder refuses to produce.
pub struct QueryBuilder {
    id: u16,
    recursion_desired: bool,
    qdcount: u16,
    arcount: u16,
    domain: String,
    qtype: u16,
    qclass: u16,
    trailer: Vec<u8>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            id: 0x1234,
            recursion_desired: true,
            qdcount: 1,
            arcount: 0,
            domain: "example.com".to_string(),
            qtype: 1,
            qclass: 1,
            trailer: Vec::new(),
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn recursion_desired(mut self, rd: bool) -> Self {
        self.recursion_desired = rd;
        self
    }

    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = qdcount;
        self
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    /// Appends an EDNS0 OPT pseudo-record after the question.
    pub fn with_opt_record(mut self) -> Self {
        self.arcount += 1;
        self.trailer.extend_from_slice(&[
            0x00, // root
            0x00, 0x29, // TYPE = OPT
            0x10, 0x00, // UDP payload size 4096
            0x00, 0x00, 0x00, 0x00, // extended RCODE, version, flags
            0x00, 0x00, // RDLEN
        ]);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.push(if self.recursion_desired { 0x01 } else { 0x00 });
        buf.push(0x00);
        buf.extend_from_slice(&self.qdcount.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(&self.arcount.to_be_bytes());
        for label in self.domain.split('.').filter(|l| !l.is_empty()) {
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0x00);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
        buf.extend_from_slice(&self.trailer);
        buf
    }

    /// Length of the header plus the question entry, without the trailer.
    pub fn question_end(&self) -> usize {
        self.build().len() - self.trailer.len()
    }
}

/// A query encoded by hickory, the way a stub resolver would send it.
pub fn hickory_query(id: u16, domain: &str, record_type: RecordType) -> Vec<u8> {
    let mut query = Query::new();
    query.set_name(Name::from_str(domain).unwrap());
    query.set_query_type(record_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);
    message.emit(&mut encoder).unwrap();
    buf
}

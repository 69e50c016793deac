pub mod https;

pub use https::HttpsTransport;

pub mod listener;
pub mod transport;
pub mod worker_pool;

pub use listener::{TcpDnsListener, UdpListener};
pub use transport::HttpsTransport;
pub use worker_pool::WorkerPool;

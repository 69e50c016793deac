pub mod forward_query;

pub use forward_query::{ForwardQueryUseCase, ProxyReply};

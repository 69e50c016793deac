pub mod builders;
pub mod mock_upstream;

pub use builders::{example_query, start_tcp, start_udp, upstream_response};
pub use mock_upstream::MockUpstream;

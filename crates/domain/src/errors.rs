use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid upstream URL: {0}")]
    InvalidUpstreamUrl(String),

    #[error("Upstream timeout talking to {url}")]
    UpstreamTimeout { url: String },

    #[error("Upstream request to {url} failed: {reason}")]
    UpstreamRequest { url: String, reason: String },

    #[error("Upstream {url} returned HTTP {status}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Upstream {url} answered with redirect HTTP {status} to {location}")]
    UpstreamRedirect {
        url: String,
        status: u16,
        location: String,
    },

    #[error("Upstream {url} returned an empty DNS message")]
    EmptyUpstreamResponse { url: String },

    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),
}

impl DomainError {
    /// True for every failure of the DoH exchange itself, as opposed to local socket errors.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamTimeout { .. }
                | Self::UpstreamRequest { .. }
                | Self::UpstreamStatus { .. }
                | Self::UpstreamRedirect { .. }
                | Self::EmptyUpstreamResponse { .. }
        )
    }
}

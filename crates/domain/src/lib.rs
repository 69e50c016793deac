//! Ferrous DoH Domain Layer
pub mod client;
pub mod config;
pub mod dns_wire;
pub mod errors;

pub use client::{ClientEndpoint, ClientTransport};
pub use config::{CliOverrides, Config, ConfigError};
pub use dns_wire::QuestionSummary;
pub use errors::DomainError;

//! docli library
//!
//! A DigitalOcean API client with a read-through response cache, plus the
//! configuration and CLI layers used by the `docli` binary.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod transport;

pub use api::{ApiClient, ApiError, CacheMode, DropletDefaults, Endpoints, Operation};
pub use cache::{CacheManager, ResponseCache};
pub use config::{Config, ConfigError};
pub use transport::{Envelope, Headers, ReqwestTransport, Transport, TransportError};

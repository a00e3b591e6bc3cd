//! HTTP transport abstraction
//!
//! The API client never talks to the network directly. It hands a URL and
//! a header list to a `Transport` and gets back an `Envelope` holding the
//! literal status code and the raw body. A status code is data here, not an
//! error: only failures to complete the exchange surface as `TransportError`.

mod http;

pub use http::ReqwestTransport;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Ordered request headers as `(name, value)` pairs
pub type Headers = Vec<(String, String)>;

/// The uniform result of any HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// HTTP status code as returned by the server
    pub code: u16,
    /// Raw, undecoded response payload
    pub body: String,
}

impl Envelope {
    pub fn new(code: u16, body: impl Into<String>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }
}

/// Errors raised when an HTTP exchange could not be completed
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, TLS, or body read failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request parameters could not be encoded as JSON
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Performs the network side of GET, POST, and DELETE requests
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Envelope, TransportError>;

    /// Sends `params` as a JSON object body
    async fn post(
        &self,
        url: &str,
        params: &Map<String, Value>,
        headers: &Headers,
    ) -> Result<Envelope, TransportError>;

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Envelope, TransportError>;
}

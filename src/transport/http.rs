//! reqwest-backed transport

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{Map, Value};

use super::{Envelope, Headers, Transport, TransportError};

/// Transport that executes requests with a shared `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport with default reqwest settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new transport with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Sends the request and turns any response, whatever its status, into an envelope
    async fn execute(
        &self,
        request: RequestBuilder,
        headers: &Headers,
    ) -> Result<Envelope, TransportError> {
        let request = headers
            .iter()
            .fold(request, |req, (name, value)| req.header(name.as_str(), value.as_str()));

        let response = request.send().await?;
        let code = response.status().as_u16();
        let body = response.text().await?;

        Ok(Envelope { code, body })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Envelope, TransportError> {
        self.execute(self.client.get(url), headers).await
    }

    async fn post(
        &self,
        url: &str,
        params: &Map<String, Value>,
        headers: &Headers,
    ) -> Result<Envelope, TransportError> {
        let body = serde_json::to_string(params)?;
        self.execute(self.client.post(url).body(body), headers).await
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Envelope, TransportError> {
        self.execute(self.client.delete(url), headers).await
    }
}

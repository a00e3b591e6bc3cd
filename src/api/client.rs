//! DigitalOcean API client
//!
//! `ApiClient` composes a `Transport`, a `ResponseCache`, the endpoint table,
//! and droplet defaults. Resource methods build a URL, delegate to one of the
//! three verbs, check the status against the operation's accepted set, and
//! pull the named top-level key out of the JSON body.

use std::fmt;

use parking_lot::Mutex;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::defaults::DropletDefaults;
use super::endpoints::Endpoints;
use super::error::ApiError;
use super::policy::{CacheMode, Operation};
use crate::cache::ResponseCache;
use crate::transport::{Envelope, Headers, Transport};

/// Client for the DigitalOcean v2 API with a read-through response cache
pub struct ApiClient<T, C> {
    /// Bearer token; sent on every request, never logged or cached
    token: String,
    transport: T,
    cache: C,
    endpoints: Endpoints,
    defaults: DropletDefaults,
    /// Copy of the most recent envelope that came off the network
    last_response: Mutex<Option<Envelope>>,
}

impl<T, C> fmt::Debug for ApiClient<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("token", &"<redacted>")
            .field("endpoints", &self.endpoints)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, C: ResponseCache> ApiClient<T, C> {
    /// Create a client against the public API with no droplet defaults
    pub fn new(token: impl Into<String>, transport: T, cache: C) -> Self {
        Self {
            token: token.into(),
            transport,
            cache,
            endpoints: Endpoints::default(),
            defaults: DropletDefaults::default(),
            last_response: Mutex::new(None),
        }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_defaults(mut self, defaults: DropletDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn defaults(&self) -> &DropletDefaults {
        &self.defaults
    }

    /// The last envelope returned by the transport; cache hits do not update it
    pub fn last_response(&self) -> Option<Envelope> {
        self.last_response.lock().clone()
    }

    /// Default headers followed by the caller's custom headers
    fn headers(&self, custom: &Headers) -> Headers {
        let mut headers = vec![
            ("Content-type".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
        ];
        headers.extend(custom.iter().cloned());
        headers
    }

    fn record(&self, response: &Envelope) {
        *self.last_response.lock() = Some(response.clone());
    }

    /// GET `endpoint`, consulting the cache according to `mode`
    ///
    /// A cache hit is returned as a synthesized 200 without touching the
    /// network. Anything fetched is written back to the cache whatever its
    /// status code.
    pub async fn get(
        &self,
        endpoint: &str,
        custom_headers: &Headers,
        mode: CacheMode,
    ) -> Result<Envelope, ApiError> {
        let cached = match mode {
            CacheMode::BypassCache => None,
            CacheMode::UseCacheIfPresent => self.cache.get_cached(endpoint),
            CacheMode::UseCacheOnlyIfFresh => self.cache.get_cached_unless_expired(endpoint),
        };

        if let Some(body) = cached.filter(|body| !body.is_empty()) {
            debug!(endpoint, ?mode, "cache hit");
            return Ok(Envelope::new(200, body));
        }

        debug!(endpoint, ?mode, "GET");
        let response = self
            .transport
            .get(endpoint, &self.headers(custom_headers))
            .await?;
        self.record(&response);

        if let Err(e) = self.cache.save(&response.body, endpoint) {
            warn!(endpoint, error = %e, "failed to write response cache");
        }

        Ok(response)
    }

    /// POST `params` as JSON to `endpoint`; never touches the cache
    pub async fn post(
        &self,
        endpoint: &str,
        params: &Map<String, Value>,
        custom_headers: &Headers,
    ) -> Result<Envelope, ApiError> {
        debug!(endpoint, "POST");
        let response = self
            .transport
            .post(endpoint, params, &self.headers(custom_headers))
            .await?;
        self.record(&response);
        Ok(response)
    }

    /// DELETE `endpoint`; never touches the cache
    pub async fn delete(
        &self,
        endpoint: &str,
        custom_headers: &Headers,
    ) -> Result<Envelope, ApiError> {
        debug!(endpoint, "DELETE");
        let response = self
            .transport
            .delete(endpoint, &self.headers(custom_headers))
            .await?;
        self.record(&response);
        Ok(response)
    }

    /// Lists all droplets on the account
    pub async fn get_droplets(&self, mode: CacheMode) -> Result<Vec<Value>, ApiError> {
        self.read_list(Operation::ListDroplets, self.endpoints.droplets(), mode)
            .await
    }

    /// Fetches a single droplet; `None` if the body has no `droplet` key
    pub async fn get_droplet(&self, id: &str, mode: CacheMode) -> Result<Option<Value>, ApiError> {
        let endpoint = self.endpoints.droplet(id);
        let response = self.get(&endpoint, &Headers::new(), mode).await?;
        check_status(Operation::GetDroplet, &endpoint, &response)?;
        Ok(extract(Operation::GetDroplet, &response.body))
    }

    /// Creates a droplet from `params` layered over the configured defaults
    ///
    /// # Errors
    /// * `ApiError::MissingArgument("name")` if `params` has no non-null `name`;
    ///   nothing is sent in that case
    /// * `ApiError::InvalidResponseCode` if the status is not 200, 202 or 204
    pub async fn create_droplet(
        &self,
        params: Map<String, Value>,
    ) -> Result<Option<Value>, ApiError> {
        if params.get("name").map_or(true, Value::is_null) {
            return Err(ApiError::MissingArgument("name"));
        }

        let endpoint = self.endpoints.droplets();
        let params = self.defaults.merge(params);
        let response = self.post(&endpoint, &params, &Headers::new()).await?;
        check_status(Operation::CreateDroplet, &endpoint, &response)?;
        Ok(extract(Operation::CreateDroplet, &response.body))
    }

    /// Destroys a droplet; `Ok(())` means the provider accepted the request
    pub async fn destroy_droplet(&self, id: &str) -> Result<(), ApiError> {
        let endpoint = self.endpoints.droplet(id);
        let response = self.delete(&endpoint, &Headers::new()).await?;
        check_status(Operation::DestroyDroplet, &endpoint, &response)
    }

    /// Lists images of `image_type` (`distribution` when `None`)
    pub async fn get_images(
        &self,
        image_type: Option<&str>,
        mode: CacheMode,
    ) -> Result<Vec<Value>, ApiError> {
        self.read_list(Operation::ListImages, self.endpoints.images(image_type), mode)
            .await
    }

    pub async fn get_regions(&self, mode: CacheMode) -> Result<Vec<Value>, ApiError> {
        self.read_list(Operation::ListRegions, self.endpoints.regions(), mode)
            .await
    }

    pub async fn get_sizes(&self, mode: CacheMode) -> Result<Vec<Value>, ApiError> {
        self.read_list(Operation::ListSizes, self.endpoints.sizes(), mode)
            .await
    }

    /// Lists the SSH keys registered on the account
    pub async fn get_keys(&self, mode: CacheMode) -> Result<Vec<Value>, ApiError> {
        self.read_list(Operation::ListKeys, self.endpoints.ssh_keys(), mode)
            .await
    }

    async fn read_list(
        &self,
        operation: Operation,
        endpoint: String,
        mode: CacheMode,
    ) -> Result<Vec<Value>, ApiError> {
        let response = self.get(&endpoint, &Headers::new(), mode).await?;
        check_status(operation, &endpoint, &response)?;
        Ok(extract_list(operation, &response.body))
    }
}

fn check_status(operation: Operation, endpoint: &str, response: &Envelope) -> Result<(), ApiError> {
    if operation.accepts(response.code) {
        return Ok(());
    }
    Err(ApiError::InvalidResponseCode {
        operation,
        code: response.code,
        endpoint: endpoint.to_string(),
    })
}

/// Pulls the operation's top-level key out of `body`
///
/// An unparsable body or a missing key means "no data", not an error.
fn extract(operation: Operation, body: &str) -> Option<Value> {
    let key = operation.response_key()?;
    let mut decoded: Value = serde_json::from_str(body).ok()?;
    decoded.get_mut(key).map(Value::take)
}

fn extract_list(operation: Operation, body: &str) -> Vec<Value> {
    match extract(operation, body) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

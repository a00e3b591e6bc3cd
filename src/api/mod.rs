//! DigitalOcean API client core
//!
//! This module contains the client, its cache policy, the per-operation
//! status table, endpoint construction, and droplet defaults.

pub mod client;
pub mod defaults;
pub mod endpoints;
pub mod error;
pub mod policy;

pub use client::ApiClient;
pub use defaults::DropletDefaults;
pub use endpoints::{Endpoints, DEFAULT_BASE_URL, DEFAULT_IMAGE_TYPE};
pub use error::ApiError;
pub use policy::{CacheMode, Operation};

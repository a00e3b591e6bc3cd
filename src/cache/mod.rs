//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists raw API response bodies
//! to the filesystem with a configurable TTL, and the `ResponseCache` trait the
//! API client reads and writes through. Expired entries remain readable so a
//! caller can ask for "whatever is there" instead of "only fresh data".

mod manager;
mod store;

pub use manager::{CacheManager, CachedData, DEFAULT_TTL_SECONDS};
pub use store::ResponseCache;

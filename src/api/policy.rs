//! Per-call cache policy and per-operation response expectations

use std::fmt;

/// How a read call treats the response cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheMode {
    /// Serve a cached body only while it is unexpired; otherwise fetch and refresh
    #[default]
    UseCacheOnlyIfFresh,
    /// Never read the cache; always fetch, then overwrite the cache
    BypassCache,
    /// Serve any cached body, expired or not; fetch only on a miss
    UseCacheIfPresent,
}

impl From<i32> for CacheMode {
    /// Maps the legacy force-update integer: `>= 1` bypasses, `-1` accepts
    /// stale entries, anything else requires freshness.
    fn from(force_update: i32) -> Self {
        match force_update {
            n if n >= 1 => CacheMode::BypassCache,
            -1 => CacheMode::UseCacheIfPresent,
            _ => CacheMode::UseCacheOnlyIfFresh,
        }
    }
}

/// Resource operations exposed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListDroplets,
    GetDroplet,
    CreateDroplet,
    DestroyDroplet,
    ListImages,
    ListRegions,
    ListSizes,
    ListKeys,
}

/// Codes accepted by plain reads
const OK_ONLY: &[u16] = &[200];

/// Droplet lifecycle calls may complete asynchronously on the provider side
const LIFECYCLE: &[u16] = &[200, 202, 204];

impl Operation {
    /// Status codes treated as success for this operation
    pub fn accepted_codes(self) -> &'static [u16] {
        match self {
            Operation::GetDroplet | Operation::CreateDroplet | Operation::DestroyDroplet => {
                LIFECYCLE
            }
            Operation::ListDroplets
            | Operation::ListImages
            | Operation::ListRegions
            | Operation::ListSizes
            | Operation::ListKeys => OK_ONLY,
        }
    }

    pub fn accepts(self, code: u16) -> bool {
        self.accepted_codes().contains(&code)
    }

    /// Top-level JSON key holding the payload, if the operation returns one
    pub fn response_key(self) -> Option<&'static str> {
        match self {
            Operation::ListDroplets => Some("droplets"),
            Operation::GetDroplet | Operation::CreateDroplet => Some("droplet"),
            Operation::DestroyDroplet => None,
            Operation::ListImages => Some("images"),
            Operation::ListRegions => Some("regions"),
            Operation::ListSizes => Some("sizes"),
            Operation::ListKeys => Some("ssh_keys"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListDroplets => "list droplets",
            Operation::GetDroplet => "get droplet",
            Operation::CreateDroplet => "create droplet",
            Operation::DestroyDroplet => "destroy droplet",
            Operation::ListImages => "list images",
            Operation::ListRegions => "list regions",
            Operation::ListSizes => "list sizes",
            Operation::ListKeys => "list ssh keys",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_mode_from_legacy_values() {
        assert_eq!(CacheMode::from(1), CacheMode::BypassCache);
        assert_eq!(CacheMode::from(7), CacheMode::BypassCache);
        assert_eq!(CacheMode::from(0), CacheMode::UseCacheOnlyIfFresh);
        assert_eq!(CacheMode::from(-1), CacheMode::UseCacheIfPresent);
        // Only -1 means "ignore expiry"; other negatives still require freshness
        assert_eq!(CacheMode::from(-2), CacheMode::UseCacheOnlyIfFresh);
    }

    #[test]
    fn test_cache_mode_default_requires_freshness() {
        assert_eq!(CacheMode::default(), CacheMode::UseCacheOnlyIfFresh);
    }

    #[test]
    fn test_list_operations_accept_only_200() {
        for op in [
            Operation::ListDroplets,
            Operation::ListImages,
            Operation::ListRegions,
            Operation::ListSizes,
            Operation::ListKeys,
        ] {
            assert!(op.accepts(200), "{op} should accept 200");
            assert!(!op.accepts(202), "{op} should reject 202");
            assert!(!op.accepts(204), "{op} should reject 204");
        }
    }

    #[test]
    fn test_lifecycle_operations_accept_async_codes() {
        for op in [
            Operation::GetDroplet,
            Operation::CreateDroplet,
            Operation::DestroyDroplet,
        ] {
            for code in [200, 202, 204] {
                assert!(op.accepts(code), "{op} should accept {code}");
            }
            assert!(!op.accepts(201));
            assert!(!op.accepts(500));
        }
    }

    #[test]
    fn test_response_keys() {
        assert_eq!(Operation::ListDroplets.response_key(), Some("droplets"));
        assert_eq!(Operation::CreateDroplet.response_key(), Some("droplet"));
        assert_eq!(Operation::ListKeys.response_key(), Some("ssh_keys"));
        assert_eq!(Operation::DestroyDroplet.response_key(), None);
    }
}

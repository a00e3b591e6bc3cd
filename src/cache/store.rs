//! Raw response store consumed by the API client

use super::manager::{CacheManager, CachedData};

/// Key-value store for raw response bodies, keyed by endpoint URL.
///
/// Expiry is owned entirely by the implementation. The client only decides
/// which of the two reads to call.
pub trait ResponseCache: Send + Sync {
    /// Returns the stored value regardless of expiry.
    fn get_cached(&self, key: &str) -> Option<String>;

    /// Returns the stored value only while it is unexpired.
    fn get_cached_unless_expired(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn save(&self, value: &str, key: &str) -> std::io::Result<()>;
}

impl ResponseCache for CacheManager {
    fn get_cached(&self, key: &str) -> Option<String> {
        self.read::<String>(key).map(|cached| cached.data)
    }

    fn get_cached_unless_expired(&self, key: &str) -> Option<String> {
        match self.read::<String>(key) {
            Some(CachedData {
                data,
                is_expired: false,
                ..
            }) => Some(data),
            _ => None,
        }
    }

    fn save(&self, value: &str, key: &str) -> std::io::Result<()> {
        self.write(key, &value, self.ttl())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    const KEY: &str = "https://api.digitalocean.com/v2/regions";

    fn create_test_cache(ttl: Duration) -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf()).with_ttl(ttl);
        (cache, temp_dir)
    }

    #[test]
    fn test_fresh_entry_visible_to_both_reads() {
        let (cache, _dir) = create_test_cache(Duration::from_secs(600));
        cache.save("{\"regions\":[]}", KEY).unwrap();

        assert_eq!(cache.get_cached(KEY).as_deref(), Some("{\"regions\":[]}"));
        assert_eq!(
            cache.get_cached_unless_expired(KEY).as_deref(),
            Some("{\"regions\":[]}")
        );
    }

    #[test]
    fn test_expired_entry_only_visible_to_ignore_expiry_read() {
        let (cache, _dir) = create_test_cache(Duration::ZERO);
        cache.save("old", KEY).unwrap();
        std::thread::sleep(Duration::from_millis(10));

        assert_eq!(cache.get_cached(KEY).as_deref(), Some("old"));
        assert!(cache.get_cached_unless_expired(KEY).is_none());
    }

    #[test]
    fn test_missing_entry_is_none_for_both_reads() {
        let (cache, _dir) = create_test_cache(Duration::from_secs(600));

        assert!(cache.get_cached(KEY).is_none());
        assert!(cache.get_cached_unless_expired(KEY).is_none());
    }
}

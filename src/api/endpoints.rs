//! Endpoint URLs for the DigitalOcean v2 API

/// Base URL for the public DigitalOcean API
pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2";

/// Image type queried when the caller does not name one
pub const DEFAULT_IMAGE_TYPE: &str = "distribution";

/// Builds endpoint URLs from a single versioned base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    /// Use a custom base URL (a trailing slash is ignored)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn droplets(&self) -> String {
        format!("{}/droplets", self.base_url)
    }

    pub fn droplet(&self, id: &str) -> String {
        format!("{}/droplets/{}", self.base_url, id)
    }

    /// Images collection filtered by `image_type`, defaulting to distributions
    pub fn images(&self, image_type: Option<&str>) -> String {
        let image_type = image_type.unwrap_or(DEFAULT_IMAGE_TYPE);
        format!("{}/images?type={}", self.base_url, urlencoded(image_type))
    }

    pub fn regions(&self) -> String {
        format!("{}/regions", self.base_url)
    }

    pub fn sizes(&self) -> String {
        format!("{}/sizes", self.base_url)
    }

    pub fn ssh_keys(&self) -> String {
        format!("{}/account/keys", self.base_url)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.droplets(), "https://api.digitalocean.com/v2/droplets");
        assert_eq!(endpoints.droplet("42"), "https://api.digitalocean.com/v2/droplets/42");
        assert_eq!(endpoints.regions(), "https://api.digitalocean.com/v2/regions");
        assert_eq!(endpoints.sizes(), "https://api.digitalocean.com/v2/sizes");
        assert_eq!(endpoints.ssh_keys(), "https://api.digitalocean.com/v2/account/keys");
    }

    #[test]
    fn test_images_defaults_to_distribution() {
        let endpoints = Endpoints::default();
        assert_eq!(
            endpoints.images(None),
            "https://api.digitalocean.com/v2/images?type=distribution"
        );
        assert_eq!(
            endpoints.images(Some("application")),
            "https://api.digitalocean.com/v2/images?type=application"
        );
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        let endpoints = Endpoints::with_base_url("http://localhost:8080/v2/");
        assert_eq!(endpoints.droplets(), "http://localhost:8080/v2/droplets");
    }

    #[test]
    fn test_url_encoding() {
        assert_eq!(urlencoded("distribution"), "distribution");
        assert_eq!(urlencoded("a b&c=d"), "a%20b%26c%3Dd");
    }
}

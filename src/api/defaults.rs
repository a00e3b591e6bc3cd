//! Default droplet-creation parameters

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters applied to every droplet creation unless the caller overrides them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropletDefaults {
    /// Region slug, e.g. `nyc3`
    pub region: Option<String>,
    /// Size slug, e.g. `s-1vcpu-1gb`
    pub size: Option<String>,
    /// Image slug or id
    pub image: Option<String>,
    pub tags: Vec<String>,
    /// SSH key ids or fingerprints
    pub ssh_keys: Vec<String>,
}

impl DropletDefaults {
    /// Returns the configured defaults as a JSON object; unset fields are omitted
    pub fn to_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        if let Some(region) = &self.region {
            params.insert("region".to_string(), Value::from(region.as_str()));
        }
        if let Some(size) = &self.size {
            params.insert("size".to_string(), Value::from(size.as_str()));
        }
        if let Some(image) = &self.image {
            params.insert("image".to_string(), Value::from(image.as_str()));
        }
        if !self.tags.is_empty() {
            params.insert("tags".to_string(), Value::from(self.tags.clone()));
        }
        if !self.ssh_keys.is_empty() {
            params.insert("ssh_keys".to_string(), Value::from(self.ssh_keys.clone()));
        }
        params
    }

    /// Layers `overrides` on top of the defaults; caller keys win
    pub fn merge(&self, overrides: Map<String, Value>) -> Map<String, Value> {
        let mut params = self.to_params();
        params.extend(overrides);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> DropletDefaults {
        DropletDefaults {
            region: Some("ams3".to_string()),
            size: Some("s-1vcpu-1gb".to_string()),
            image: Some("ubuntu-22-04-x64".to_string()),
            tags: vec!["web".to_string()],
            ssh_keys: vec!["1234".to_string()],
        }
    }

    #[test]
    fn test_empty_defaults_produce_no_keys() {
        assert!(DropletDefaults::default().to_params().is_empty());
    }

    #[test]
    fn test_merge_keeps_defaults_and_overrides_collisions() {
        let overrides = json!({ "name": "web-1", "region": "nyc1" });
        let merged = defaults().merge(overrides.as_object().unwrap().clone());

        assert_eq!(merged["name"], "web-1");
        assert_eq!(merged["region"], "nyc1");
        assert_eq!(merged["size"], "s-1vcpu-1gb");
        assert_eq!(merged["image"], "ubuntu-22-04-x64");
        assert_eq!(merged["tags"], json!(["web"]));
        assert_eq!(merged["ssh_keys"], json!(["1234"]));
    }

    #[test]
    fn test_deserializes_partial_table() {
        let parsed: DropletDefaults = toml::from_str("region = \"sfo3\"").unwrap();
        assert_eq!(parsed.region.as_deref(), Some("sfo3"));
        assert!(parsed.tags.is_empty());
    }
}

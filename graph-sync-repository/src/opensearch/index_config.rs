//! Target index configuration.
//!
//! The index is provisioned once at startup if it does not exist yet. Only
//! shard and replica counts are set; document mappings are left to dynamic
//! mapping since property keys are not known ahead of time.

use serde_json::{json, Value};

/// Name and provisioning settings of the target index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Index name, always lowercase.
    pub name: String,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl IndexConfig {
    /// Create a config; index names are lowercased as the store requires.
    pub fn new(name: &str, number_of_shards: u32, number_of_replicas: u32) -> Self {
        Self {
            name: name.to_lowercase(),
            number_of_shards,
            number_of_replicas,
        }
    }

    /// Settings body for the create-index call.
    pub fn settings(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = IndexConfig::new("graph", 3, 0).settings();

        assert_eq!(settings["settings"]["number_of_shards"], 3);
        assert_eq!(settings["settings"]["number_of_replicas"], 0);
    }

    #[test]
    fn test_index_name_is_lowercased() {
        assert_eq!(IndexConfig::new("Index_Test", 1, 1).name, "index_test");
    }
}

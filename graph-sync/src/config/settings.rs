//! Extension settings.
//!
//! Settings are read from environment variables once at startup. A `.env`
//! file in the working directory is loaded first if present.

use std::env;
use std::str::FromStr;

use crate::GraphSyncError;
use graph_sync_pipeline::SyncConfig;
use graph_sync_repository::IndexConfig;

/// Default document store URL.
const DEFAULT_HOST: &str = "http://localhost:9200";

/// Default target index name.
const DEFAULT_INDEX_NAME: &str = "index_default";

const DEFAULT_NUMBER_OF_SHARDS: u32 = 5;
const DEFAULT_NUMBER_OF_REPLICAS: u32 = 1;
const DEFAULT_SYNC_NODES: bool = true;
const DEFAULT_SYNC_RELATIONSHIPS: bool = false;
const DEFAULT_EXECUTE_ASYNC: bool = true;
const DEFAULT_LOG_JSON: bool = false;

const HOST: &str = "GRAPH_SYNC_HOST";
const INDEX_NAME: &str = "GRAPH_SYNC_INDEX_NAME";
const NUMBER_OF_SHARDS: &str = "GRAPH_SYNC_NUMBER_OF_SHARDS";
const NUMBER_OF_REPLICAS: &str = "GRAPH_SYNC_NUMBER_OF_REPLICAS";
const SYNC_NODES: &str = "GRAPH_SYNC_SYNC_NODES";
const SYNC_RELATIONSHIPS: &str = "GRAPH_SYNC_SYNC_RELATIONSHIPS";
const EXECUTE_ASYNC: &str = "GRAPH_SYNC_EXECUTE_ASYNC";
const LOG_JSON: &str = "GRAPH_SYNC_LOG_JSON";

/// All settings of the extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    /// Document store URL, including its scheme.
    pub host: String,
    /// Target index name, lowercased.
    pub index_name: String,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
    pub sync_nodes: bool,
    pub sync_relationships: bool,
    pub execute_async: bool,
    /// Emit logs as JSON lines.
    pub log_json: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            number_of_shards: DEFAULT_NUMBER_OF_SHARDS,
            number_of_replicas: DEFAULT_NUMBER_OF_REPLICAS,
            sync_nodes: DEFAULT_SYNC_NODES,
            sync_relationships: DEFAULT_SYNC_RELATIONSHIPS,
            execute_async: DEFAULT_EXECUTE_ASYNC,
            log_json: DEFAULT_LOG_JSON,
        }
    }
}

impl SyncSettings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GRAPH_SYNC_HOST`: store URL (default: http://localhost:9200)
    /// - `GRAPH_SYNC_INDEX_NAME`: target index (default: index_default)
    /// - `GRAPH_SYNC_NUMBER_OF_SHARDS`: shards for a newly created index (default: 5)
    /// - `GRAPH_SYNC_NUMBER_OF_REPLICAS`: replicas for a newly created index (default: 1)
    /// - `GRAPH_SYNC_SYNC_NODES`: propagate node changes (default: true)
    /// - `GRAPH_SYNC_SYNC_RELATIONSHIPS`: propagate relationship changes (default: false)
    /// - `GRAPH_SYNC_EXECUTE_ASYNC`: submit without blocking the commit (default: true)
    /// - `GRAPH_SYNC_LOG_JSON`: JSON log output (default: false)
    pub fn from_env() -> Result<Self, GraphSyncError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GraphSyncError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup(HOST).unwrap_or(defaults.host);
        if !host.contains("://") {
            return Err(GraphSyncError::config(format!(
                "{} must include a scheme, got '{}'",
                HOST, host
            )));
        }

        let index_name = lookup(INDEX_NAME)
            .unwrap_or(defaults.index_name)
            .trim()
            .to_lowercase();
        if index_name.is_empty() {
            return Err(GraphSyncError::config(format!("{} must not be empty", INDEX_NAME)));
        }

        Ok(Self {
            host,
            index_name,
            number_of_shards: parse(&lookup, NUMBER_OF_SHARDS, defaults.number_of_shards)?,
            number_of_replicas: parse(&lookup, NUMBER_OF_REPLICAS, defaults.number_of_replicas)?,
            sync_nodes: parse(&lookup, SYNC_NODES, defaults.sync_nodes)?,
            sync_relationships: parse(&lookup, SYNC_RELATIONSHIPS, defaults.sync_relationships)?,
            execute_async: parse(&lookup, EXECUTE_ASYNC, defaults.execute_async)?,
            log_json: parse(&lookup, LOG_JSON, defaults.log_json)?,
        })
    }

    /// Pipeline configuration derived from these settings.
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(
            self.index_name.clone(),
            self.sync_nodes,
            self.sync_relationships,
            self.execute_async,
        )
    }

    /// Index provisioning configuration derived from these settings.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::new(&self.index_name, self.number_of_shards, self.number_of_replicas)
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T, GraphSyncError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|e| GraphSyncError::config(format!("Invalid {} '{}': {}", key, raw, e))),
    }
}

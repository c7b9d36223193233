//! Dependency initialization and wiring for the graph sync extension.

use std::sync::Arc;
use tracing::info;

use crate::config::SyncSettings;
use crate::GraphSyncError;
use graph_sync_pipeline::{IndexSyncHandler, SyncConfig};
use graph_sync_repository::{BulkIndexProvider, IndexConfig, OpenSearchClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The document store the handler writes to.
    pub provider: Arc<dyn BulkIndexProvider>,
    /// Pipeline configuration.
    pub sync_config: SyncConfig,
    /// Provisioning settings of the target index.
    pub index_config: IndexConfig,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(GraphSyncError)` - If the store client cannot be created
    pub async fn new(settings: &SyncSettings) -> Result<Self, GraphSyncError> {
        info!(
            host = %settings.host,
            index = %settings.index_name,
            sync_nodes = settings.sync_nodes,
            sync_relationships = settings.sync_relationships,
            execute_async = settings.execute_async,
            "Initializing dependencies"
        );

        let client = OpenSearchClient::new(&settings.host)
            .await
            .map_err(|e| GraphSyncError::config(format!("Failed to create OpenSearch client: {}", e)))?;

        Ok(Self::with_provider(settings, Arc::new(client)))
    }

    /// Wire dependencies around an existing provider.
    pub fn with_provider(settings: &SyncSettings, provider: Arc<dyn BulkIndexProvider>) -> Self {
        Self {
            provider,
            sync_config: settings.sync_config(),
            index_config: settings.index_config(),
        }
    }

    /// Build the transaction handler.
    pub fn handler(&self) -> IndexSyncHandler {
        IndexSyncHandler::new(&self.sync_config, Arc::clone(&self.provider))
    }
}

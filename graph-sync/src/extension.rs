//! Extension lifecycle.
//!
//! On startup the extension makes sure the target index exists and then
//! registers the sync handler with the graph store; on shutdown it
//! unregisters it again.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::config::{Dependencies, SyncSettings};
use crate::telemetry::init_tracing;
use crate::GraphSyncError;
use graph_sync_pipeline::TransactionEventHandler;

/// The graph store's registry of transaction event handlers.
pub trait GraphEngine: Send + Sync {
    fn register_transaction_event_handler(&self, handler: Arc<dyn TransactionEventHandler>);

    fn unregister_transaction_event_handler(&self, handler: &Arc<dyn TransactionEventHandler>);
}

/// Lifecycle of the sync extension inside a graph store process.
pub struct GraphSyncExtension {
    dependencies: Dependencies,
    handler: Option<Arc<dyn TransactionEventHandler>>,
}

impl GraphSyncExtension {
    pub fn new(dependencies: Dependencies) -> Self {
        Self {
            dependencies,
            handler: None,
        }
    }

    /// Build the extension from environment settings.
    ///
    /// Installs the tracing subscriber unless the host process already has
    /// one, then connects the store client.
    pub async fn from_env() -> Result<Self, GraphSyncError> {
        let settings = SyncSettings::from_env()?;
        if let Err(e) = init_tracing(settings.log_json) {
            debug!(error = %e, "Keeping existing tracing subscriber");
        }

        let dependencies = Dependencies::new(&settings).await?;
        Ok(Self::new(dependencies))
    }

    /// Whether the handler is currently registered.
    pub fn is_registered(&self) -> bool {
        self.handler.is_some()
    }

    /// Provision the index if needed and register the handler with `engine`.
    ///
    /// If the index is missing and cannot be created, a warning is logged and
    /// the handler is not registered; the graph store keeps running without
    /// index propagation.
    #[instrument(skip_all, fields(index = %self.dependencies.index_config.name))]
    pub async fn init(&mut self, engine: &dyn GraphEngine) -> Result<(), GraphSyncError> {
        let provider = &self.dependencies.provider;
        let index_config = &self.dependencies.index_config;

        match provider.health_check().await {
            Ok(true) => debug!("Store is healthy"),
            Ok(false) => warn!("Store reports an unhealthy cluster"),
            Err(e) => warn!(error = %e, "Store health check failed"),
        }

        if provider.index_exists(&index_config.name).await? {
            info!("Index already exists");
        } else if provider.create_index(index_config).await? {
            info!(
                shards = index_config.number_of_shards,
                replicas = index_config.number_of_replicas,
                "Index created"
            );
        } else {
            warn!("Index creation failed, index sync disabled");
            return Ok(());
        }

        let handler: Arc<dyn TransactionEventHandler> = Arc::new(self.dependencies.handler());
        engine.register_transaction_event_handler(Arc::clone(&handler));
        self.handler = Some(handler);

        info!("Graph index sync handler registered");
        Ok(())
    }

    /// Unregister the handler from `engine`, if it was registered.
    pub fn shutdown(&mut self, engine: &dyn GraphEngine) {
        if let Some(handler) = self.handler.take() {
            engine.unregister_transaction_event_handler(&handler);
        }
        info!("Graph index sync shut down");
    }
}

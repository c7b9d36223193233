//! Handler module for the graph sync pipeline.
//!
//! Hooks the synthesizer and submitter into the graph store's transaction
//! lifecycle: synthesize before commit, submit after commit, drop on rollback.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::config::{SubmitMode, SyncConfig};
use crate::errors::PipelineError;
use crate::submitter::{BulkSubmitter, Submission};
use crate::synthesizer::ActionSynthesizer;
use graph_sync_repository::BulkIndexProvider;
use graph_sync_shared::{ChangeSet, SyncBatch};

/// Commit hooks the graph store invokes for every transaction.
///
/// The batch returned by `before_commit` is transaction-scoped state: the
/// store hands it back to exactly one of `after_commit` or `after_rollback`.
#[async_trait]
pub trait TransactionEventHandler: Send + Sync {
    /// Runs on the committing thread before the commit is finalized.
    /// An error aborts the transaction.
    fn before_commit(&self, changes: &ChangeSet) -> Result<SyncBatch, PipelineError>;

    /// Runs once the transaction is durable.
    async fn after_commit(&self, changes: &ChangeSet, batch: SyncBatch);

    /// Runs when the transaction was rolled back.
    fn after_rollback(&self, changes: &ChangeSet, batch: SyncBatch);
}

/// Propagates committed graph changes to the search index.
pub struct IndexSyncHandler {
    synthesizer: ActionSynthesizer,
    submitter: BulkSubmitter,
    mode: SubmitMode,
}

impl IndexSyncHandler {
    /// Create a new handler for `config`, writing through `provider`.
    pub fn new(config: &SyncConfig, provider: Arc<dyn BulkIndexProvider>) -> Self {
        Self {
            synthesizer: ActionSynthesizer::new(config),
            submitter: BulkSubmitter::new(provider),
            mode: config.mode(),
        }
    }

    /// Submit a committed batch in the configured mode.
    pub async fn submit(&self, batch: SyncBatch) -> Submission {
        self.submitter.submit(batch, self.mode).await
    }
}

#[async_trait]
impl TransactionEventHandler for IndexSyncHandler {
    fn before_commit(&self, changes: &ChangeSet) -> Result<SyncBatch, PipelineError> {
        self.synthesizer.synthesize(changes)
    }

    #[instrument(skip_all, fields(actions = batch.len()))]
    async fn after_commit(&self, _changes: &ChangeSet, batch: SyncBatch) {
        self.submit(batch).await;
    }

    fn after_rollback(&self, _changes: &ChangeSet, batch: SyncBatch) {
        debug!(actions = batch.len(), "Transaction rolled back, discarding batch");
    }
}

//! Completion module for the graph sync pipeline.
//!
//! Reports the outcome of non-blocking bulk submissions. The outcome arrives
//! over a single-shot channel and is consumed exactly once; nothing is retried
//! and nothing flows back into the already committed transaction.

use tokio::sync::oneshot;
use tracing::{error, info, warn};

use graph_sync_repository::{BulkResponse, SearchIndexError};

/// Outcome of one bulk submission.
pub type BulkOutcome = Result<BulkResponse, SearchIndexError>;

/// Logs the outcome of asynchronous submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionHandler;

impl CompletionHandler {
    pub fn new() -> Self {
        Self
    }

    /// The store answered the bulk request.
    pub fn on_complete(&self, response: &BulkResponse) {
        match response.error_message() {
            None if response.is_succeeded() => {
                info!(
                    items = response.items.len(),
                    took_ms = response.took,
                    "Data transfer completed"
                );
            }
            message => {
                error!(
                    status = response.status,
                    error = %message.unwrap_or_default(),
                    "Data transfer error"
                );
            }
        }
    }

    /// The bulk request never got an answer.
    pub fn on_failure(&self, err: &SearchIndexError) {
        warn!(error = %err, "Data transfer failed");
    }

    /// Wait for the outcome on `receiver` and report it.
    pub async fn watch(self, receiver: oneshot::Receiver<BulkOutcome>) {
        match receiver.await {
            Ok(Ok(response)) => self.on_complete(&response),
            Ok(Err(err)) => self.on_failure(&err),
            Err(_) => warn!("Data transfer outcome lost: sender dropped before completion"),
        }
    }
}

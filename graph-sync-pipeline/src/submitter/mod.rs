//! Submitter module for the graph sync pipeline.
//!
//! Sends a synthesized batch to the document store as one bulk request.

use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use crate::completion::{BulkOutcome, CompletionHandler};
use crate::config::SubmitMode;
use graph_sync_repository::{BulkIndexProvider, BulkRequest};
use graph_sync_shared::SyncBatch;

/// What a call to [`BulkSubmitter::submit`] did.
#[derive(Debug)]
pub enum Submission {
    /// The batch was empty; nothing was sent.
    Empty,
    /// The request was sent and awaited. Failures have already been logged.
    Sent(BulkOutcome),
    /// The request was handed off; the handle resolves once the completion
    /// handler has reported the outcome.
    Pending(JoinHandle<()>),
}

/// Submits batches to the document store.
///
/// The submitter is responsible for:
/// - Sending exactly one bulk request per non-empty batch
/// - Logging failures without retrying, splitting or re-queueing
/// - Handing non-blocking outcomes to the completion handler
pub struct BulkSubmitter {
    provider: Arc<dyn BulkIndexProvider>,
    completion: CompletionHandler,
}

impl BulkSubmitter {
    /// Create a new submitter with the given provider.
    pub fn new(provider: Arc<dyn BulkIndexProvider>) -> Self {
        Self {
            provider,
            completion: CompletionHandler::new(),
        }
    }

    /// Submit `batch` in the given mode.
    ///
    /// Never fails: the transaction that produced the batch has already
    /// committed, so store failures are only logged.
    #[instrument(skip(self, batch), fields(actions = batch.len()))]
    pub async fn submit(&self, batch: SyncBatch, mode: SubmitMode) -> Submission {
        if batch.is_empty() {
            debug!("Nothing to submit");
            return Submission::Empty;
        }

        let request = BulkRequest::from(batch);

        match mode {
            SubmitMode::Sync => {
                let outcome = self.provider.bulk(&request).await;
                Self::log_outcome(&outcome, request.len());
                Submission::Sent(outcome)
            }
            SubmitMode::Async => {
                let (tx, rx) = oneshot::channel::<BulkOutcome>();
                let provider = Arc::clone(&self.provider);

                tokio::spawn(async move {
                    let outcome = provider.bulk(&request).await;
                    // The watcher only goes away if its task was aborted.
                    let _ = tx.send(outcome);
                });

                Submission::Pending(tokio::spawn(self.completion.watch(rx)))
            }
        }
    }

    fn log_outcome(outcome: &BulkOutcome, count: usize) {
        match outcome {
            Ok(response) => match response.error_message() {
                None => debug!(count = count, took_ms = response.took, "Bulk request succeeded"),
                Some(message) => error!(count = count, error = %message, "Bulk request had failures"),
            },
            Err(e) => error!(count = count, error = %e, "Data transfer execution error after commit"),
        }
    }
}

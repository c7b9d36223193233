//! Error types for the graph sync pipeline.
//!
//! Only synthesis can fail a transaction. Submission failures happen after
//! commit and are logged by the submitter instead of being returned.

use graph_sync_shared::DocumentError;
use thiserror::Error;

/// Errors that can occur in the graph sync pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// An entity could not be turned into a document.
    #[error("Synthesis error: {0}")]
    SynthesisError(#[from] DocumentError),
}

//! # Graph Sync Pipeline
//!
//! This crate turns the committed mutations of a graph transaction into
//! document writes against the search index.
//!
//! ## Architecture
//!
//! Each committing transaction flows through three components:
//!
//! 1. **Synthesizer**: Collapses the transaction's change set into one action per document
//! 2. **Submitter**: Sends the batch as a single bulk request, blocking or not
//! 3. **Completion**: Reports the outcome of non-blocking submissions
//!
//! The **handler** ties them to the graph store's commit hooks.

pub mod completion;
pub mod config;
pub mod errors;
pub mod handler;
pub mod submitter;
pub mod synthesizer;

#[cfg(test)]
mod test_support;

pub use completion::CompletionHandler;
pub use config::{SubmitMode, SyncConfig};
pub use errors::PipelineError;
pub use handler::{IndexSyncHandler, TransactionEventHandler};
pub use submitter::{BulkSubmitter, Submission};
pub use synthesizer::ActionSynthesizer;

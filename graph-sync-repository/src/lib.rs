//! # Graph Sync Repository
//!
//! This crate provides the document store side of the graph index sync
//! bridge: the bulk request/response types, the `BulkIndexProvider` trait the
//! pipeline submits through, and a concrete implementation for OpenSearch
//! compatible endpoints.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::BulkIndexProvider;
pub use crate::opensearch::{IndexConfig, OpenSearchClient};
pub use types::{BulkItemResult, BulkOperation, BulkRequest, BulkResponse};

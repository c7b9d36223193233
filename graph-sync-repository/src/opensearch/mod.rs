//! OpenSearch implementation of the document store.
//!
//! This module provides a concrete implementation of `BulkIndexProvider`
//! using the OpenSearch Rust client.

mod client;
mod index_config;

pub use client::OpenSearchClient;
pub use index_config::IndexConfig;

//! Bulk index provider trait definition.
//!
//! This module defines the abstract interface the sync pipeline uses to reach
//! the document store, allowing for different backend implementations
//! (OpenSearch, Elasticsearch, mocks in tests).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::opensearch::IndexConfig;
use crate::types::{BulkRequest, BulkResponse};

/// Abstracts the underlying document store.
///
/// Implementations are injected into the bulk submitter to enable dependency
/// injection and easy testing with mock implementations.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so submissions can run on
/// spawned tasks.
#[async_trait]
pub trait BulkIndexProvider: Send + Sync {
    /// Send one bulk request and return the per-item outcome.
    ///
    /// # Arguments
    ///
    /// * `request` - The ordered index/delete directives to apply
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResponse)` - The store answered, possibly with a failure status or failed items
    /// * `Err(SearchIndexError)` - The request could not be delivered or the answer could not be read
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, SearchIndexError>;

    /// Check whether the named index exists.
    async fn index_exists(&self, index_name: &str) -> Result<bool, SearchIndexError>;

    /// Create the index with the configured settings.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The store acknowledged the creation
    /// * `Ok(false)` - The store refused the creation
    /// * `Err(SearchIndexError)` - If the request fails to execute
    async fn create_index(&self, config: &IndexConfig) -> Result<bool, SearchIndexError>;

    /// Check if the store is reachable and healthy.
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}

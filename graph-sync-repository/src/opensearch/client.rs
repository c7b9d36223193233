//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `BulkIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    BulkParts, OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::BulkIndexProvider;
use crate::opensearch::index_config::IndexConfig;
use crate::types::{BulkRequest, BulkResponse};

/// OpenSearch client implementation.
///
/// Sends bulk requests to a single store node.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200").await?;
/// if !client.index_exists("graph").await? {
///     client.create_index(&IndexConfig::new("graph", 5, 1)).await?;
/// }
/// let response = client.bulk(&request).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The store URL including its scheme (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or transport setup fails
    pub async fn new(url: &str) -> Result<Self, SearchIndexError> {
        if !url.contains("://") {
            return Err(SearchIndexError::validation(format!(
                "Host '{}' is missing a scheme",
                url
            )));
        }
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }
}

#[async_trait]
impl BulkIndexProvider for OpenSearchClient {
    #[instrument(skip(self, request), fields(operations = request.len()))]
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, SearchIndexError> {
        let body: Vec<JsonBody<Value>> = request
            .body_lines()
            .into_iter()
            .map(JsonBody::new)
            .collect();

        let response = self.client.bulk(BulkParts::None).body(body).send().await?;

        let status = response.status_code();
        let text = response.text().await?;
        if !status.is_success() {
            debug!(status = %status, body = %text, "Bulk request answered with failure status");
            return Ok(BulkResponse::from_error_body(status.as_u16(), &text));
        }

        let json: Value =
            serde_json::from_str(&text).map_err(|e| SearchIndexError::parse(e.to_string()))?;
        let bulk_response = BulkResponse::from_json(status.as_u16(), &json)?;

        debug!(
            took = bulk_response.took,
            items = bulk_response.items.len(),
            errors = bulk_response.errors,
            "Bulk request answered"
        );
        Ok(bulk_response)
    }

    async fn index_exists(&self, index_name: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index_name]))
            .send()
            .await?;

        Ok(response.status_code().is_success())
    }

    #[instrument(skip(self, config), fields(index = %config.name))]
    async fn create_index(&self, config: &IndexConfig) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&config.name))
            .body(config.settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Create index request failed");
            return Ok(false);
        }

        Ok(true)
    }

    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        let healthy = matches!(
            json.get("status").and_then(Value::as_str),
            Some("green") | Some("yellow")
        );
        Ok(healthy)
    }
}

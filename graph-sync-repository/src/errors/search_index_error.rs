//! Search index error types.
//!
//! This module defines the error types that can occur while talking to the
//! document store.

use thiserror::Error;

/// Errors that can occur during document store operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to set up the connection to the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be delivered or the response not read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Failed to parse a response from the store.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to create the target index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Validation error (e.g., malformed host).
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

impl From<opensearch::Error> for SearchIndexError {
    fn from(err: opensearch::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}

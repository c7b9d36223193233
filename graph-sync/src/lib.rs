//! # Graph Sync
//!
//! Graph store extension that mirrors committed graph changes into a search
//! index.
//!
//! This crate provides the settings, dependency wiring and lifecycle for
//! running the sync pipeline inside a graph store process.

pub mod config;
pub mod extension;
pub mod telemetry;

pub use config::{Dependencies, SyncSettings};
pub use extension::{GraphEngine, GraphSyncExtension};

use thiserror::Error;

/// Errors that can occur during extension initialization.
#[derive(Error, Debug)]
pub enum GraphSyncError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] graph_sync_repository::SearchIndexError),
}

impl GraphSyncError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

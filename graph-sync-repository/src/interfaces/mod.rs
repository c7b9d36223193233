//! Interface definitions for the document store.
//!
//! This module defines the abstract `BulkIndexProvider` trait that allows
//! for dependency injection and swappable store implementations.

mod bulk_index_provider;

pub use bulk_index_provider::BulkIndexProvider;

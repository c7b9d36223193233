//! Error types for the graph sync repository.

mod search_index_error;

pub use search_index_error::SearchIndexError;

//! Error types for document construction.

use thiserror::Error;

/// Errors raised while turning graph entities into index documents.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    /// A property value cannot be represented in the document body.
    #[error("Unreadable property '{key}': {reason}")]
    UnreadableProperty { key: String, reason: String },
}

impl DocumentError {
    /// Create an unreadable property error.
    pub fn unreadable_property(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnreadableProperty {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

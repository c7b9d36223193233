//! Pipeline configuration.

/// How a batch is handed to the document store after commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Wait for the store's answer before returning.
    Sync,
    /// Return immediately; the completion handler reports the outcome.
    Async,
}

/// Immutable configuration shared by the synthesizer and the submitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Target index name.
    pub index_name: String,
    /// Whether node changes are propagated.
    pub sync_nodes: bool,
    /// Whether relationship changes are propagated.
    pub sync_relationships: bool,
    /// Whether submissions run without blocking the committing caller.
    pub execute_async: bool,
}

impl SyncConfig {
    pub fn new(
        index_name: impl Into<String>,
        sync_nodes: bool,
        sync_relationships: bool,
        execute_async: bool,
    ) -> Self {
        Self {
            index_name: index_name.into(),
            sync_nodes,
            sync_relationships,
            execute_async,
        }
    }

    /// The submission mode selected by `execute_async`.
    pub fn mode(&self) -> SubmitMode {
        if self.execute_async {
            SubmitMode::Async
        } else {
            SubmitMode::Sync
        }
    }
}

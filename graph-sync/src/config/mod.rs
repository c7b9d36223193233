//! Configuration and dependency wiring for the graph sync extension.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::SyncSettings;

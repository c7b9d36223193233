//! Tracing setup.

use tracing_subscriber::EnvFilter;

use crate::GraphSyncError;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// The level filter comes from `RUST_LOG`. With `json` set, every event is
/// written as one JSON object per line.
pub fn init_tracing(json: bool) -> Result<(), GraphSyncError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| GraphSyncError::config(format!("Failed to install tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_fails() {
        // Whichever test installs first wins; a later install must report an error.
        let _ = init_tracing(false);
        assert!(init_tracing(true).is_err());
    }
}

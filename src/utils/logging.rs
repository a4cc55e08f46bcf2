//! Structured logging setup.

use crate::config::LoggingConfig;
use tracing::info;

/// Install a global `tracing` subscriber built from `config`.
///
/// Returns `false` if a subscriber was already installed, so tests and
/// embedding applications can call this more than once.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(false);

    let installed = if config.json_format {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        info!(app = %config.app_name, level = %config.log_level, "Logging initialized");
    }
    installed
}

//! CLI runner for common setup.
//!
//! Encapsulates logging initialization and startup reporting so main stays
//! focused on wiring the session together.

use crate::error::CliError;
use tracing::info;
use waypath::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};

/// Runner that manages CLI lifecycle.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
}

impl CliRunner {
    /// Create a new CLI runner with optional debug logging.
    ///
    /// When stdout is a TTY, stdout logging is disabled to prevent
    /// interference with the step table display.
    ///
    /// # Arguments
    ///
    /// * `debug_mode` - When true, enables debug-level logging regardless of RUST_LOG
    pub fn with_debug(debug_mode: bool) -> Result<Self, CliError> {
        // Disable stdout logging when running in a TTY since the step table
        // takes over the screen
        let stdout_enabled = !atty::is(atty::Stream::Stdout);

        let logging_guard = init_logging(
            default_log_dir(),
            default_log_file(),
            stdout_enabled,
            debug_mode,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self { logging_guard })
    }

    /// Log startup information.
    pub fn log_startup(&self, destination: &str) {
        info!("Waypath v{}", waypath::VERSION);
        info!(destination, "Starting walking navigation");
    }
}

//! Logging infrastructure for Waypath.
//!
//! Provides structured logging with file output and optional console
//! output:
//! - Writes to `logs/waypath.log` (cleared on session start)
//! - Also prints to stdout when the terminal is not interactive, so the
//!   step table keeps the screen to itself during normal use
//! - Configurable via RUST_LOG environment variable

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initialize logging system.
///
/// Creates logs directory if needed, clears previous log file, and sets
/// up file output plus optional stdout output.
///
/// # Arguments
///
/// * `log_dir` - Directory for log files (e.g., "logs")
/// * `log_file` - Log filename (e.g., "waypath.log")
/// * `stdout_enabled` - Also print log lines to stdout
/// * `debug_mode` - Default the filter to `debug` instead of `info`
///
/// # Returns
///
/// LoggingGuard that must be kept alive for logging to work
///
/// # Errors
///
/// Returns error if log directory cannot be created or log file cannot be cleared
pub fn init_logging(
    log_dir: &str,
    log_file: &str,
    stdout_enabled: bool,
    debug_mode: bool,
) -> Result<LoggingGuard, io::Error> {
    // Create logs directory if it doesn't exist
    fs::create_dir_all(log_dir)?;

    // Clear previous log file by writing empty content
    // This handles both existing and non-existing files
    let log_path = Path::new(log_dir).join(log_file);
    fs::write(&log_path, "")?;

    // Create file appender with non-blocking writer
    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    // Create file layer, single-line compact format
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false) // No ANSI colors in file
        .compact();

    // Stdout layer only when the step table is not on screen
    let stdout_layer = stdout_enabled.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(true)
            .compact()
    });

    // Create env filter; RUST_LOG wins over the debug flag
    let default_directive = if debug_mode { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // Initialize global subscriber
    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Get default log directory path.
pub fn default_log_dir() -> &'static str {
    "logs"
}

/// Get default log file name.
pub fn default_log_file() -> &'static str {
    "waypath.log"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), "logs");
        assert_eq!(default_log_file(), "waypath.log");
    }

    // The global subscriber can only be installed once per process, so one
    // test drives init_logging end to end: seed a stale log file, init,
    // emit an event, and check the file holds the event but not the seed.
    // Assertions use substring matches because other tests in this process
    // may emit events into the same file once the subscriber is live.
    #[test]
    fn test_init_logging_truncates_and_captures() {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let log_dir = PathBuf::from(format!("waypath_test_logs_{}", timestamp));
        let log_dir_str = log_dir.to_str().unwrap();

        fs::create_dir_all(&log_dir).expect("Failed to create test dir");
        let log_path = log_dir.join("session.log");
        fs::write(&log_path, "line from an earlier session").expect("Failed to seed log file");

        // RUST_LOG from the environment would override the default filter
        std::env::remove_var("RUST_LOG");

        let guard =
            init_logging(log_dir_str, "session.log", false, false).expect("init_logging failed");
        tracing::info!("session bootstrap marker");

        // Dropping the guard flushes the buffered lines
        drop(guard);

        let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
        assert!(
            !contents.contains("line from an earlier session"),
            "log file should be truncated at init"
        );
        assert!(
            contents.contains("session bootstrap marker"),
            "file layer should capture events, got: {:?}",
            contents
        );

        let _ = fs::remove_dir_all(&log_dir);
    }
}

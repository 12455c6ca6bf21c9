//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;
use waypath::session::SessionError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Invalid argument combination or value
    Config(String),
    /// No Directions API key available
    MissingApiKey,
    /// The navigation session ended with an error
    Session(SessionError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::MissingApiKey => {
                eprintln!();
                eprintln!("Provide a Google Directions API key:");
                eprintln!("  1. Pass it with --api-key <KEY>");
                eprintln!("  2. Or export GOOGLE_DIRECTIONS_API_KEY=<KEY>");
                eprintln!("  3. Make sure the Directions API is enabled for your project");
            }
            CliError::Session(SessionError::InitialRoute(_)) => {
                eprintln!();
                eprintln!("Could not plan a route. Check that:");
                eprintln!("  1. The destination is spelled the way a maps search would find it");
                eprintln!("  2. Your API key is valid and has Directions API quota");
                eprintln!("  3. A walking route exists from your current position");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::MissingApiKey => write!(f, "No Google Directions API key provided"),
            CliError::Session(e) => write!(f, "Navigation failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        CliError::Session(e)
    }
}

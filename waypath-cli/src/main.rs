//! Waypath CLI - turn-by-turn walking navigation in the terminal.
//!
//! This binary wires the waypath library's navigation session to IP
//! geolocation, the Google Directions API, and a terminal display.

use clap::{Parser, ValueEnum};

use waypath::directions::{GoogleDirectionsClient, DEFAULT_DIRECTIONS_URL};
use waypath::sensors::{FixedHeading, IpinfoClient};
use waypath::session::{NavigationSession, RecomputeFailure, SessionConfig};
use waypath::tracker::{DeviationPolicy, TrackerConfig};

use crate::display::ConsoleDisplay;
use crate::error::CliError;
use crate::runner::CliRunner;

mod display;
mod error;
mod runner;

/// Environment variable consulted when --api-key is not given.
const API_KEY_ENV: &str = "GOOGLE_DIRECTIONS_API_KEY";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Flag a deviation when the distance to the current target grows
    DistanceIncreasing,
    /// Flag a deviation when no route step is within the arrival threshold
    AbsoluteThreshold,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RecomputeArg {
    /// End the session when rerouting fails
    Abort,
    /// Keep following the previous route when rerouting fails
    KeepStaleRoute,
}

#[derive(Parser)]
#[command(name = "waypath")]
#[command(about = "Walk to a destination with live turn-by-turn progress", long_about = None)]
struct Args {
    /// Destination address or place name
    destination: String,

    /// Google Directions API key (or set GOOGLE_DIRECTIONS_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Arrival threshold in meters
    #[arg(long, default_value = "50.0")]
    threshold: f64,

    /// Seconds between location samples
    #[arg(long, default_value = "10")]
    interval: u64,

    /// Direction you are facing in degrees from north (rewrites compass
    /// instructions into left/right turns)
    #[arg(long)]
    heading: Option<f64>,

    /// Deviation detection policy (default depends on --heading)
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// What to do when rerouting fails (default depends on --heading)
    #[arg(long, value_enum)]
    on_recompute_failure: Option<RecomputeArg>,

    /// Enable debug-level logging
    #[arg(long)]
    debug: bool,
}

/// Build the session config from parsed arguments.
///
/// A stated heading marks device-grade fixes, so it tightens the default
/// deviation policy to distance-increasing and the default recompute
/// behavior to abort. Coarse IP fixes default to the nearest-step check
/// and keep the stale route when rerouting fails.
fn build_config(args: &Args) -> Result<SessionConfig, CliError> {
    if !args.threshold.is_finite() || args.threshold <= 0.0 {
        return Err(CliError::Config(format!(
            "arrival threshold must be a positive number of meters, got {}",
            args.threshold
        )));
    }
    if args.interval == 0 {
        return Err(CliError::Config(
            "sample interval must be at least 1 second".to_string(),
        ));
    }
    if let Some(heading_deg) = args.heading {
        if !heading_deg.is_finite() {
            return Err(CliError::Config(format!(
                "heading must be a finite number of degrees, got {}",
                heading_deg
            )));
        }
    }

    let policy = match (args.policy, args.heading) {
        (Some(PolicyArg::DistanceIncreasing), _) => DeviationPolicy::DistanceIncreasing,
        (Some(PolicyArg::AbsoluteThreshold), _) => DeviationPolicy::AbsoluteThreshold,
        (None, Some(_)) => DeviationPolicy::DistanceIncreasing,
        (None, None) => DeviationPolicy::AbsoluteThreshold,
    };

    let on_recompute_failure = match (args.on_recompute_failure, args.heading) {
        (Some(RecomputeArg::Abort), _) => RecomputeFailure::Abort,
        (Some(RecomputeArg::KeepStaleRoute), _) => RecomputeFailure::KeepStaleRoute,
        (None, Some(_)) => RecomputeFailure::Abort,
        (None, None) => RecomputeFailure::KeepStaleRoute,
    };

    Ok(SessionConfig {
        destination: args.destination.clone(),
        tracker: TrackerConfig::new(args.threshold, policy),
        sample_interval: std::time::Duration::from_secs(args.interval),
        on_recompute_failure,
    })
}

/// Resolve the API key from the flag or the environment.
fn resolve_api_key(flag: Option<&str>) -> Result<String, CliError> {
    if let Some(key) = flag {
        return Ok(key.to_string());
    }

    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(CliError::MissingApiKey),
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let runner = match CliRunner::with_debug(args.debug) {
        Ok(runner) => runner,
        Err(e) => e.exit(),
    };
    runner.log_startup(&args.destination);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    let api_key = match resolve_api_key(args.api_key.as_deref()) {
        Ok(key) => key,
        Err(e) => e.exit(),
    };

    let directions = GoogleDirectionsClient::new(api_key, DEFAULT_DIRECTIONS_URL.to_string());
    let location = IpinfoClient::default();
    let display = ConsoleDisplay::new();

    let result = match args.heading {
        Some(heading_deg) => {
            let session = NavigationSession::with_heading(
                directions,
                location,
                FixedHeading::new(heading_deg),
                display,
                config,
            );
            session.run().await
        }
        None => {
            let session = NavigationSession::new(directions, location, display, config);
            session.run().await
        }
    };

    if let Err(e) = result {
        CliError::from(e).exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_heading() {
        let args = Args::parse_from(["waypath", "Central Park"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.destination, "Central Park");
        assert_eq!(config.tracker.arrival_threshold_m, 50.0);
        assert_eq!(config.tracker.policy, DeviationPolicy::AbsoluteThreshold);
        assert_eq!(config.sample_interval.as_secs(), 10);
        assert_eq!(config.on_recompute_failure, RecomputeFailure::KeepStaleRoute);
    }

    #[test]
    fn test_heading_tightens_defaults() {
        let args = Args::parse_from(["waypath", "Central Park", "--heading", "90"]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.tracker.policy, DeviationPolicy::DistanceIncreasing);
        assert_eq!(config.on_recompute_failure, RecomputeFailure::Abort);
    }

    #[test]
    fn test_explicit_flags_override_heading_defaults() {
        let args = Args::parse_from([
            "waypath",
            "Central Park",
            "--heading",
            "90",
            "--policy",
            "absolute-threshold",
            "--on-recompute-failure",
            "keep-stale-route",
        ]);
        let config = build_config(&args).unwrap();

        assert_eq!(config.tracker.policy, DeviationPolicy::AbsoluteThreshold);
        assert_eq!(config.on_recompute_failure, RecomputeFailure::KeepStaleRoute);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let args = Args::parse_from(["waypath", "Central Park", "--threshold", "0"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));

        let args = Args::parse_from(["waypath", "Central Park", "--threshold", "NaN"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let args = Args::parse_from(["waypath", "Central Park", "--interval", "0"]);
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn test_api_key_flag_wins() {
        let key = resolve_api_key(Some("flag-key")).unwrap();
        assert_eq!(key, "flag-key");
    }
}

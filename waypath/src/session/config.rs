//! Configuration for navigation sessions.

use std::time::Duration;

use crate::tracker::TrackerConfig;

/// Default pause between location samples.
pub const DEFAULT_SAMPLE_INTERVAL_SECS: u64 = 10;

/// What to do when fetching a replacement route fails after a deviation.
///
/// A replacement route with zero steps ends the session regardless of
/// this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecomputeFailure {
    /// End the session with an error.
    #[default]
    Abort,

    /// Keep following the stale route and try again on the next deviation.
    KeepStaleRoute,
}

/// Configuration for a [`NavigationSession`](super::NavigationSession).
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Destination passed verbatim to the directions provider (an address
    /// or place name).
    pub destination: String,

    /// Arrival threshold and deviation policy for the progress tracker.
    pub tracker: TrackerConfig,

    /// Pause between location samples.
    pub sample_interval: Duration,

    /// Behavior when a post-deviation route fetch fails.
    pub on_recompute_failure: RecomputeFailure,
}

impl SessionConfig {
    /// Create a config for the given destination with default tuning.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            tracker: TrackerConfig::default(),
            sample_interval: Duration::from_secs(DEFAULT_SAMPLE_INTERVAL_SECS),
            on_recompute_failure: RecomputeFailure::default(),
        }
    }
}

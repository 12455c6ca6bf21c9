//! Navigation session - the turn-by-turn tick loop.
//!
//! A [`NavigationSession`] wires a directions provider, a location provider,
//! an optional heading provider, and a progress sink around one
//! [`ProgressTracker`], then runs the sample loop until the traveler
//! arrives or an unrecoverable error ends the session.
//!
//! # Flow
//!
//! - Fetch the starting location and the initial route (both fatal on
//!   failure)
//! - Each tick: sample the location and feed it to the tracker
//! - Arrivals announce the next step; the final arrival ends the session
//! - Deviations fetch a replacement route from the current position; what a
//!   failed refetch does is configurable
//! - A failed location sample is logged and skipped

use crate::directions::{DirectionsError, DirectionsProvider};
use crate::route::Route;
use crate::sensors::{HeadingProvider, LocationError, LocationProvider, NoCompass};
use crate::tracker::{ProgressTracker, TickEvent};
use thiserror::Error;

mod config;
mod sink;

pub use config::{RecomputeFailure, SessionConfig, DEFAULT_SAMPLE_INTERVAL_SECS};
pub use sink::ProgressSink;

/// Errors that end a navigation session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The starting location could not be determined.
    #[error("Failed to determine starting location: {0}")]
    StartLocation(#[from] LocationError),

    /// The initial route could not be fetched.
    #[error("Failed to fetch initial route: {0}")]
    InitialRoute(DirectionsError),

    /// A replacement route could not be fetched after a deviation, under
    /// the [`RecomputeFailure::Abort`] policy.
    #[error("Failed to recompute route after deviation: {0}")]
    Recompute(DirectionsError),
}

/// Turn-by-turn navigation session.
///
/// Owns its collaborators and the tracker state. Construct with
/// [`new`](NavigationSession::new) (no compass) or
/// [`with_heading`](NavigationSession::with_heading), then call
/// [`run`](NavigationSession::run).
pub struct NavigationSession<
    D: DirectionsProvider,
    L: LocationProvider,
    H: HeadingProvider,
    S: ProgressSink,
> {
    /// Route planning service.
    directions: D,

    /// Position source sampled every tick.
    location: L,

    /// Orientation source, if the hardware has one.
    heading: Option<H>,

    /// Presentation target for routes and notices.
    sink: S,

    /// Session tuning.
    config: SessionConfig,

    /// Route-following state machine.
    tracker: ProgressTracker,

    /// Last instruction passed to the sink, for duplicate suppression.
    last_notified: Option<String>,
}

impl<D: DirectionsProvider, L: LocationProvider, S: ProgressSink>
    NavigationSession<D, L, NoCompass, S>
{
    /// Create a session without an orientation source.
    ///
    /// Route instructions keep their original compass form.
    pub fn new(directions: D, location: L, sink: S, config: SessionConfig) -> Self {
        let tracker = ProgressTracker::with_config(config.tracker);
        Self {
            directions,
            location,
            heading: None,
            sink,
            config,
            tracker,
            last_notified: None,
        }
    }
}

impl<D: DirectionsProvider, L: LocationProvider, H: HeadingProvider, S: ProgressSink>
    NavigationSession<D, L, H, S>
{
    /// Create a session that rewrites compass instructions into left/right
    /// turns using the given heading source.
    pub fn with_heading(
        directions: D,
        location: L,
        heading: H,
        sink: S,
        config: SessionConfig,
    ) -> Self {
        let tracker = ProgressTracker::with_config(config.tracker);
        Self {
            directions,
            location,
            heading: Some(heading),
            sink,
            config,
            tracker,
            last_notified: None,
        }
    }

    /// Run the session to completion.
    ///
    /// Returns `Ok(())` when the final step is reached. The starting
    /// location and the initial route are fatal on failure; later location
    /// samples are retried and route recomputes follow the configured
    /// failure policy, except that an empty replacement route is fatal
    /// under either policy.
    pub async fn run(mut self) -> Result<(), SessionError> {
        tracing::info!(
            destination = %self.config.destination,
            sample_interval_secs = self.config.sample_interval.as_secs(),
            "Navigation session started"
        );

        let origin = self.location.current_location().await?;

        let route = self
            .directions
            .fetch_route(origin, &self.config.destination)
            .await
            .map_err(SessionError::InitialRoute)?;

        let mut route = self.install_route(route).await;
        self.announce_current_step(&route);

        // A slow tick pushes the next one back a full period rather than
        // skipping or bunching the missed ones.
        let mut interval = tokio::time::interval(self.config.sample_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            let sample = match self.location.current_location().await {
                Ok(sample) => sample,
                Err(e) => {
                    tracing::warn!(error = %e, "Location sample failed, retrying next tick");
                    continue;
                }
            };

            match self.tracker.tick(&route, sample) {
                TickEvent::Arrived {
                    step_index,
                    distance_m,
                    is_final,
                } => {
                    tracing::info!(step = step_index, distance_m, is_final, "Step reached");

                    if is_final {
                        self.sink.notify_arrived();
                        tracing::info!("Destination reached, session complete");
                        return Ok(());
                    }

                    self.announce_current_step(&route);
                }
                TickEvent::Deviated { distance_m } => {
                    tracing::info!(distance_m, "Off route, recomputing directions");
                    self.sink.notify_off_route();

                    match self
                        .directions
                        .fetch_route(sample, &self.config.destination)
                        .await
                    {
                        Ok(new_route) => {
                            route = self.install_route(new_route).await;
                            self.announce_current_step(&route);
                        }
                        // An empty route is never a valid navigation target;
                        // the failure policy does not apply to it.
                        Err(e @ DirectionsError::EmptyRoute) => {
                            return Err(SessionError::Recompute(e));
                        }
                        Err(e) => match self.config.on_recompute_failure {
                            RecomputeFailure::Abort => return Err(SessionError::Recompute(e)),
                            RecomputeFailure::KeepStaleRoute => {
                                tracing::error!(error = %e, "Recompute failed, keeping current route");
                            }
                        },
                    }
                }
                TickEvent::NoChange { distance_m } => {
                    tracing::debug!(
                        step = self.tracker.current_index(),
                        distance_m,
                        "En route"
                    );
                }
                TickEvent::Complete => return Ok(()),
            }
        }
    }

    /// Make a fetched route the active one.
    ///
    /// Applies the heading rewrite when an orientation reading is
    /// available, resets the tracker to the first step, and renders the
    /// route through the sink. A failed heading read keeps the compass
    /// instructions rather than ending the session.
    async fn install_route(&mut self, route: Route) -> Route {
        let route = match &self.heading {
            Some(provider) => match provider.current_heading().await {
                Ok(heading_deg) => route.with_headed_instructions(heading_deg),
                Err(e) => {
                    tracing::warn!(error = %e, "Heading unavailable, keeping compass instructions");
                    route
                }
            },
            None => route,
        };

        tracing::info!(steps = route.len(), "Route installed");
        self.tracker.reset();
        self.sink.render_route(&route);

        route
    }

    /// Notify the sink of the step the tracker currently points at,
    /// unless its instruction matches the last notification.
    fn announce_current_step(&mut self, route: &Route) {
        let Some(step) = route.step(self.tracker.current_index()) else {
            return;
        };

        if self.last_notified.as_deref() == Some(step.instruction()) {
            tracing::debug!(
                step = self.tracker.current_index(),
                "Instruction unchanged, not repeating"
            );
            return;
        }

        self.sink
            .notify_step(step.instruction(), step.distance_label());
        self.last_notified = Some(step.instruction().to_string());
    }
}

//! Progress Tracker - the route-following state machine.
//!
//! The tracker holds the current step index and the distance recorded at the
//! previous location sample, and decides for each new sample whether the
//! traveler arrived at the step, deviated from the route, or neither.
//!
//! # Decision Logic
//!
//! 1. Distance to the current target under the arrival threshold advances
//!    the index (completing the route from the last step)
//! 2. Otherwise the configured deviation policy is consulted:
//!    distance-increasing flags a sample strictly farther from the target
//!    than the previous one; absolute-threshold flags a sample with no
//!    route step within the arrival threshold
//! 3. Anything else leaves the state unchanged apart from the recorded
//!    distance

use crate::geo::{self, Coordinate};
use crate::route::Route;

/// How the tracker decides the traveler has left the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviationPolicy {
    /// Deviate when the distance to the current target grows between
    /// consecutive samples. Suited to precise device GPS fixes.
    DistanceIncreasing,

    /// Deviate when no step of the route is within the arrival threshold of
    /// the sample. Suited to coarse IP-geolocation fixes.
    #[default]
    AbsoluteThreshold,
}

/// Tracker tuning knobs.
#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    /// Distance (meters) under which a step's target counts as reached.
    ///
    /// Near-zero thresholds risk never firing under location noise; the
    /// value is a deliberate knob for the caller, not hard-coded here.
    pub arrival_threshold_m: f64,

    /// Deviation detection policy.
    pub policy: DeviationPolicy,
}

impl TrackerConfig {
    /// Default arrival threshold, sized for coarse IP-geolocation fixes.
    pub const DEFAULT_ARRIVAL_THRESHOLD_M: f64 = 50.0;

    /// Arrival threshold sized for device GPS fixes.
    pub const GPS_ARRIVAL_THRESHOLD_M: f64 = 3.0;

    /// Create a config with the given threshold and policy.
    pub fn new(arrival_threshold_m: f64, policy: DeviationPolicy) -> Self {
        Self {
            arrival_threshold_m,
            policy,
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            arrival_threshold_m: Self::DEFAULT_ARRIVAL_THRESHOLD_M,
            policy: DeviationPolicy::default(),
        }
    }
}

/// Outcome of feeding one location sample to the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    /// The sample is within the arrival threshold of the current step's
    /// target; the tracker advanced past it.
    Arrived {
        /// Index of the step that was reached.
        step_index: usize,
        /// Distance (meters) from the sample to the reached target.
        distance_m: f64,
        /// True when the reached step was the last one in the route.
        is_final: bool,
    },

    /// The traveler is judged off-route; the index did not advance. The
    /// caller is expected to install a new route and call
    /// [`reset`](ProgressTracker::reset).
    Deviated {
        /// Distance (meters) from the sample to the current target.
        distance_m: f64,
    },

    /// Still en route to the current target.
    NoChange {
        /// Distance (meters) from the sample to the current target.
        distance_m: f64,
    },

    /// The route was already complete; the sample was ignored.
    Complete,
}

/// Route-following state machine.
///
/// Owns the step index and the last recorded distance. Feed it one location
/// sample per tick via [`tick`](ProgressTracker::tick); a new route takes
/// effect by calling [`reset`](ProgressTracker::reset).
#[derive(Debug)]
pub struct ProgressTracker {
    config: TrackerConfig,

    /// Index of the step currently being walked toward. Equals the route
    /// length exactly when the route is complete.
    index: usize,

    /// Distance (meters) to the current target at the previous sample.
    /// Unset until the first sample after a reset.
    last_distance_m: Option<f64>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Create a tracker with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Create a tracker with a custom configuration.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self {
            config,
            index: 0,
            last_distance_m: None,
        }
    }

    /// Index of the step currently being walked toward.
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Distance recorded at the previous sample, if any.
    pub fn last_distance_m(&self) -> Option<f64> {
        self.last_distance_m
    }

    /// The active configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Whether every step of the given route has been reached.
    pub fn is_complete(&self, route: &Route) -> bool {
        self.index >= route.len()
    }

    /// Feed one location sample and decide what happened.
    ///
    /// The distance from the sample to the current step's target drives the
    /// transition; see the module docs for the decision order. Ticking a
    /// completed tracker is a no-op reporting [`TickEvent::Complete`].
    pub fn tick(&mut self, route: &Route, sample: Coordinate) -> TickEvent {
        let Some(step) = route.step(self.index) else {
            return TickEvent::Complete;
        };

        let distance_m = geo::distance_meters(sample, step.end());

        if distance_m < self.config.arrival_threshold_m {
            let step_index = self.index;
            self.index += 1;
            let is_final = self.index == route.len();

            // Rebase the recorded distance onto the new target so the next
            // sample is not compared against the step just passed.
            self.last_distance_m = match route.step(self.index) {
                Some(next) => Some(geo::distance_meters(sample, next.end())),
                None => Some(distance_m),
            };

            return TickEvent::Arrived {
                step_index,
                distance_m,
                is_final,
            };
        }

        let deviated = match self.config.policy {
            DeviationPolicy::DistanceIncreasing => self
                .last_distance_m
                .is_some_and(|last| distance_m > last),
            DeviationPolicy::AbsoluteThreshold => {
                nearest_step_distance(route, sample) >= self.config.arrival_threshold_m
            }
        };

        self.last_distance_m = Some(distance_m);

        if deviated {
            TickEvent::Deviated { distance_m }
        } else {
            TickEvent::NoChange { distance_m }
        }
    }

    /// Return to the start of a (new) route with no recorded distance.
    pub fn reset(&mut self) {
        self.index = 0;
        self.last_distance_m = None;
    }
}

/// Distance (meters) from the sample to the nearest step target in the
/// route.
fn nearest_step_distance(route: &Route, sample: Coordinate) -> f64 {
    route
        .steps()
        .iter()
        .map(|step| geo::distance_meters(sample, step.end()))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteStep;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).unwrap()
    }

    /// Three targets spaced about 1.1 km apart going north along a meridian.
    fn three_step_route() -> Route {
        Route::from_steps(vec![
            RouteStep::new("Head north on 1st Ave", coord(0.00, 0.0), "0.7 mi"),
            RouteStep::new("Turn east onto Oak St", coord(0.01, 0.0), "0.7 mi"),
            RouteStep::new("Arrive at the market", coord(0.02, 0.0), "300 ft"),
        ])
        .unwrap()
    }

    fn tracker(policy: DeviationPolicy) -> ProgressTracker {
        ProgressTracker::with_config(TrackerConfig::new(50.0, policy))
    }

    #[test]
    fn test_new_tracker_starts_at_first_step() {
        let tracker = ProgressTracker::new();

        assert_eq!(tracker.current_index(), 0);
        assert_eq!(tracker.last_distance_m(), None);
    }

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();

        assert_eq!(config.arrival_threshold_m, 50.0);
        assert_eq!(config.policy, DeviationPolicy::AbsoluteThreshold);
    }

    #[test]
    fn test_arrival_advances_index() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        // 0.0001 degrees of latitude is about 11 m, well under threshold
        let event = tracker.tick(&route, coord(0.0001, 0.0));

        assert!(matches!(
            event,
            TickEvent::Arrived {
                step_index: 0,
                is_final: false,
                ..
            }
        ));
        assert_eq!(tracker.current_index(), 1);
    }

    #[test]
    fn test_three_arrivals_then_complete() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        let samples = [coord(0.0001, 0.0), coord(0.0101, 0.0), coord(0.0199, 0.0)];
        let mut arrivals = 0;
        let mut finals = 0;

        for sample in samples {
            match tracker.tick(&route, sample) {
                TickEvent::Arrived { is_final, .. } => {
                    arrivals += 1;
                    if is_final {
                        finals += 1;
                    }
                }
                other => panic!("expected arrival, got {:?}", other),
            }
        }

        assert_eq!(arrivals, 3);
        assert_eq!(finals, 1);
        assert!(tracker.is_complete(&route));
    }

    #[test]
    fn test_tick_after_complete_is_noop() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        for sample in [coord(0.0001, 0.0), coord(0.0101, 0.0), coord(0.0199, 0.0)] {
            tracker.tick(&route, sample);
        }
        assert!(tracker.is_complete(&route));

        let index_before = tracker.current_index();
        let event = tracker.tick(&route, coord(0.5, 0.5));

        assert_eq!(event, TickEvent::Complete);
        assert_eq!(tracker.current_index(), index_before);
    }

    #[test]
    fn test_first_far_sample_is_no_change() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        // No prior distance recorded, so there is nothing to compare against
        let event = tracker.tick(&route, coord(0.005, 0.0));

        assert!(matches!(event, TickEvent::NoChange { .. }));
        assert!(tracker.last_distance_m().is_some());
    }

    #[test]
    fn test_growing_distance_is_deviation() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        tracker.tick(&route, coord(0.005, 0.0));
        let event = tracker.tick(&route, coord(0.006, 0.0));

        assert!(matches!(event, TickEvent::Deviated { .. }));
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn test_shrinking_distance_is_no_change() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        tracker.tick(&route, coord(0.006, 0.0));
        let event = tracker.tick(&route, coord(0.005, 0.0));

        assert!(matches!(event, TickEvent::NoChange { .. }));
    }

    #[test]
    fn test_arrival_rebases_distance_to_next_target() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        // Approach, then arrive at step 0
        tracker.tick(&route, coord(-0.002, 0.0));
        tracker.tick(&route, coord(0.0001, 0.0));
        assert_eq!(tracker.current_index(), 1);

        // The recorded distance now refers to step 1's target, so a sample
        // walking toward it must not read as a deviation
        let event = tracker.tick(&route, coord(0.003, 0.0));
        assert!(matches!(event, TickEvent::NoChange { .. }));
    }

    #[test]
    fn test_final_arrival_keeps_reached_distance() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        tracker.tick(&route, coord(0.0001, 0.0));
        tracker.tick(&route, coord(0.0101, 0.0));
        let event = tracker.tick(&route, coord(0.0199, 0.0));

        let TickEvent::Arrived {
            distance_m,
            is_final: true,
            ..
        } = event
        else {
            panic!("expected final arrival, got {:?}", event);
        };
        assert_eq!(tracker.last_distance_m(), Some(distance_m));
    }

    #[test]
    fn test_absolute_threshold_deviation_when_no_step_near() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::AbsoluteThreshold);

        // About 550 m east of the whole corridor
        let event = tracker.tick(&route, coord(0.01, 0.005));

        assert!(matches!(event, TickEvent::Deviated { .. }));
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn test_absolute_threshold_en_route_when_any_step_near() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::AbsoluteThreshold);

        // Within threshold of step 1's target but far from step 0's: still
        // en route, but no sequential arrival either
        let event = tracker.tick(&route, coord(0.0101, 0.0));

        assert!(matches!(event, TickEvent::NoChange { .. }));
        assert_eq!(tracker.current_index(), 0);
    }

    #[test]
    fn test_absolute_threshold_ignores_growing_distance() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::AbsoluteThreshold);

        tracker.tick(&route, coord(0.0001, 0.0));
        assert_eq!(tracker.current_index(), 1);

        // Farther from step 1's target than before, but within 35 m of
        // step 0's; the nearest-step rule keeps this en route
        let event = tracker.tick(&route, coord(-0.0003, 0.0));

        assert!(matches!(event, TickEvent::NoChange { .. }));
    }

    #[test]
    fn test_reset_clears_state() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        tracker.tick(&route, coord(0.0001, 0.0));
        tracker.tick(&route, coord(0.005, 0.0));
        assert_ne!(tracker.current_index(), 0);

        tracker.reset();

        assert_eq!(tracker.current_index(), 0);
        assert_eq!(tracker.last_distance_m(), None);
    }

    #[test]
    fn test_deviation_updates_recorded_distance() {
        let route = three_step_route();
        let mut tracker = tracker(DeviationPolicy::DistanceIncreasing);

        tracker.tick(&route, coord(0.005, 0.0));
        tracker.tick(&route, coord(0.006, 0.0));

        // A following sample at the same spot compares against the deviated
        // distance, not the older one
        let event = tracker.tick(&route, coord(0.006, 0.0));
        assert!(matches!(event, TickEvent::NoChange { .. }));
    }

    #[test]
    fn test_nearest_step_distance_picks_minimum() {
        let route = three_step_route();

        // Right on step 1's target
        let d = nearest_step_distance(&route, coord(0.01, 0.0));
        assert!(d < 1.0, "got {}", d);

        // About 1.1 km north of the last step
        let d = nearest_step_distance(&route, coord(0.03, 0.0));
        assert!((d - 1112.0).abs() < 5.0, "got {}", d);
    }

    #[test]
    fn test_single_step_route_completes_immediately() {
        let route = Route::from_steps(vec![RouteStep::new(
            "Arrive at the market",
            coord(0.0, 0.0),
            "300 ft",
        )])
        .unwrap();
        let mut tracker = ProgressTracker::new();

        let event = tracker.tick(&route, coord(0.0001, 0.0));

        assert!(matches!(
            event,
            TickEvent::Arrived {
                step_index: 0,
                is_final: true,
                ..
            }
        ));
        assert!(tracker.is_complete(&route));
    }
}

//! Route model - an ordered, non-empty sequence of walking steps.

use thiserror::Error;

use crate::compass;
use crate::geo::Coordinate;

/// One instruction-bearing segment of a route.
///
/// Steps are created as part of a [`Route`] and never mutated afterwards;
/// instruction rewriting produces new steps as part of a new route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    instruction: String,
    end: Coordinate,
    distance_label: String,
    start: Option<Coordinate>,
}

impl RouteStep {
    /// Create a step from its instruction, target coordinate, and the
    /// human-readable distance label reported by the provider.
    pub fn new(
        instruction: impl Into<String>,
        end: Coordinate,
        distance_label: impl Into<String>,
    ) -> Self {
        Self {
            instruction: instruction.into(),
            end,
            distance_label: distance_label.into(),
            start: None,
        }
    }

    /// Attach the segment's start coordinate.
    pub fn with_start(mut self, start: Coordinate) -> Self {
        self.start = Some(start);
        self
    }

    /// Instruction text for this step.
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Coordinate the traveler is walking toward on this step.
    pub fn end(&self) -> Coordinate {
        self.end
    }

    /// Provider-reported distance label (display only, not used for
    /// computation).
    pub fn distance_label(&self) -> &str {
        &self.distance_label
    }

    /// Coordinate the segment starts from, when the provider reported one.
    pub fn start(&self) -> Option<Coordinate> {
        self.start
    }
}

/// An ordered sequence of route steps, non-empty by construction.
///
/// A route is immutable once built; recomputation replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    steps: Vec<RouteStep>,
}

impl Route {
    /// Build a route from provider steps, preserving their order exactly.
    ///
    /// A provider response with zero steps is a failure, never a usable
    /// route.
    pub fn from_steps(steps: Vec<RouteStep>) -> Result<Self, RouteError> {
        if steps.is_empty() {
            return Err(RouteError::Empty);
        }

        Ok(Self { steps })
    }

    /// Number of steps in the route (always at least 1).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the route has no steps (never the case once constructed).
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The step at `index`, if within the route.
    pub fn step(&self, index: usize) -> Option<&RouteStep> {
        self.steps.get(index)
    }

    /// All steps in order.
    pub fn steps(&self) -> &[RouteStep] {
        &self.steps
    }

    /// A copy of this route with every instruction rewritten relative to
    /// the given heading.
    ///
    /// This is the one-time content transform applied after a fetch, before
    /// any step reaches the progress tracker. The original route is left
    /// untouched.
    pub fn with_headed_instructions(&self, heading_deg: f64) -> Route {
        let steps = self
            .steps
            .iter()
            .map(|step| RouteStep {
                instruction: compass::rewrite_instruction(&step.instruction, heading_deg),
                end: step.end,
                distance_label: step.distance_label.clone(),
                start: step.start,
            })
            .collect();

        Route { steps }
    }
}

/// Errors that can occur when building a route.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The provider returned zero steps.
    #[error("Route contains no steps")]
    Empty,
}

//! Presentation seam between the session and whatever shows the route.

/// Trait for presenting navigation progress to the traveler.
///
/// The session drives a sink; implementations decide how route tables and
/// notices are shown (terminal, logger, test recorder).
pub trait ProgressSink: Send {
    /// A route was installed; present its full step table.
    fn render_route(&mut self, route: &crate::route::Route);

    /// The traveler should now follow this instruction.
    fn notify_step(&mut self, instruction: &str, distance_label: &str);

    /// The traveler left the route and a new one is being fetched.
    fn notify_off_route(&mut self);

    /// The final step was reached.
    fn notify_arrived(&mut self);
}

//! Terminal display for navigation progress.
//!
//! Renders the active route as a numbered step table plus one-line notices
//! for step changes, deviations, and arrival. Step notices carry a
//! "[k of N]" counter against the last rendered route. On an interactive
//! terminal the screen is cleared before each table so the latest route
//! owns the view; piped output just appends.

use std::io;

use crossterm::{
    cursor, execute,
    terminal::{self, ClearType},
};
use waypath::route::Route;
use waypath::session::ProgressSink;

/// Progress sink that prints to the terminal.
pub struct ConsoleDisplay {
    /// Whether stdout is a terminal worth clearing.
    interactive: bool,

    /// Step count of the last rendered route.
    route_len: usize,

    /// Steps announced since that render.
    steps_shown: usize,
}

impl ConsoleDisplay {
    /// Create a display, detecting whether stdout is interactive.
    pub fn new() -> Self {
        Self {
            interactive: atty::is(atty::Stream::Stdout),
            route_len: 0,
            steps_shown: 0,
        }
    }

    fn clear_screen(&self) {
        if !self.interactive {
            return;
        }
        // Clearing is cosmetic; ignore terminals that reject the sequence
        let _ = execute!(
            io::stdout(),
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        );
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for ConsoleDisplay {
    fn render_route(&mut self, route: &Route) {
        self.clear_screen();
        self.route_len = route.len();
        self.steps_shown = 0;

        let width = instruction_width(route);

        println!("{:>4}  {:<width$}  {}", "Step", "Instruction", "Distance");
        println!("{:->4}  {:-<width$}  {:-<8}", "", "", "");
        for (index, step) in route.steps().iter().enumerate() {
            println!(
                "{:>4}  {:<width$}  {}",
                index + 1,
                step.instruction(),
                step.distance_label()
            );
        }
        println!();
    }

    fn notify_step(&mut self, instruction: &str, distance_label: &str) {
        self.steps_shown += 1;
        if self.route_len > 0 {
            println!(
                "Current step: {} ({}) [{} of {}]",
                instruction, distance_label, self.steps_shown, self.route_len
            );
        } else {
            println!("Current step: {} ({})", instruction, distance_label);
        }
    }

    fn notify_off_route(&mut self) {
        println!("You are off route! Recalculating directions...");
    }

    fn notify_arrived(&mut self) {
        println!("You have arrived at your destination!");
    }
}

/// Column width that fits every instruction and the header.
fn instruction_width(route: &Route) -> usize {
    route
        .steps()
        .iter()
        .map(|step| step.instruction().len())
        .max()
        .unwrap_or(0)
        .max("Instruction".len())
}

//! Compass cardinals and traveler-relative turn resolution.
//!
//! Directions services phrase instructions against compass cardinals
//! ("Head north on ..."). When a heading sample is available, those tokens
//! can be rewritten relative to the traveler ("Head right on ..."). The
//! rewrite is applied once per route fetch, before any step reaches the
//! progress tracker.

use std::fmt;

/// The eight named compass directions used in instruction text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinal {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

/// Token replacement order for instruction rewriting.
///
/// Compound cardinals come first so that "north" never partially consumes a
/// "northeast" token.
const REWRITE_ORDER: [Cardinal; 8] = [
    Cardinal::Northeast,
    Cardinal::Northwest,
    Cardinal::Southeast,
    Cardinal::Southwest,
    Cardinal::East,
    Cardinal::West,
    Cardinal::North,
    Cardinal::South,
];

impl Cardinal {
    /// All cardinals in compass order, starting at north.
    pub const ALL: [Cardinal; 8] = [
        Cardinal::North,
        Cardinal::Northeast,
        Cardinal::East,
        Cardinal::Southeast,
        Cardinal::South,
        Cardinal::Southwest,
        Cardinal::West,
        Cardinal::Northwest,
    ];

    /// Reference bearing in degrees, clockwise from north.
    pub fn bearing(&self) -> f64 {
        match self {
            Cardinal::North => 0.0,
            Cardinal::Northeast => 45.0,
            Cardinal::East => 90.0,
            Cardinal::Southeast => 135.0,
            Cardinal::South => 180.0,
            Cardinal::Southwest => 225.0,
            Cardinal::West => 270.0,
            Cardinal::Northwest => 315.0,
        }
    }

    /// Lowercase token as it appears in instruction text.
    pub fn token(&self) -> &'static str {
        match self {
            Cardinal::North => "north",
            Cardinal::Northeast => "northeast",
            Cardinal::East => "east",
            Cardinal::Southeast => "southeast",
            Cardinal::South => "south",
            Cardinal::Southwest => "southwest",
            Cardinal::West => "west",
            Cardinal::Northwest => "northwest",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Direction of a turn relative to the traveler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// Lowercase word used when rewriting instruction text.
    pub fn word(&self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// Resolve a cardinal direction to a turn relative to the current heading.
///
/// The clockwise offset from the heading to the cardinal's bearing decides
/// the turn: offsets under 180 degrees resolve to [`TurnDirection::Right`],
/// the rest to [`TurnDirection::Left`]. An offset of exactly 0 is a right
/// turn and exactly 180 (directly behind) is a left turn; both are fixed
/// tie-breaks. Headings outside [0, 360) are normalized first.
pub fn turn_for(heading_deg: f64, target: Cardinal) -> TurnDirection {
    let diff = (target.bearing() - heading_deg).rem_euclid(360.0);

    if diff < 180.0 {
        TurnDirection::Right
    } else {
        TurnDirection::Left
    }
}

/// Rewrite cardinal tokens in an instruction to traveler-relative turns.
///
/// Every cardinal token present in the text is replaced with the turn word
/// resolved against `heading_deg`. The heading is sampled once per route
/// fetch, not once per step.
pub fn rewrite_instruction(instruction: &str, heading_deg: f64) -> String {
    let mut text = instruction.to_string();

    for cardinal in REWRITE_ORDER {
        if text.contains(cardinal.token()) {
            text = text.replace(cardinal.token(), turn_for(heading_deg, cardinal).word());
        }
    }

    text
}

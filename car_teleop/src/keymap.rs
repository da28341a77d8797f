//! # Key map
//!
//! Translates lines typed into the console into actions. The drive keys are laid out around `k`
//! so that their position on the keyboard matches the direction of travel:
//!
//! ```text
//!    u    i    o
//!    j    k    l
//!    m    ,    .
//! ```
//!
//! `i` and `,` drive forwards and backwards, `j` and `l` rotate on the spot, `k` stops, and the
//! corner keys combine the two. A line may hold several drive keys, which are sent in order.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::tc::car_ctrl::Twist;

use crate::TeleopError;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Drive keys with the multipliers applied to the speed and turn rate magnitudes.
pub const DRIVE_KEYS: [(char, f64, f64, &str); 9] = [
    ('u', 1.0, 1.0, "forward left"),
    ('i', 1.0, 0.0, "forward"),
    ('o', 1.0, -1.0, "forward right"),
    ('j', 0.0, 1.0, "rotate left"),
    ('k', 0.0, 0.0, "stop"),
    ('l', 0.0, -1.0, "rotate right"),
    ('m', -1.0, -1.0, "reverse right"),
    (',', -1.0, 0.0, "reverse"),
    ('.', -1.0, 1.0, "reverse left"),
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Magnitudes used by the drive keys.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnitudes {
    /// Units: meters/second
    pub speed_ms: f64,

    /// Units: radians/second
    pub turn_rads: f64
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Something the console should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Send these commands, in order
    Drive(Vec<Twist>),

    /// Send a heartbeat
    Ping,

    SetSpeed(f64),

    SetTurn(f64),

    Help,

    Quit,

    /// Empty line
    Nothing
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Parse a line from the console.
pub fn parse_line(line: &str, mags: &Magnitudes) -> Result<Action, TeleopError> {
    let line = line.trim();
    let mut words = line.split_whitespace();

    let first = match words.next() {
        Some(w) => w,
        None => return Ok(Action::Nothing)
    };

    match first {
        "q" | "quit" | "exit" => Ok(Action::Quit),
        "h" | "help" | "?" => Ok(Action::Help),
        "ping" => Ok(Action::Ping),
        "speed" => Ok(Action::SetSpeed(parse_magnitude("speed", words.next())?)),
        "turn" => Ok(Action::SetTurn(parse_magnitude("turn", words.next())?)),
        _ => {
            let twists = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| key_to_twist(c, mags).ok_or_else(|| TeleopError::UnknownCommand(line.to_string())))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Action::Drive(twists))
        }
    }
}

/// Get the command sent by a drive key, or `None` if the key isn't a drive key.
pub fn key_to_twist(key: char, mags: &Magnitudes) -> Option<Twist> {
    DRIVE_KEYS
        .iter()
        .find(|(k, _, _, _)| *k == key)
        .map(|(_, x, z, _)| Twist::planar(x * mags.speed_ms, z * mags.turn_rads))
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

fn parse_magnitude(name: &'static str, word: Option<&str>) -> Result<f64, TeleopError> {
    let word = word.ok_or(TeleopError::MissingValue(name))?;

    match word.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(TeleopError::InvalidValue(name, word.to_string()))
    }
}

//! Car control module
//!
//! Converts velocity commands into the car's kinematic state: front wheel steering angles, rear
//! wheel rotation, a quantised heading and a dead-reckoned displacement. The module is split into:
//!
//! - `quantizer`: maps a heading onto one of the eight octant directions,
//! - `interp`: the table of manouvres selected by a command,
//! - `state`: the [`CarCtrl`] integrator which owns the persistent state,
//! - `snapshot`: assembles the published [`comms_if::tm::Snapshot`].

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod interp;
mod params;
mod quantizer;
mod snapshot;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use interp::*;
pub use params::*;
pub use quantizer::*;
pub use snapshot::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Index of the front left wheel in the published joint positions.
pub const FRONT_LEFT_JOINT: usize = 3;

/// Index of the front right wheel in the published joint positions.
pub const FRONT_RIGHT_JOINT: usize = 4;

/// Indices of the two rear wheels in the published joint positions.
pub const REAR_JOINTS: [usize; 2] = [5, 6];

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during CarCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum CarCtrlError {
    #[error("Could not load CarCtrl parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid CarCtrl parameter {0} = {1}: {2}")]
    InvalidParam(&'static str, f64, &'static str),
}

//! Parameters structure for CarCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::CarCtrlError;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Longest allowed idle period.
///
/// Units: seconds
pub const MAX_IDLE_PERIOD_S: f64 = 3600.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Car control.
///
/// Any field missing from the parameter file takes its default value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {

    // ---- STEERING ----

    /// Steer angle of the wheel on the outside of a turn.
    ///
    /// Units: radians
    pub str_outer_rad: f64,

    /// Steer angle of the wheel on the inside of a turn.
    ///
    /// Units: radians
    pub str_inner_rad: f64,

    /// Rotation added to (or removed from) the rear wheels by each command with forward (or
    /// backward) motion.
    ///
    /// Units: radians
    pub rear_step_rad: f64,

    /// Heading change produced by each turning command.
    ///
    /// Units: radians
    pub heading_step_rad: f64,

    // ---- INITIAL STATE ----

    /// Initial heading of the car in the odom frame.
    ///
    /// Units: radians
    pub initial_heading_rad: f64,

    /// Initial reference speed against which changes of speed are detected.
    ///
    /// Units: meters/second
    pub initial_ref_speed_ms: f64,

    // ---- TOLERANCES ----

    /// Minimum difference in the magnitude of a command component for it to be treated as a
    /// change.
    pub change_tolerance: f64,

    /// Maximum angular distance from a cardinal heading at which the heading is treated as
    /// lying exactly on it.
    ///
    /// Units: radians
    pub cardinal_tolerance_rad: f64,

    // ---- IDLE ----

    /// Period between republished snapshots while no command has been recieved.
    ///
    /// Units: seconds
    pub idle_period_s: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            str_outer_rad: 0.785,
            str_inner_rad: 0.393,
            rear_step_rad: PI,
            heading_step_rad: PI / 72.0,
            initial_heading_rad: FRAC_PI_2,
            initial_ref_speed_ms: 0.5,
            change_tolerance: 1e-9,
            cardinal_tolerance_rad: 1e-6,
            idle_period_s: 1.0
        }
    }
}

impl Params {
    /// Check the parameters describe a usable car.
    pub fn validate(&self) -> Result<(), CarCtrlError> {
        let finite = [
            ("str_outer_rad", self.str_outer_rad),
            ("str_inner_rad", self.str_inner_rad),
            ("rear_step_rad", self.rear_step_rad),
            ("heading_step_rad", self.heading_step_rad),
            ("initial_heading_rad", self.initial_heading_rad),
            ("initial_ref_speed_ms", self.initial_ref_speed_ms),
        ];

        for (name, value) in finite.iter() {
            if !value.is_finite() {
                return Err(CarCtrlError::InvalidParam(*name, *value, "must be finite"))
            }
        }

        let within_turn = [
            ("heading_step_rad", self.heading_step_rad),
            ("initial_heading_rad", self.initial_heading_rad),
        ];

        for (name, value) in within_turn.iter() {
            if value.abs() > TAU {
                return Err(CarCtrlError::InvalidParam(*name, *value, "must be within one turn"))
            }
        }

        let non_negative = [
            ("change_tolerance", self.change_tolerance),
            ("cardinal_tolerance_rad", self.cardinal_tolerance_rad),
        ];

        for (name, value) in non_negative.iter() {
            if !(value.is_finite() && *value >= 0.0) {
                return Err(CarCtrlError::InvalidParam(*name, *value, "must be zero or positive"))
            }
        }

        if !(self.idle_period_s > 0.0 && self.idle_period_s <= MAX_IDLE_PERIOD_S) {
            return Err(CarCtrlError::InvalidParam(
                "idle_period_s", self.idle_period_s, "must be positive and at most an hour"
            ))
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        assert!(Params::default().validate().is_ok());
    }

    #[test]
    fn test_partial_params_file() {
        let p: Params = util::params::from_str("idle_period_s = 0.25").unwrap();
        assert_eq!(p.idle_period_s, 0.25);
        assert_eq!(p.str_outer_rad, 0.785);
    }

    #[test]
    fn test_invalid_params() {
        let mut p = Params::default();
        p.idle_period_s = 0.0;
        assert!(matches!(
            p.validate(),
            Err(CarCtrlError::InvalidParam("idle_period_s", _, _))
        ));

        let mut p = Params::default();
        p.cardinal_tolerance_rad = -1.0;
        assert!(p.validate().is_err());

        let mut p = Params::default();
        p.heading_step_rad = f64::NAN;
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_out_of_range_params() {
        let mut p = Params::default();
        p.heading_step_rad = 1e20;
        assert!(matches!(
            p.validate(),
            Err(CarCtrlError::InvalidParam("heading_step_rad", _, _))
        ));

        let mut p = Params::default();
        p.initial_heading_rad = -1e20;
        assert!(matches!(
            p.validate(),
            Err(CarCtrlError::InvalidParam("initial_heading_rad", _, _))
        ));

        // A full turn either way is still allowed
        let mut p = Params::default();
        p.initial_heading_rad = -TAU;
        p.heading_step_rad = TAU;
        assert!(p.validate().is_ok());

        for idle in [1e30, f64::NAN, f64::INFINITY, MAX_IDLE_PERIOD_S + 1.0].iter() {
            let mut p = Params::default();
            p.idle_period_s = *idle;
            assert!(matches!(
                p.validate(),
                Err(CarCtrlError::InvalidParam("idle_period_s", _, _))
            ));
        }
    }
}

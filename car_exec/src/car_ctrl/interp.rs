//! # Command interpretation
//!
//! Each velocity command selects one of nine manouvres depending on the signs of its forward
//! speed and turn rate:
//!
//! | linear.x | angular.z | steer (L, R)     | rear      | heading    |
//! |----------|-----------|------------------|-----------|------------|
//! | > 0      | > 0       | (outer, inner)   | +step     | +step      |
//! | > 0      | = 0       | (0, 0)           | +step     | 0          |
//! | > 0      | < 0       | (-inner, -outer) | +step     | -step      |
//! | = 0      | > 0       | (outer, inner)   | 0         | +step      |
//! | = 0      | = 0       | (0, 0)           | 0         | 0          |
//! | = 0      | < 0       | (-inner, -outer) | 0         | -step      |
//! | < 0      | < 0       | (outer, inner)   | -step     | -step      |
//! | < 0      | = 0       | (0, 0)           | -step     | 0          |
//! | < 0      | > 0       | (-inner, -outer) | -step     | +step      |
//!
//! When reversing the wheels are steered the opposite way to the turn rate, in the same way a
//! driver turns the wheel left to swing the back of a car to the right.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

use comms_if::tc::car_ctrl::Twist;
use util::maths::sign;

use super::Params;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The manouvre selected by a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interpretation {
    /// Absolute steer angle of the front left wheel
    ///
    /// Units: radians
    pub str_left_rad: f64,

    /// Absolute steer angle of the front right wheel
    ///
    /// Units: radians
    pub str_right_rad: f64,

    /// Change in the rear wheels' rotation
    ///
    /// Units: radians
    pub rear_delta_rad: f64,

    /// Change in the car's heading
    ///
    /// Units: radians
    pub heading_delta_rad: f64
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Find the manouvre for a command.
///
/// Lateral (strafe) commands, those with a non-zero `linear.y`, have no entry and give `None`.
pub fn interpret(cmd: &Twist, params: &Params) -> Option<Interpretation> {
    if cmd.linear.y != 0.0 {
        return None
    }

    let drive = sign(cmd.linear.x);
    let turn = sign(cmd.angular.z);

    // Reversing inverts the steer direction
    let steer = match drive {
        -1 => -turn,
        _ => turn
    };

    let (str_left_rad, str_right_rad) = match steer {
        1 => (params.str_outer_rad, params.str_inner_rad),
        -1 => (-params.str_inner_rad, -params.str_outer_rad),
        _ => (0.0, 0.0)
    };

    Some(Interpretation {
        str_left_rad,
        str_right_rad,
        rear_delta_rad: drive as f64 * params.rear_step_rad,
        heading_delta_rad: turn as f64 * params.heading_step_rad
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    fn row(x: f64, z: f64) -> (f64, f64, f64, f64) {
        let i = interpret(&Twist::planar(x, z), &Params::default()).unwrap();
        (i.str_left_rad, i.str_right_rad, i.rear_delta_rad, i.heading_delta_rad)
    }

    #[test]
    fn test_table() {
        let step = PI / 72.0;

        assert_eq!(row(1.0, 1.0), (0.785, 0.393, PI, step));
        assert_eq!(row(1.0, 0.0), (0.0, 0.0, PI, 0.0));
        assert_eq!(row(1.0, -1.0), (-0.393, -0.785, PI, -step));

        assert_eq!(row(0.0, 1.0), (0.785, 0.393, 0.0, step));
        assert_eq!(row(0.0, 0.0), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(row(0.0, -1.0), (-0.393, -0.785, 0.0, -step));

        assert_eq!(row(-1.0, -1.0), (0.785, 0.393, -PI, -step));
        assert_eq!(row(-1.0, 0.0), (0.0, 0.0, -PI, 0.0));
        assert_eq!(row(-1.0, 1.0), (-0.393, -0.785, -PI, step));
    }

    #[test]
    fn test_magnitude_ignored() {
        assert_eq!(row(0.01, 3.0), row(20.0, 0.2));
        assert_eq!(row(-7.5, -0.001), row(-1.0, -1.0));
    }

    #[test]
    fn test_lateral_has_no_entry() {
        let mut cmd = Twist::planar(1.0, 1.0);
        cmd.linear.y = 0.5;
        assert!(interpret(&cmd, &Params::default()).is_none());

        cmd.linear.y = -0.5;
        assert!(interpret(&cmd, &Params::default()).is_none());
    }
}

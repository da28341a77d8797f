//! # Car control telecommands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

use crate::geometry::Vector3;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A velocity command for the car.
///
/// Only the signs of `linear.x` and `angular.z` select a manouvre, and `linear.y` being non-zero
/// marks a lateral (strafe) command. The magnitudes of `linear.x` and `linear.z` are accumulated
/// into the car's displacement, and the whole twist is echoed in the published odometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Twist {
    /// Linear velocity.
    ///
    /// Units: meters/second,
    /// Frame: Car body (x forwards, y left, z up)
    pub linear: Vector3,

    /// Angular velocity.
    ///
    /// Follows the right hand rule about each axis, so a positive `z` turns the car to the left.
    ///
    /// Units: radians/second,
    /// Frame: Car body
    pub angular: Vector3
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Twist {
    /// Build a planar command from a forward speed and a turn rate.
    pub fn planar(speed_ms: f64, turn_rate_rads: f64) -> Self {
        Self {
            linear: Vector3::new(speed_ms, 0.0, 0.0),
            angular: Vector3::new(0.0, 0.0, turn_rate_rads)
        }
    }

    /// A command with every component zero.
    pub fn stop() -> Self {
        Self::default()
    }

    /// True if every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.linear.is_finite() && self.angular.is_finite()
    }
}

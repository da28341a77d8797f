//! # Telemetry module
//!
//! Messages published by the car executable. Each state update produces one [`Snapshot`], which
//! is split into three messages on the wire, one per topic:
//!
//! - [`JOINT_STATES_TOPIC`]: the [`JointState`] of the car's seven joints,
//! - [`TF_TOPIC`]: the `odom` -> `base_footprint` [`TransformStamped`],
//! - [`ODOM_TOPIC`]: the [`Odometry`] record.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::{geometry::{Quaternion, Vector3}, tc::car_ctrl::Twist};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Topic prefix for joint state messages.
pub const JOINT_STATES_TOPIC: &str = "joint_states";

/// Topic prefix for transform messages.
pub const TF_TOPIC: &str = "tf";

/// Topic prefix for odometry messages.
pub const ODOM_TOPIC: &str = "odom";

/// Fixed world frame the car's pose is expressed in.
pub const ODOM_FRAME: &str = "odom";

/// The car's body frame, projected onto the ground.
pub const BASE_FRAME: &str = "base_footprint";

/// Number of joints in a [`JointState`].
pub const NUM_JOINTS: usize = 7;

/// Names of the car's joints, in the order their positions are published.
pub const JOINT_NAMES: [&str; NUM_JOINTS] = [
    "base_footprint_joint",
    "front_axle_to_base",
    "back_axle_to_base",
    "front_left_wheel_to_front_axle",
    "front_right_wheel_to_front_axle",
    "back_left_wheel_to_back_axle",
    "back_right_wheel_to_back_axle",
];

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Common header carried by every telemetry message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// UTC time at which the message's data was produced
    pub stamp: DateTime<Utc>,

    /// Frame the message's data is expressed in
    pub frame_id: String
}

/// Positions of the car's named joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointState {
    pub header: Header,

    /// Joint names, always [`JOINT_NAMES`]
    pub name: Vec<String>,

    /// Joint positions, same order as `name`.
    ///
    /// Units: radians
    pub position: Vec<f64>
}

/// A transform between two frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStamped {
    /// Header, `frame_id` is the parent frame
    pub header: Header,

    pub child_frame_id: String,

    /// Units: meters
    pub translation: Vector3,

    pub rotation: Quaternion
}

/// Position and orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Units: meters
    pub position: Vector3,

    pub orientation: Quaternion
}

/// Odometry record, the car's pose in the parent frame along with its velocity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Odometry {
    pub header: Header,

    pub child_frame_id: String,

    pub pose: Pose,

    /// The velocity command that produced this record.
    pub twist: Twist
}

/// The full published state produced by one update of the car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub joint_state: JointState,
    pub transform: TransformStamped,
    pub odometry: Odometry
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Header {
    pub fn new(stamp: DateTime<Utc>, frame_id: &str) -> Self {
        Self {
            stamp,
            frame_id: frame_id.to_string()
        }
    }
}

impl JointState {
    /// Build a joint state for the car's joints from the given positions.
    pub fn from_positions(stamp: DateTime<Utc>, position: [f64; NUM_JOINTS]) -> Self {
        Self {
            header: Header::new(stamp, BASE_FRAME),
            name: JOINT_NAMES.iter().map(|n| n.to_string()).collect(),
            position: position.to_vec()
        }
    }
}

impl Snapshot {
    /// Set the stamp of all three messages.
    pub fn restamp(&mut self, stamp: DateTime<Utc>) {
        self.joint_state.header.stamp = stamp;
        self.transform.header.stamp = stamp;
        self.odometry.header.stamp = stamp;
    }

    /// The snapshot's stamp.
    ///
    /// All three messages share a stamp so the joint state's is returned.
    pub fn stamp(&self) -> DateTime<Utc> {
        self.joint_state.header.stamp
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_joint_state_names() {
        let js = JointState::from_positions(Utc::now(), [0.0, 0.0, 0.0, 1.0, 2.0, 3.0, 3.0]);

        assert_eq!(js.name.len(), NUM_JOINTS);
        assert_eq!(js.name[3], "front_left_wheel_to_front_axle");
        assert_eq!(js.position[4], 2.0);
        assert_eq!(js.header.frame_id, BASE_FRAME);
    }

    #[test]
    fn test_restamp() {
        let t0 = Utc.timestamp_opt(0, 0).unwrap();
        let t1 = Utc.timestamp_opt(10, 0).unwrap();

        let mut snapshot = Snapshot {
            joint_state: JointState::from_positions(t0, [0.0; NUM_JOINTS]),
            transform: TransformStamped {
                header: Header::new(t0, ODOM_FRAME),
                child_frame_id: BASE_FRAME.into(),
                translation: Vector3::default(),
                rotation: Quaternion::default()
            },
            odometry: Odometry {
                header: Header::new(t0, ODOM_FRAME),
                child_frame_id: BASE_FRAME.into(),
                pose: Pose {
                    position: Vector3::default(),
                    orientation: Quaternion::default()
                },
                twist: Twist::stop()
            }
        };

        snapshot.restamp(t1);

        assert_eq!(snapshot.stamp(), t1);
        assert_eq!(snapshot.transform.header.stamp, t1);
        assert_eq!(snapshot.odometry.header.stamp, t1);
    }
}

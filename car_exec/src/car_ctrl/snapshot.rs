//! Snapshot assembly
//!
//! Builds the three published messages out of the car's state.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use std::f64::consts::FRAC_PI_2;

use comms_if::{
    geometry,
    tc::car_ctrl::Twist,
    tm::{
        Header, JointState, Odometry, Pose, Snapshot, TransformStamped,
        BASE_FRAME, NUM_JOINTS, ODOM_FRAME
    }
};
use util::convert::{yaw_to_quaternion, Convert};

use super::{FRONT_LEFT_JOINT, FRONT_RIGHT_JOINT, REAR_JOINTS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The parts of the car's state that appear in a snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotSource<'a> {
    pub str_left_rad: f64,
    pub str_right_rad: f64,
    pub rear_rotation_rad: f64,
    pub heading_rad: f64,
    pub displacement_m: &'a Vector3<f64>,

    /// The command that produced this state
    pub twist: &'a Twist
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Assemble a snapshot stamped with `stamp`.
///
/// The base footprint's transform is rotated by a quarter turn less than the heading, since the
/// car model faces along its body Y axis. The odometry pose uses the heading directly.
pub fn assemble(source: &SnapshotSource, stamp: DateTime<Utc>) -> Snapshot {
    let mut position = [0f64; NUM_JOINTS];
    position[FRONT_LEFT_JOINT] = source.str_left_rad;
    position[FRONT_RIGHT_JOINT] = source.str_right_rad;
    for &i in REAR_JOINTS.iter() {
        position[i] = source.rear_rotation_rad;
    }

    let translation: geometry::Vector3 = source.displacement_m.convert();

    Snapshot {
        joint_state: JointState::from_positions(stamp, position),
        transform: TransformStamped {
            header: Header::new(stamp, ODOM_FRAME),
            child_frame_id: BASE_FRAME.to_string(),
            translation,
            rotation: yaw_to_quaternion(source.heading_rad - FRAC_PI_2)
        },
        odometry: Odometry {
            header: Header::new(stamp, ODOM_FRAME),
            child_frame_id: BASE_FRAME.to_string(),
            pose: Pose {
                position: translation,
                orientation: yaw_to_quaternion(source.heading_rad)
            },
            twist: *source.twist
        }
    }
}

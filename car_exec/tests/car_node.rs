//! # Car node tests
//!
//! Drive a `CarNode` through a recording sink and check what would have been published.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use approx::assert_abs_diff_eq;
use chrono::{Duration as ChronoDuration, Utc};
use std::f64::consts::{FRAC_PI_2, PI};
use std::time::{Duration, Instant};

use car_lib::{
    car_ctrl::{CarCtrl, Params},
    car_node::{CarNode, StateSink}
};
use comms_if::{
    tc::{car_ctrl::Twist, Tc},
    tm::{Snapshot, JOINT_NAMES}
};

// ------------------------------------------------------------------------------------------------
// SINKS
// ------------------------------------------------------------------------------------------------

/// Keeps every snapshot it is given.
#[derive(Default)]
struct RecordingSink {
    snapshots: Vec<Snapshot>
}

impl StateSink for RecordingSink {
    type Error = String;

    fn publish(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.snapshots.push(snapshot.clone());
        Ok(())
    }
}

/// Refuses every snapshot.
#[derive(Default)]
struct FailingSink {
    attempts: usize
}

impl StateSink for FailingSink {
    type Error = String;

    fn publish(&mut self, _snapshot: &Snapshot) -> Result<(), Self::Error> {
        self.attempts += 1;
        Err(String::from("sink offline"))
    }
}

fn node() -> CarNode<RecordingSink> {
    CarNode::new(CarCtrl::new(Params::default(), Utc::now()), RecordingSink::default()).unwrap()
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[test]
fn test_one_snapshot_per_command() {
    let mut node = node();

    let cmds = [
        Twist::planar(1.0, 1.0),
        Twist::planar(1.0, 0.0),
        Twist::planar(0.0, -1.0),
        Twist::planar(-1.0, 0.0),
    ];

    for cmd in cmds.iter() {
        node.handle_command(cmd, Utc::now());
    }

    let published = &node.sink().snapshots;
    assert_eq!(published.len(), cmds.len());

    // Each snapshot echoes the command which produced it
    for (snapshot, cmd) in published.iter().zip(cmds.iter()) {
        assert_eq!(&snapshot.odometry.twist, cmd);
        assert_eq!(snapshot.joint_state.name.len(), JOINT_NAMES.len());
    }

    // Rear wheels: +pi, +pi, 0, -pi
    assert_eq!(published[0].joint_state.position[5], PI);
    assert_eq!(published[1].joint_state.position[6], 2.0 * PI);
    assert_eq!(published[2].joint_state.position[5], 2.0 * PI);
    assert_eq!(published[3].joint_state.position[5], PI);

    // Left, straight, right: back to facing +Y
    assert_abs_diff_eq!(node.car_ctrl().heading_rad(), FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn test_heartbeat_publishes_nothing() {
    let mut node = node();

    assert!(node.handle_tc(&Tc::Heartbeat, Utc::now()).is_none());
    assert!(node.sink().snapshots.is_empty());
    assert!(!node.car_ctrl().has_received_command());

    let report = node.handle_tc(&Tc::Drive(Twist::planar(0.0, 1.0)), Utc::now());
    assert!(report.unwrap().turn_left);
    assert_eq!(node.sink().snapshots.len(), 1);
}

#[test]
fn test_idle_until_first_command() {
    let mut node = node();
    let t0 = Instant::now();
    let stamp0 = Utc::now();

    // A 50 ms cycle for 3 seconds publishes at 0, 1 and 2 s
    for i in 0..60 {
        node.tick(
            t0 + Duration::from_millis(50 * i),
            stamp0 + ChronoDuration::milliseconds(50 * i as i64)
        );
    }

    let idle_snapshots = node.sink().snapshots.len();
    assert_eq!(idle_snapshots, 3);
    assert_eq!(node.idle().num_published(), 3);

    // Idle snapshots are the initial state with fresh stamps
    let published = &node.sink().snapshots;
    assert_eq!(published[0].joint_state.position, published[2].joint_state.position);
    assert!(published[2].stamp() > published[0].stamp());
    assert_eq!(published[1].odometry.twist, Twist::stop());

    // The first command stops the idle snapshots for good
    node.handle_command(&Twist::planar(1.0, 0.0), Utc::now());

    for i in 60..200 {
        node.tick(
            t0 + Duration::from_millis(50 * i),
            stamp0 + ChronoDuration::milliseconds(50 * i as i64)
        );
    }

    assert_eq!(node.sink().snapshots.len(), idle_snapshots + 1);
    assert!(node.idle().is_finished());
}

#[test]
fn test_commands_drained_in_order() {
    let mut node = node();

    // Many commands arriving within one cycle are all applied, none dropped
    for _ in 0..10 {
        node.handle_command(&Twist::planar(0.0, 1.0), Utc::now());
    }
    node.tick(Instant::now(), Utc::now());

    assert_eq!(node.sink().snapshots.len(), 10);
    assert_abs_diff_eq!(
        node.car_ctrl().heading_rad(),
        FRAC_PI_2 + 10.0 * PI / 72.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_invalid_params_rejected() {
    let mut params = Params::default();
    params.idle_period_s = -1.0;

    let node = CarNode::new(CarCtrl::new(params, Utc::now()), RecordingSink::default());
    assert!(node.is_err());

    // Periods which cannot be turned into a Duration are refused rather than panicking
    for idle in [1e30, f64::NAN].iter() {
        let mut params = Params::default();
        params.idle_period_s = *idle;

        let node = CarNode::new(CarCtrl::new(params, Utc::now()), RecordingSink::default());
        assert!(node.is_err());
    }
}

#[test]
fn test_sink_errors_not_fatal() {
    let mut node = CarNode::new(CarCtrl::default(), FailingSink::default()).unwrap();

    node.tick(Instant::now(), Utc::now());
    node.handle_command(&Twist::planar(1.0, 0.0), Utc::now());
    node.handle_command(&Twist::planar(1.0, 0.0), Utc::now());

    assert_eq!(node.sink().attempts, 3);
    assert_eq!(node.car_ctrl().rear_rotation_rad(), 2.0 * PI);
}

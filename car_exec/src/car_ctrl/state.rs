//! Implementations for the CarCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::{DateTime, Utc};
use log::{debug, info, trace};
use nalgebra::Vector3;
use serde::Serialize;
use std::convert::Infallible;

// Internal
use super::{
    assemble, interpret, quantize,
    CarCtrlError, Direction, Params, SnapshotSource
};
use comms_if::{tc::car_ctrl::Twist, tm::Snapshot};
use util::{
    params,
    maths::{get_ang_dist_2pi, sign, wrap_2pi},
    module::State,
    session::Session,
    time::duration_to_seconds
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Car control module state.
///
/// Holds the car's persistent kinematic state and applies each velocity command to it in turn.
/// Every update produces the [`Snapshot`] to publish.
#[derive(Debug)]
pub struct CarCtrl {

    pub(crate) params: Params,

    // ---- STEERING AND WHEELS ----

    /// Front left wheel steer angle
    ///
    /// Units: radians
    str_left_rad: f64,

    /// Front right wheel steer angle
    ///
    /// Units: radians
    str_right_rad: f64,

    /// Accumulated rotation of the rear wheels, never wrapped.
    ///
    /// Units: radians
    rear_rotation_rad: f64,

    // ---- POSE ----

    /// Heading in the odom frame, kept in [0, 2pi).
    ///
    /// Units: radians
    heading_rad: f64,

    /// Dead-reckoned position in the odom frame.
    ///
    /// Units: meters
    displacement_m: Vector3<f64>,

    // ---- CHANGE DETECTION ----

    /// Last remembered forward speed, used as the reference for the turn ratio
    last_linear_x: f64,

    /// Lateral reference, always the negation of `last_linear_x`
    last_lateral_y: f64,

    /// Last remembered turn rate
    last_angular_z: f64,

    /// Turn rate over reference speed, `None` until the first change of turn rate or when the
    /// reference speed is zero.
    turn_ratio: Option<f64>,

    // ---- COMMAND TRACKING ----

    has_received_command: bool,

    last_cmd: Twist,

    last_stamp: Option<DateTime<Utc>>,

    current_stamp: DateTime<Utc>,

    turn_left: bool,

    turn_right: bool,

    // ---- OUTPUT ----

    pub(crate) report: StatusReport,

    snapshot: Snapshot
}

/// Input data to Car control.
#[derive(Debug, Clone, Copy)]
pub struct InputData {
    /// The velocity command to apply, or `None` if there is no new command this cycle.
    pub cmd: Option<Twist>,

    /// Time at which the command was recieved
    pub stamp: DateTime<Utc>
}

/// Status report for CarCtrl processing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StatusReport {
    /// The heading increased in the last update (and did not land on a cardinal)
    pub turn_left: bool,

    /// The heading decreased in the last update (and did not land on a cardinal)
    pub turn_right: bool,

    /// Direction the displacement was accumulated along
    pub direction: Direction,

    /// The magnitude of the forward speed changed
    pub linear_changed: bool,

    /// The magnitude of the turn rate changed
    pub angular_changed: bool,

    /// The command was lateral, so had no steering, rear wheel or heading effect
    pub lateral: bool,

    pub turn_ratio: Option<f64>,

    /// Time since the previous update, `None` for the first command.
    ///
    /// Units: seconds
    pub dt_s: Option<f64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for CarCtrl {
    fn default() -> Self {
        Self::new(Params::default(), Utc::now())
    }
}

impl State for CarCtrl {
    type InitData = &'static str;
    type InitError = CarCtrlError;

    type InputData = InputData;
    type OutputData = Snapshot;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the CarCtrl module.
    ///
    /// Expected init data is the path to the parameter file. The car is reset to its initial
    /// state.
    fn init(&mut self, init_data: Self::InitData, _session: &Session)
        -> Result<(), Self::InitError>
    {
        let params: Params = params::load(init_data)
            .map_err(CarCtrlError::ParamLoadError)?;

        params.validate()?;

        *self = Self::new(params, Utc::now());

        Ok(())
    }

    /// Perform cyclic processing of Car control.
    ///
    /// Without a command the current snapshot is returned unchanged.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        match input_data.cmd {
            Some(ref cmd) => Ok(self.apply(cmd, input_data.stamp)),
            None => Ok((self.snapshot.clone(), self.report))
        }
    }
}

impl CarCtrl {

    /// Create the car in its initial state, at rest facing along +Y.
    pub fn new(params: Params, stamp: DateTime<Utc>) -> Self {
        let heading_rad = wrap_2pi(params.initial_heading_rad);
        let displacement_m = Vector3::zeros();
        let last_cmd = Twist::stop();

        let snapshot = assemble(
            &SnapshotSource {
                str_left_rad: 0.0,
                str_right_rad: 0.0,
                rear_rotation_rad: 0.0,
                heading_rad,
                displacement_m: &displacement_m,
                twist: &last_cmd
            },
            stamp
        );

        Self {
            str_left_rad: 0.0,
            str_right_rad: 0.0,
            rear_rotation_rad: 0.0,
            heading_rad,
            displacement_m,
            last_linear_x: params.initial_ref_speed_ms,
            last_lateral_y: -params.initial_ref_speed_ms,
            last_angular_z: params.initial_heading_rad,
            turn_ratio: None,
            has_received_command: false,
            last_cmd,
            last_stamp: None,
            current_stamp: stamp,
            turn_left: false,
            turn_right: false,
            report: StatusReport::default(),
            snapshot,
            params
        }
    }

    /// Apply a velocity command recieved at `stamp`.
    ///
    /// Returns the snapshot of the updated state along with a report on the update. Non-finite
    /// command components are not checked for here and will propagate into the state, they
    /// should be rejected before reaching the car.
    pub fn apply(&mut self, cmd: &Twist, stamp: DateTime<Utc>) -> (Snapshot, StatusReport) {
        self.report = StatusReport::default();

        let last_stamp = self.current_stamp;
        self.last_stamp = Some(last_stamp);
        self.current_stamp = stamp;

        if !self.has_received_command {
            info!("First command recieved");
            self.has_received_command = true;
        }
        else {
            self.report.dt_s = duration_to_seconds(stamp - last_stamp);
        }

        self.detect_changes(cmd);

        // ---- INTERPRETATION ----

        let prev_heading_rad = self.heading_rad;

        match interpret(cmd, &self.params) {
            Some(i) => {
                self.str_left_rad = i.str_left_rad;
                self.str_right_rad = i.str_right_rad;
                self.rear_rotation_rad += i.rear_delta_rad;
                self.heading_rad = wrap_2pi(self.heading_rad + i.heading_delta_rad);
            },
            None => self.report.lateral = true
        }

        // ---- TURN DIRECTION ----

        let direction = quantize(self.heading_rad, self.params.cardinal_tolerance_rad);

        match sign(get_ang_dist_2pi(prev_heading_rad, self.heading_rad)) {
            _ if direction.cardinal => {
                self.turn_left = false;
                self.turn_right = false;
            },
            1 => {
                self.turn_left = true;
                self.turn_right = false;
            },
            -1 => {
                self.turn_left = false;
                self.turn_right = true;
            },
            _ => {
                self.turn_left = false;
                self.turn_right = false;
            }
        }

        // ---- DEAD RECKONING ----

        self.displacement_m.x += direction.x_sign as f64 * cmd.linear.x;
        self.displacement_m.y += direction.y_sign as f64 * cmd.linear.x;
        self.displacement_m.z += cmd.linear.z;

        // ---- OUTPUT ----

        self.last_cmd = *cmd;
        self.snapshot = self.build_snapshot(stamp);

        self.report.turn_left = self.turn_left;
        self.report.turn_right = self.turn_right;
        self.report.direction = direction;
        self.report.turn_ratio = self.turn_ratio;

        debug!(
            "CarCtrl applied cmd (x: {}, y: {}, z: {}, wz: {}): heading {:.4} rad, rear {:.4} rad",
            cmd.linear.x, cmd.linear.y, cmd.linear.z, cmd.angular.z,
            self.heading_rad, self.rear_rotation_rad
        );
        trace!("CarCtrl status: {:?}", self.report);

        (self.snapshot.clone(), self.report)
    }

    /// Update the current snapshot's stamp and return it, without changing any other state.
    pub fn restamp(&mut self, stamp: DateTime<Utc>) -> Snapshot {
        self.snapshot.restamp(stamp);
        self.snapshot.clone()
    }

    /// The most recent snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// True once any command has been applied.
    pub fn has_received_command(&self) -> bool {
        self.has_received_command
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Heading in the odom frame, in [0, 2pi).
    pub fn heading_rad(&self) -> f64 {
        self.heading_rad
    }

    /// Front left and right steer angles.
    pub fn steering_rad(&self) -> (f64, f64) {
        (self.str_left_rad, self.str_right_rad)
    }

    pub fn rear_rotation_rad(&self) -> f64 {
        self.rear_rotation_rad
    }

    pub fn displacement_m(&self) -> &Vector3<f64> {
        &self.displacement_m
    }

    /// Left and right turn flags from the last update.
    pub fn turn_flags(&self) -> (bool, bool) {
        (self.turn_left, self.turn_right)
    }

    pub fn turn_ratio(&self) -> Option<f64> {
        self.turn_ratio
    }

    /// Stamps of the previous and current update.
    pub fn stamps(&self) -> (Option<DateTime<Utc>>, DateTime<Utc>) {
        (self.last_stamp, self.current_stamp)
    }

    /// Remembered forward speed, lateral reference and turn rate.
    pub fn references(&self) -> (f64, f64, f64) {
        (self.last_linear_x, self.last_lateral_y, self.last_angular_z)
    }

    /// Compare the command against the remembered speed and turn rate.
    ///
    /// Only magnitudes are compared, so reversing at the same speed is not a change.
    fn detect_changes(&mut self, cmd: &Twist) {
        let tol = self.params.change_tolerance;

        if (cmd.linear.x.abs() - self.last_linear_x.abs()).abs() > tol {
            self.last_linear_x = cmd.linear.x;
            self.last_lateral_y = -cmd.linear.x;
            self.report.linear_changed = true;
        }

        if (cmd.angular.z.abs() - self.last_angular_z.abs()).abs() > tol {
            self.last_angular_z = cmd.angular.z;
            self.turn_ratio = match self.last_linear_x.abs() > tol {
                true => Some(cmd.angular.z / self.last_linear_x),
                false => None
            };
            self.report.angular_changed = true;
        }
    }

    fn build_snapshot(&self, stamp: DateTime<Utc>) -> Snapshot {
        assemble(
            &SnapshotSource {
                str_left_rad: self.str_left_rad,
                str_right_rad: self.str_right_rad,
                rear_rotation_rad: self.rear_rotation_rad,
                heading_rad: self.heading_rad,
                displacement_m: &self.displacement_m,
                twist: &self.last_cmd
            },
            stamp
        )
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

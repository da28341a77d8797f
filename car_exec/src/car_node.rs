//! # Car node
//!
//! Ties the car's state to the place its snapshots are published. Commands go in through
//! [`CarNode::handle_tc`] (or [`CarNode::handle_command`]), and [`CarNode::tick`] must be called
//! once per cycle so the idle republisher can run.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::time::{Duration, Instant};

use comms_if::{tc::{car_ctrl::Twist, Tc}, tm::Snapshot};
use util::module::State;

use crate::{
    car_ctrl::{CarCtrl, CarCtrlError, InputData, StatusReport},
    idle::IdleRepublisher
};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// Somewhere to publish the car's snapshots.
pub trait StateSink {
    type Error: std::fmt::Display;

    /// Publish all three messages of a snapshot.
    fn publish(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// The car, its idle republisher and the sink both publish to.
pub struct CarNode<S: StateSink> {
    car_ctrl: CarCtrl,

    idle: IdleRepublisher,

    sink: S
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<S: StateSink> CarNode<S> {
    /// Create a new node.
    ///
    /// The idle period is taken from the car's parameters, which are validated here.
    pub fn new(car_ctrl: CarCtrl, sink: S) -> Result<Self, CarCtrlError> {
        car_ctrl.params().validate()?;

        let idle = IdleRepublisher::new(
            Duration::from_secs_f64(car_ctrl.params().idle_period_s)
        );

        Ok(Self {
            car_ctrl,
            idle,
            sink
        })
    }

    /// Execute a telecommand.
    pub fn handle_tc(&mut self, tc: &Tc, stamp: DateTime<Utc>) -> Option<StatusReport> {
        match tc {
            Tc::Heartbeat => {
                debug!("Heartbeat recieved");
                None
            },
            Tc::Drive(twist) => Some(self.handle_command(twist, stamp))
        }
    }

    /// Apply a velocity command and publish the resulting snapshot.
    pub fn handle_command(&mut self, cmd: &Twist, stamp: DateTime<Utc>) -> StatusReport {
        let (snapshot, report) = match self.car_ctrl.proc(&InputData {
            cmd: Some(*cmd),
            stamp
        }) {
            Ok(o) => o,
            Err(e) => match e {}
        };

        self.publish(&snapshot);

        report
    }

    /// Run the idle republisher, publishing a snapshot if one is due.
    pub fn tick(&mut self, now: Instant, stamp: DateTime<Utc>) {
        if let Some(snapshot) = self.idle.poll(now, stamp, &mut self.car_ctrl) {
            self.publish(&snapshot);
        }
    }

    pub fn car_ctrl(&self) -> &CarCtrl {
        &self.car_ctrl
    }

    pub fn idle(&self) -> &IdleRepublisher {
        &self.idle
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Publish errors are not fatal, the next snapshot supersedes this one anyway.
    fn publish(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.sink.publish(snapshot) {
            warn!("Could not publish the car's state: {}", e);
        }
    }
}

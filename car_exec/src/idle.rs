//! # Idle republisher
//!
//! Until the car recieves its first command nothing would be published, leaving any visualiser
//! without a model to draw. The idle republisher fixes this by re-emitting the car's initial
//! snapshot, freshly stamped, once per idle period. As soon as the car has recieved a command it
//! finishes for good.
//!
//! The republisher is polled from the main loop rather than run on its own thread, so it can
//! never observe the car part way through an update.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use log::{info, trace};
use std::time::{Duration, Instant};

use comms_if::tm::Snapshot;

use crate::car_ctrl::CarCtrl;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Republishes the car's snapshot at a fixed period until the first command arrives.
#[derive(Debug)]
pub struct IdleRepublisher {
    period: Duration,

    /// When the next snapshot is due, `None` before the first poll
    next_due: Option<Instant>,

    finished: bool,

    num_published: u64
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl IdleRepublisher {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
            finished: false,
            num_published: 0
        }
    }

    /// Poll the republisher.
    ///
    /// Returns the car's current snapshot restamped with `stamp` if one is due at `now`. The
    /// first poll always publishes. Returns `None` if none is due, or forever once the car has
    /// recieved a command.
    pub fn poll(
        &mut self,
        now: Instant,
        stamp: DateTime<Utc>,
        car_ctrl: &mut CarCtrl
    ) -> Option<Snapshot> {
        if self.finished {
            return None
        }

        if car_ctrl.has_received_command() {
            self.finished = true;
            info!(
                "Command recieved, idle republisher finished after {} snapshots",
                self.num_published
            );
            return None
        }

        match self.next_due {
            Some(due) if now < due => None,
            _ => {
                self.next_due = Some(now + self.period);
                self.num_published += 1;
                trace!("Republishing idle snapshot {}", self.num_published);

                Some(car_ctrl.restamp(stamp))
            }
        }
    }

    /// True once the republisher has stopped for good.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of snapshots published so far.
    pub fn num_published(&self) -> u64 {
        self.num_published
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::car_ctrl::Twist;

    #[test]
    fn test_idle_cadence() {
        let mut car = CarCtrl::default();
        let mut idle = IdleRepublisher::new(Duration::from_secs(1));
        let t0 = Instant::now();

        // First poll publishes immediately
        assert!(idle.poll(t0, Utc::now(), &mut car).is_some());

        // Nothing more until a full period has passed
        assert!(idle.poll(t0 + Duration::from_millis(500), Utc::now(), &mut car).is_none());
        assert!(idle.poll(t0 + Duration::from_millis(999), Utc::now(), &mut car).is_none());
        assert!(idle.poll(t0 + Duration::from_millis(1000), Utc::now(), &mut car).is_some());

        assert_eq!(idle.num_published(), 2);
        assert!(!idle.is_finished());
    }

    #[test]
    fn test_idle_restamps_without_update() {
        let mut car = CarCtrl::default();
        let mut idle = IdleRepublisher::new(Duration::from_secs(1));
        let initial = car.snapshot().clone();

        let stamp = initial.stamp() + chrono::Duration::seconds(5);
        let snapshot = idle.poll(Instant::now(), stamp, &mut car).unwrap();

        assert_eq!(snapshot.stamp(), stamp);
        assert_eq!(snapshot.joint_state.position, initial.joint_state.position);
        assert_eq!(snapshot.odometry.pose, initial.odometry.pose);
        assert!(!car.has_received_command());
    }

    #[test]
    fn test_idle_finishes_after_command() {
        let mut car = CarCtrl::default();
        let mut idle = IdleRepublisher::new(Duration::from_secs(1));
        let t0 = Instant::now();

        assert!(idle.poll(t0, Utc::now(), &mut car).is_some());

        car.apply(&Twist::stop(), Utc::now());

        // Even when overdue nothing is published once a command has arrived
        for i in 1..10 {
            assert!(idle.poll(t0 + Duration::from_secs(i), Utc::now(), &mut car).is_none());
        }

        assert!(idle.is_finished());
        assert_eq!(idle.num_published(), 1);
    }
}

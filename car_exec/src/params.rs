//! # Car Executable Parameters
//!
//! This module provide parameters for the car executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarExecParams {

    /// Target period of one cycle of the main loop. Must not be longer than the car's idle
    /// period, otherwise idle snapshots would be published late.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Minimum level of log messages to record, for example `"debug"`.
    pub log_level: String
}

impl Default for CarExecParams {
    fn default() -> Self {
        Self {
            cycle_period_s: 0.05,
            log_level: String::from("info")
        }
    }
}

impl CarExecParams {
    /// Whether the cycle period is positive and no longer than the given idle period.
    pub fn cycle_period_fits(&self, idle_period_s: f64) -> bool {
        self.cycle_period_s.is_finite()
            && self.cycle_period_s > 0.0
            && self.cycle_period_s <= idle_period_s
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn with_cycle(cycle_period_s: f64) -> CarExecParams {
        CarExecParams {
            cycle_period_s,
            ..Default::default()
        }
    }

    #[test]
    fn test_cycle_period_fits() {
        assert!(CarExecParams::default().cycle_period_fits(1.0));
        assert!(with_cycle(1.0).cycle_period_fits(1.0));

        assert!(!with_cycle(1.5).cycle_period_fits(1.0));
        assert!(!with_cycle(0.0).cycle_period_fits(1.0));
        assert!(!with_cycle(-0.05).cycle_period_fits(1.0));
        assert!(!with_cycle(f64::NAN).cycle_period_fits(1.0));
        assert!(!with_cycle(f64::INFINITY).cycle_period_fits(f64::INFINITY));
        assert!(!CarExecParams::default().cycle_period_fits(f64::NAN));
    }
}

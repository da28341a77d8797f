//! Heading quantizer
//!
//! The car dead-reckons its displacement along one of eight fixed directions rather than along
//! its true heading. This module picks that direction.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};

use util::maths::{get_ang_dist_2pi, wrap_2pi};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The cardinal headings and the direction each one maps to.
const CARDINALS: [(f64, Direction); 4] = [
    (0.0, Direction { x_sign: 1, y_sign: 0, cardinal: true }),
    (FRAC_PI_2, Direction { x_sign: 0, y_sign: 1, cardinal: true }),
    (PI, Direction { x_sign: -1, y_sign: 0, cardinal: true }),
    (3.0 * FRAC_PI_2, Direction { x_sign: 0, y_sign: -1, cardinal: true }),
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// One of the eight directions a heading is quantized to.
///
/// The signs are applied to the commanded speed when accumulating displacement along the odom
/// frame's X and Y axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Direction {
    pub x_sign: i8,
    pub y_sign: i8,

    /// True if the heading lies on one of the four axis-aligned headings.
    pub cardinal: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Direction {
    /// The direction of the car's initial heading, along +Y.
    fn default() -> Self {
        CARDINALS[1].1
    }
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Quantize a heading into one of the eight octant directions.
///
/// Headings within `tolerance_rad` of a cardinal (measured around the circle, so a heading just
/// below 2pi is close to 0) give that cardinal's direction. Anything else gives the direction of
/// the octant it lies in. A `NaN` heading lies in no octant and falls through to `(1, -1)`.
pub fn quantize(heading_rad: f64, tolerance_rad: f64) -> Direction {
    for (cardinal_rad, direction) in CARDINALS.iter() {
        if get_ang_dist_2pi(heading_rad, *cardinal_rad).abs() <= tolerance_rad {
            return *direction
        }
    }

    let heading_rad = wrap_2pi(heading_rad);

    let (x_sign, y_sign) = if heading_rad < FRAC_PI_2 {
        (1, 1)
    }
    else if heading_rad < PI {
        (-1, 1)
    }
    else if heading_rad < 3.0 * FRAC_PI_2 {
        (-1, -1)
    }
    else {
        (1, -1)
    };

    Direction {
        x_sign,
        y_sign,
        cardinal: false
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const TOL: f64 = 1e-6;

    fn signs(d: Direction) -> (i8, i8, bool) {
        (d.x_sign, d.y_sign, d.cardinal)
    }

    #[test]
    fn test_cardinals() {
        assert_eq!(signs(quantize(0.0, TOL)), (1, 0, true));
        assert_eq!(signs(quantize(FRAC_PI_2, TOL)), (0, 1, true));
        assert_eq!(signs(quantize(PI, TOL)), (-1, 0, true));
        assert_eq!(signs(quantize(3.0 * FRAC_PI_2, TOL)), (0, -1, true));
    }

    #[test]
    fn test_cardinals_within_tolerance() {
        // Just below 2pi is next to 0
        assert_eq!(signs(quantize(std::f64::consts::TAU - 1e-9, TOL)), (1, 0, true));
        assert_eq!(signs(quantize(PI + 1e-8, TOL)), (-1, 0, true));
        assert_eq!(signs(quantize(FRAC_PI_2 - 1e-8, TOL)), (0, 1, true));

        // Outside the tolerance the octant is used
        assert_eq!(signs(quantize(PI + 1e-3, TOL)), (-1, -1, false));
    }

    #[test]
    fn test_octants() {
        assert_eq!(signs(quantize(0.3, TOL)), (1, 1, false));
        assert_eq!(signs(quantize(2.0, TOL)), (-1, 1, false));
        assert_eq!(signs(quantize(4.0, TOL)), (-1, -1, false));
        assert_eq!(signs(quantize(5.5, TOL)), (1, -1, false));
    }

    #[test]
    fn test_zero_tolerance() {
        // With no tolerance only exact cardinals count
        assert_eq!(signs(quantize(PI, 0.0)), (-1, 0, true));
        assert_eq!(signs(quantize(PI + 1e-12, 0.0)), (-1, -1, false));
    }

    #[test]
    fn test_nan() {
        assert_eq!(signs(quantize(f64::NAN, TOL)), (1, -1, false));
    }
}

//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of whole turns beyond which `wrap_2pi` stops adding or subtracting
/// 2pi one turn at a time.
pub const WRAP_LOOP_LIMIT: f64 = 64.0;

/// The sign of a value: `1` if strictly positive, `-1` if strictly negative,
/// `0` otherwise.
///
/// `NaN` is neither positive nor negative so gives `0`.
pub fn sign<T>(value: T) -> i8
where
    T: Float
{
    if value > T::zero() {
        1
    }
    else if value < T::zero() {
        -1
    }
    else {
        0
    }
}

/// Wrap an angle into the range [0, 2pi) by repeatedly adding or subtracting
/// 2pi.
///
/// For finite inputs this agrees with `rem_euclid(angle, 2pi)` up to floating
/// point rounding. Non-finite inputs are returned unchanged, since no number
/// of adjustments would bring them into range.
///
/// Angles more than `WRAP_LOOP_LIMIT` turns away from the range are reduced
/// with `rem_euclid` instead, as adding 2pi to a large enough float does not
/// change it.
pub fn wrap_2pi<T>(angle: T) -> T
where
    T: Float
{
    if !angle.is_finite() {
        return angle
    }

    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();
    let limit_t: T = T::from(WRAP_LOOP_LIMIT).unwrap() * tau_t;

    let mut wrapped = if angle.abs() > limit_t {
        rem_euclid(angle, tau_t)
    }
    else {
        angle
    };

    while wrapped < T::zero() {
        wrapped = wrapped + tau_t;
    }
    while wrapped >= tau_t {
        wrapped = wrapped - tau_t;
    }

    wrapped
}

/// Get the signed angular distance between two angles in the range of [0, 2pi].
///
/// This function will return the shortest signed distance between a and b accounting for wrapping
/// between 0 and 2pi.
pub fn get_ang_dist_2pi<T>(a: T, b: T) -> T
where
    T: Float
{
    let tau_t: T = T::from(std::f64::consts::TAU).unwrap();

    let c = rem_euclid(a - b, tau_t);
    let d = rem_euclid(b - a, tau_t);

    if c < d {
        -c
    }
    else {
        d
    }
}

/// Calculates the least nonnegative remainder of `lhs (mod rhs)`.
///
/// This function is taken from the std library as num is missing it.
///
/// In particular, the return value `r` satisfies `0.0 <= r < rhs.abs()` in
/// most cases. However, due to a floating point round-off error it can
/// result in `r == rhs.abs()` if `self` is much smaller than `rhs.abs()` in
/// magnitude and `self < 0.0`.
pub fn rem_euclid<T>(lhs: T, rhs: T) -> T
where
    T: Float
{
    let r = lhs % rhs;
    if r < T::zero() { r + rhs.abs() } else { r }
}

#[cfg(test)]
mod test {
    use super::*;

    const TAU: f64 = std::f64::consts::TAU;
    const PI: f64 = std::f64::consts::PI;

    #[test]
    fn test_get_ang_dist_2pi() {
        assert_eq!(get_ang_dist_2pi(1f64, 2f64), 1f64);
        assert_eq!(get_ang_dist_2pi(2f64, 1f64), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU), 0f64);
        assert_eq!(get_ang_dist_2pi(TAU, 0f64), 0f64);
        assert_eq!(get_ang_dist_2pi(1f64, TAU), -1f64);
        assert_eq!(get_ang_dist_2pi(0f64, TAU - 1f64), -1f64);
    }

    #[test]
    fn test_wrap_2pi() {
        assert_eq!(wrap_2pi(0f64), 0f64);
        assert_eq!(wrap_2pi(PI), PI);
        assert_eq!(wrap_2pi(TAU), 0f64);
        assert_eq!(wrap_2pi(-PI), PI);
        assert!((wrap_2pi(5.0 * TAU + 1.0) - 1.0).abs() < 1e-9);
        assert!((wrap_2pi(-3.0 * TAU - 1.0) - (TAU - 1.0)).abs() < 1e-9);

        let tiny_negative = wrap_2pi(-1e-18f64);
        assert!(tiny_negative >= 0.0 && tiny_negative < TAU);

        assert!(wrap_2pi(f64::NAN).is_nan());
        assert_eq!(wrap_2pi(f64::INFINITY), f64::INFINITY);
    }

    #[test]
    fn test_wrap_large_angles() {
        // Subtracting 2pi from these leaves them unchanged
        for angle in [1e20, -1e20, PI / 2.0 + 1e20, f64::MAX, f64::MIN].iter() {
            let wrapped = wrap_2pi(*angle);
            assert!(wrapped >= 0.0 && wrapped < TAU, "{} wrapped to {}", angle, wrapped);
        }

        // Just past the loop limit both methods agree
        let angle = (WRAP_LOOP_LIMIT + 1.0) * TAU + 1.0;
        assert!((wrap_2pi(angle) - 1.0).abs() < 1e-9);
        assert!((wrap_2pi(-angle) - (TAU - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_matches_rem_euclid() {
        for i in -50..50 {
            let angle = i as f64 * 0.77;
            assert!((wrap_2pi(angle) - rem_euclid(angle, TAU)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_sign() {
        assert_eq!(sign(2.5f64), 1);
        assert_eq!(sign(-0.1f64), -1);
        assert_eq!(sign(0f64), 0);
        assert_eq!(sign(-0f64), 0);
        assert_eq!(sign(f64::NAN), 0);
    }
}

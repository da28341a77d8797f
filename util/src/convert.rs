//! Implements `Convert` functions between nalgebra types and the wire types in
//! `comms_if::geometry`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::{UnitQuaternion, Vector3};

use comms_if::geometry;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

pub trait Convert<O> {
    fn convert(&self) -> O;
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Convert<geometry::Vector3> for Vector3<f64> {
    fn convert(&self) -> geometry::Vector3 {
        geometry::Vector3::new(self.x, self.y, self.z)
    }
}

impl Convert<Vector3<f64>> for geometry::Vector3 {
    fn convert(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl Convert<geometry::Quaternion> for UnitQuaternion<f64> {
    fn convert(&self) -> geometry::Quaternion {
        let q = self.quaternion();
        geometry::Quaternion {
            x: q.i,
            y: q.j,
            z: q.k,
            w: q.w
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the wire quaternion for a rotation of `yaw_rad` about the Z axis.
pub fn yaw_to_quaternion(yaw_rad: f64) -> geometry::Quaternion {
    UnitQuaternion::from_euler_angles(0.0, 0.0, yaw_rad).convert()
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_yaw_to_quaternion() {
        let q = yaw_to_quaternion(0.0);
        assert!((q.w - 1.0).abs() < 1e-12);
        assert!(q.z.abs() < 1e-12);

        // A quarter turn about Z is (0, 0, sin(pi/4), cos(pi/4))
        let q = yaw_to_quaternion(FRAC_PI_2);
        assert!(q.x.abs() < 1e-12 && q.y.abs() < 1e-12);
        assert!((q.z - (PI / 4.0).sin()).abs() < 1e-12);
        assert!((q.w - (PI / 4.0).cos()).abs() < 1e-12);

        // Unit norm
        let q = yaw_to_quaternion(-2.3);
        let norm = (q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w).sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_vector_round_trip() {
        let v = Vector3::new(1.0, -2.0, 0.5);
        let w: geometry::Vector3 = v.convert();
        assert_eq!(w, geometry::Vector3::new(1.0, -2.0, 0.5));

        let back: Vector3<f64> = w.convert();
        assert_eq!(back, v);
    }
}

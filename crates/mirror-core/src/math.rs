//! Mathematical utilities and type definitions.
//!
//! This module provides the fundamental types used throughout the workspace
//! together with a few angle helpers.

use nalgebra::{Isometry3, Matrix3, Matrix3x4, Point2, Point3, Vector2, Vector3};

/// Scalar type used throughout the workspace (currently `f64`).
pub type Real = f64;

/// 2D vector with [`Real`] components.
pub type Vec2 = Vector2<Real>;
/// 3D vector with [`Real`] components.
pub type Vec3 = Vector3<Real>;
/// 2D point with [`Real`] coordinates.
pub type Pt2 = Point2<Real>;
/// 3D point with [`Real`] coordinates.
pub type Pt3 = Point3<Real>;
/// 3×3 matrix with [`Real`] entries.
pub type Mat3 = Matrix3<Real>;
/// 3×4 matrix with [`Real`] entries (projection matrices).
pub type Mat34 = Matrix3x4<Real>;
/// 3D rigid transform (SE(3)) using [`Real`].
pub type Iso3 = Isometry3<Real>;

/// Convert degrees to radians.
pub fn deg2rad(deg: Real) -> Real {
    deg * std::f64::consts::PI / 180.0
}

/// Wrap an angle into `(-π, π]`.
pub fn normalize_radian(angle: Real) -> Real {
    use std::f64::consts::PI;
    let two_pi = 2.0 * PI;
    let wrapped = (angle + PI).rem_euclid(two_pi) - PI;
    if wrapped <= -PI {
        wrapped + two_pi
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn deg2rad_known_values() {
        assert_relative_eq!(deg2rad(180.0), PI, epsilon = 1e-12);
        assert_relative_eq!(deg2rad(40.0), 0.698_131_700_797_731_8, epsilon = 1e-12);
    }

    #[test]
    fn normalize_radian_wraps_into_half_open_range() {
        assert_relative_eq!(normalize_radian(0.5), 0.5, epsilon = 1e-12);
        assert_relative_eq!(normalize_radian(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_radian(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
        assert_relative_eq!(normalize_radian(PI), PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_radian(-PI), PI, epsilon = 1e-12);
    }
}

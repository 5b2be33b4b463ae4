use serde::{Deserialize, Serialize};

use crate::{Real, Vec2};

/// Radial-tangential lens distortion in normalized image coordinates.
///
/// Covers both ROS models: `plumb_bob` (`k1, k2, p1, p2, k3`) and
/// `rational_polynomial` (`k1, k2, p1, p2, k3, k4, k5, k6`), where `k4..k6`
/// form the denominator of the radial factor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RadialTangential {
    pub k1: Real,
    pub k2: Real,
    pub k3: Real,
    pub k4: Real,
    pub k5: Real,
    pub k6: Real,
    pub p1: Real,
    pub p2: Real,
}

impl RadialTangential {
    /// Coefficients from a ROS `D` vector in `rational_polynomial` order.
    /// Missing trailing entries are zero.
    pub fn rational_polynomial(d: &[Real]) -> Self {
        let at = |i: usize| d.get(i).copied().unwrap_or(0.0);
        Self {
            k1: at(0),
            k2: at(1),
            p1: at(2),
            p2: at(3),
            k3: at(4),
            k4: at(5),
            k5: at(6),
            k6: at(7),
        }
    }

    /// Coefficients from a `plumb_bob` `D` vector; entries past `k3` are ignored.
    pub fn plumb_bob(d: &[Real]) -> Self {
        Self::rational_polynomial(&d[..d.len().min(5)])
    }

    /// All coefficients zero: raw and undistorted images coincide.
    pub fn is_identity(&self) -> bool {
        [
            self.k1, self.k2, self.k3, self.k4, self.k5, self.k6, self.p1, self.p2,
        ]
        .iter()
        .all(|c| *c == 0.0)
    }

    pub fn distort(&self, n: &Vec2) -> Vec2 {
        let (x, y) = (n.x, n.y);
        let r2 = x * x + y * y;
        let r4 = r2 * r2;
        let r6 = r4 * r2;

        let radial = (1.0 + self.k1 * r2 + self.k2 * r4 + self.k3 * r6)
            / (1.0 + self.k4 * r2 + self.k5 * r4 + self.k6 * r6);
        let xy = x * y;
        let x_tan = 2.0 * self.p1 * xy + self.p2 * (r2 + 2.0 * x * x);
        let y_tan = self.p1 * (r2 + 2.0 * y * y) + 2.0 * self.p2 * xy;

        Vec2::new(x * radial + x_tan, y * radial + y_tan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ros_coefficient_order() {
        let d = RadialTangential::rational_polynomial(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
        assert_eq!((d.k1, d.k2, d.p1, d.p2, d.k3), (0.1, 0.2, 0.3, 0.4, 0.5));
        assert_eq!((d.k4, d.k5, d.k6), (0.6, 0.7, 0.8));

        let d = RadialTangential::plumb_bob(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert_eq!(d.k3, 0.5);
        assert_eq!(d.k4, 0.0);
    }

    #[test]
    fn short_d_vector_is_identity() {
        let d = RadialTangential::plumb_bob(&[]);
        assert!(d.is_identity());
        let n = Vec2::new(0.3, -0.2);
        assert_eq!(d.distort(&n), n);
        assert!(!RadialTangential::plumb_bob(&[0.0, 1e-12]).is_identity());
    }

    #[test]
    fn rational_denominator_damps_the_radial_factor() {
        let n = Vec2::new(0.3, 0.4); // r2 = 0.25
        let poly = RadialTangential::rational_polynomial(&[0.2]);
        let rational = RadialTangential::rational_polynomial(&[0.2, 0.0, 0.0, 0.0, 0.0, 0.2]);
        assert_relative_eq!(poly.distort(&n).x, 0.3 * 1.05, epsilon = 1e-12);
        assert_relative_eq!(rational.distort(&n).x, 0.3 * 1.05 / 1.05, epsilon = 1e-12);
    }
}

use mirror_core::{normalize_radian, Iso3, Pt3, Real, Vec3};

/// Pose of the camera in the map at one instant.
///
/// Stores `map_se3_camera` (`T_M_C`): it maps camera-frame points into the
/// map. Its inverse brings map points into the camera frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    map_se3_camera: Iso3,
}

impl CameraPose {
    pub fn new(map_se3_camera: Iso3) -> Self {
        Self { map_se3_camera }
    }

    pub fn map_se3_camera(&self) -> &Iso3 {
        &self.map_se3_camera
    }

    /// Camera center in the map frame.
    pub fn origin(&self) -> Pt3 {
        Pt3::from(self.map_se3_camera.translation.vector)
    }

    /// Express a map-frame point in the camera frame.
    pub fn camera_from_map(&self, p_map: &Pt3) -> Pt3 {
        self.map_se3_camera.inverse_transform_point(p_map)
    }

    /// Yaw of the optical (+z) axis projected onto the map plane.
    pub fn heading(&self) -> Real {
        let axis = self.map_se3_camera.rotation * Vec3::z();
        normalize_radian(axis.y.atan2(axis.x))
    }
}

impl From<Iso3> for CameraPose {
    fn from(map_se3_camera: Iso3) -> Self {
        Self::new(map_se3_camera)
    }
}


#[cfg(test)]
mod tests {
    use super::test_poses::*;
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn forward_facing_camera_sees_x_along_depth() {
        let pose = facing_x_at(0.0, 0.0, 0.0);
        let p_c = pose.camera_from_map(&Pt3::new(10.0, 2.0, 1.0));
        assert_relative_eq!(p_c.x, -2.0, epsilon = 1e-12);
        assert_relative_eq!(p_c.y, -1.0, epsilon = 1e-12);
        assert_relative_eq!(p_c.z, 10.0, epsilon = 1e-12);
        assert_relative_eq!(pose.heading(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn origin_and_heading_follow_translation_and_yaw() {
        let pose = facing_yaw_at(FRAC_PI_2, Vec3::new(3.0, 4.0, 1.5));
        assert_eq!(pose.origin(), Pt3::new(3.0, 4.0, 1.5));
        assert_relative_eq!(pose.heading(), FRAC_PI_2, epsilon = 1e-12);

        let p_c = pose.camera_from_map(&Pt3::new(3.0, 9.0, 1.5));
        assert_relative_eq!(p_c.z, 5.0, epsilon = 1e-12);
    }
}

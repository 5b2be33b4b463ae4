//! Vibration-aware projection of one landmark into one camera pose.

use mirror_core::{clamp_to_image, project_to_pixel, PinholeCameraModel, Pt2, Pt3, Vec3};
use serde::{Deserialize, Serialize};

use crate::{CameraPose, Landmark, LandmarkId, VibrationConfig};

/// Axis-aligned pixel rectangle covering one traffic mirror.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrafficMirrorRoi {
    pub traffic_mirror_id: LandmarkId,
    pub x_offset: u32,
    pub y_offset: u32,
    pub width: u32,
    pub height: u32,
}

impl TrafficMirrorRoi {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x_offset + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y_offset + self.height
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &TrafficMirrorRoi) -> bool {
        self.x_offset <= other.x_offset
            && self.y_offset <= other.y_offset
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Smallest box covering both.
    pub fn union(&self, other: &TrafficMirrorRoi) -> TrafficMirrorRoi {
        let x = self.x_offset.min(other.x_offset);
        let y = self.y_offset.min(other.y_offset);
        TrafficMirrorRoi {
            traffic_mirror_id: self.traffic_mirror_id,
            x_offset: x,
            y_offset: y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }
}

/// Half extents of the vibration envelope around a camera-frame point.
///
/// Angular sway grows with depth; linear sway is constant.
fn envelope(p_c: &Pt3, vibration: &VibrationConfig) -> Vec3 {
    Vec3::new(
        (vibration.max_yaw / 2.0).sin() * p_c.z + vibration.max_width / 2.0,
        (vibration.max_pitch / 2.0).sin() * p_c.z + vibration.max_height / 2.0,
        vibration.max_depth / 2.0,
    )
}

/// Clamped raw pixel of a camera-frame point in front of the camera.
fn clamped_pixel(camera: &PinholeCameraModel, p_c: &Pt3) -> Option<Pt2> {
    if p_c.z <= 0.0 {
        return None;
    }
    project_to_pixel(camera, p_c).map(|px| clamp_to_image(camera, &px))
}

/// Project `landmark` seen from `pose`, inflated by the vibration envelope.
///
/// The top-left corner moves up, left and towards the camera; the bottom-right
/// corner moves down, right and away. Returns `None` when either moved corner
/// is behind the camera or the clamped box is under one pixel wide or tall.
pub fn project_roi(
    pose: &CameraPose,
    camera: &PinholeCameraModel,
    landmark: &Landmark,
    vibration: &VibrationConfig,
) -> Option<TrafficMirrorRoi> {
    let c2tl = pose.camera_from_map(&landmark.top_left());
    let d = envelope(&c2tl, vibration);
    let near = c2tl - d;
    let top_left = clamped_pixel(camera, &near)?;
    // pixel offsets are whole pixels, truncated
    let x_offset = top_left.x.trunc();
    let y_offset = top_left.y.trunc();

    let c2br = pose.camera_from_map(&landmark.bottom_right());
    let d = envelope(&c2br, vibration);
    let far = c2br + Vec3::new(d.x, d.y, -d.z);
    let bottom_right = clamped_pixel(camera, &far)?;

    let width = bottom_right.x - x_offset;
    let height = bottom_right.y - y_offset;
    if width < 1.0 || height < 1.0 {
        return None;
    }

    Some(TrafficMirrorRoi {
        traffic_mirror_id: landmark.id,
        x_offset: x_offset as u32,
        y_offset: y_offset as u32,
        width: width as u32,
        height: height as u32,
    })
}

/// Unvibrated pixel footprint corners (top-left, bottom-right), unclamped.
pub fn footprint_pixels(
    pose: &CameraPose,
    camera: &PinholeCameraModel,
    landmark: &Landmark,
) -> Option<(Pt2, Pt2)> {
    let project = |p_map: &Pt3| -> Option<Pt2> {
        let p_c = pose.camera_from_map(p_map);
        (p_c.z > 0.0).then(|| project_to_pixel(camera, &p_c)).flatten()
    };
    Some((project(&landmark.top_left())?, project(&landmark.bottom_right())?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::test_poses::*;
    use approx::assert_relative_eq;
    use mirror_core::{CameraInfo, Real};

    // integer boxes against float pixel positions
    const PIXEL_TOLERANCE: Real = 1.0;

    fn assert_within_pixel(actual: u32, expected: u32) {
        assert!(
            actual.abs_diff(expected) <= 1,
            "{actual} is more than a pixel from {expected}"
        );
    }

    fn camera() -> PinholeCameraModel {
        CameraInfo::from_intrinsics(640, 480, 500.0, 500.0, 320.0, 240.0)
            .build()
            .unwrap()
    }

    fn mirror(near: Pt3, far: Pt3) -> Landmark {
        Landmark {
            id: 42,
            near,
            far,
            height: 1.0,
            subtype: Some("reflective".to_string()),
        }
    }

    fn roi(x: u32, y: u32, w: u32, h: u32) -> TrafficMirrorRoi {
        TrafficMirrorRoi {
            traffic_mirror_id: 42,
            x_offset: x,
            y_offset: y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn zero_vibration_covers_the_projected_footprint() {
        let lm = mirror(Pt3::new(10.0, 2.0, 0.0), Pt3::new(10.0, 0.0, 0.0));
        let pose = facing_x_at(0.0, 0.0, 0.0);
        let (tl, br) = footprint_pixels(&pose, &camera(), &lm).unwrap();
        assert_relative_eq!(tl.coords, Pt2::new(220.0, 190.0).coords, epsilon = 1e-9);
        assert_relative_eq!(br.coords, Pt2::new(320.0, 240.0).coords, epsilon = 1e-9);

        let roi = project_roi(&pose, &camera(), &lm, &VibrationConfig::zero()).unwrap();
        assert_eq!(roi.traffic_mirror_id, 42);
        assert_within_pixel(roi.x_offset, 220);
        assert_within_pixel(roi.y_offset, 190);
        assert_within_pixel(roi.right(), 320);
        assert_within_pixel(roi.bottom(), 240);
    }

    #[test]
    fn mirrored_endpoint_order_collapses_to_an_empty_box() {
        // near at y=0 puts the top-left corner right of the bottom-right one
        let lm = mirror(Pt3::new(10.0, 0.0, 0.0), Pt3::new(10.0, 2.0, 0.0));
        let pose = facing_x_at(0.0, 0.0, 0.0);
        assert!(project_roi(&pose, &camera(), &lm, &VibrationConfig::zero()).is_none());
    }

    #[test]
    fn vibration_grows_the_box_outward() {
        let lm = mirror(Pt3::new(10.0, 2.0, 0.0), Pt3::new(10.0, 0.0, 0.0));
        let pose = facing_x_at(0.0, 0.0, 0.0);
        let cam = camera();
        let expected = project_roi(&pose, &cam, &lm, &VibrationConfig::zero()).unwrap();

        let vibration = VibrationConfig {
            max_pitch: 0.02,
            max_yaw: 0.02,
            max_height: 0.2,
            max_width: 0.2,
            max_depth: 0.0,
        };
        let rough = project_roi(&pose, &cam, &lm, &vibration).unwrap();
        assert!(rough.contains(&expected));
        assert!(rough.width > expected.width);
        assert!(rough.height > expected.height);
    }

    #[test]
    fn boxes_are_clamped_into_the_image() {
        // wide panel spilling past both image borders
        let lm = Landmark {
            height: 20.0,
            ..mirror(Pt3::new(10.0, 20.0, -10.0), Pt3::new(10.0, -20.0, -10.0))
        };
        let pose = facing_x_at(0.0, 0.0, 0.0);
        let roi = project_roi(&pose, &camera(), &lm, &VibrationConfig::zero()).unwrap();
        assert_eq!(roi.x_offset, 0);
        assert_eq!(roi.y_offset, 0);
        assert_eq!(roi.right(), 639);
        assert_eq!(roi.bottom(), 479);
    }

    #[test]
    fn corners_behind_the_camera_fail() {
        let lm = mirror(Pt3::new(-10.0, 2.0, 0.0), Pt3::new(-10.0, 0.0, 0.0));
        let pose = facing_x_at(0.0, 0.0, 0.0);
        assert!(project_roi(&pose, &camera(), &lm, &VibrationConfig::zero()).is_none());

        // depth envelope pushes the near corner behind the camera
        let lm = mirror(Pt3::new(0.5, 0.2, 0.0), Pt3::new(0.5, 0.0, 0.0));
        let vibration = VibrationConfig {
            max_depth: 2.0,
            ..VibrationConfig::zero()
        };
        assert!(project_roi(&pose, &camera(), &lm, &vibration).is_none());
    }

    #[test]
    fn union_and_containment() {
        let a = roi(10, 20, 30, 40);
        let b = roi(5, 30, 10, 50);
        let u = a.union(&b);
        assert_eq!(u, roi(5, 20, 35, 60));
        assert!(u.contains(&a));
        assert!(u.contains(&b));
        assert!(!a.contains(&b));
    }

    #[test]
    fn footprint_matches_expected_box_within_a_pixel() {
        let lm = mirror(Pt3::new(12.0, 1.3, 0.2), Pt3::new(12.5, -0.4, 0.1));
        let pose = facing_x_at(0.0, 0.0, 0.0);
        let cam = camera();
        let roi = project_roi(&pose, &cam, &lm, &VibrationConfig::zero()).unwrap();
        let (tl, br) = footprint_pixels(&pose, &cam, &lm).unwrap();
        assert!((tl.x - roi.x_offset as Real).abs() <= PIXEL_TOLERANCE);
        assert!((tl.y - roi.y_offset as Real).abs() <= PIXEL_TOLERANCE);
        assert!((br.x - roi.right() as Real).abs() <= PIXEL_TOLERANCE);
        assert!((br.y - roi.bottom() as Real).abs() <= PIXEL_TOLERANCE);
    }
}

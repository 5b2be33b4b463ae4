//! Landmark visibility filter over a set of candidate poses.

use mirror_core::{
    deg2rad, is_in_angle_range, is_in_distance_range, is_in_image_frame, PinholeCameraModel, Real,
};

use crate::{CameraPose, Landmark, LandmarkSet};

/// Widest heading difference between camera and mirror that still counts as
/// facing each other (degrees).
pub const MAX_VIEW_ANGLE_DEG: Real = 40.0;

/// Gates checked for one landmark against one pose, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    Distance,
    Angle,
    ImageFrame,
}

/// The first gate `landmark` fails from `pose`, or `None` when all pass.
pub fn first_failed_gate(
    landmark: &Landmark,
    pose: &CameraPose,
    camera: &PinholeCameraModel,
    max_range: Real,
    max_angle: Real,
) -> Option<Gate> {
    if !is_in_distance_range(&landmark.center(), &pose.origin(), max_range) {
        return Some(Gate::Distance);
    }
    if !is_in_angle_range(landmark.heading(), pose.heading(), max_angle) {
        return Some(Gate::Angle);
    }
    let corners = [landmark.top_left(), landmark.bottom_right()];
    let in_frame = corners
        .iter()
        .any(|corner| is_in_image_frame(camera, &pose.camera_from_map(corner)));
    if !in_frame {
        return Some(Gate::ImageFrame);
    }
    None
}

pub fn is_visible_from(
    landmark: &Landmark,
    pose: &CameraPose,
    camera: &PinholeCameraModel,
    max_range: Real,
    max_angle: Real,
) -> bool {
    first_failed_gate(landmark, pose, camera, max_range, max_angle).is_none()
}

/// Reflective landmarks that pass every gate from at least one pose.
///
/// Poses are tried in order and the first passing one accepts the landmark.
/// `max_angle` is in radians; see [`default_max_view_angle`].
pub fn visible_landmarks<'a>(
    landmarks: &'a LandmarkSet,
    poses: &[CameraPose],
    camera: &PinholeCameraModel,
    max_range: Real,
    max_angle: Real,
) -> Vec<&'a Landmark> {
    landmarks
        .iter()
        .filter(|landmark| landmark.is_reflective())
        .filter(|landmark| {
            poses
                .iter()
                .any(|pose| is_visible_from(landmark, pose, camera, max_range, max_angle))
        })
        .collect()
}

/// [`MAX_VIEW_ANGLE_DEG`] in radians.
pub fn default_max_view_angle() -> Real {
    deg2rad(MAX_VIEW_ANGLE_DEG)
}

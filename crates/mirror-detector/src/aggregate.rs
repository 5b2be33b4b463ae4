//! Expected and rough ROIs of one landmark over the candidate poses.

use mirror_core::PinholeCameraModel;

use crate::{project_roi, CameraPose, Landmark, TrafficMirrorRoi, VibrationConfig};

/// Union of the vibration-inflated ROIs over `poses`; `None` when no pose
/// yields a box.
pub fn rough_roi(
    poses: &[CameraPose],
    camera: &PinholeCameraModel,
    landmark: &Landmark,
    vibration: &VibrationConfig,
) -> Option<TrafficMirrorRoi> {
    poses
        .iter()
        .filter_map(|pose| project_roi(pose, camera, landmark, vibration))
        .reduce(|acc, roi| acc.union(&roi))
}

/// Unvibrated ROI from the nominal pose.
pub fn expected_roi(
    nominal: &CameraPose,
    camera: &PinholeCameraModel,
    landmark: &Landmark,
) -> Option<TrafficMirrorRoi> {
    project_roi(nominal, camera, landmark, &VibrationConfig::zero())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LandmarkRois {
    pub expected: TrafficMirrorRoi,
    pub rough: TrafficMirrorRoi,
}

/// Expected ROI first, then rough; `None` if either cannot be computed.
pub fn landmark_rois(
    nominal: &CameraPose,
    window: &[CameraPose],
    camera: &PinholeCameraModel,
    landmark: &Landmark,
    vibration: &VibrationConfig,
) -> Option<LandmarkRois> {
    let expected = expected_roi(nominal, camera, landmark)?;
    let rough = rough_roi(window, camera, landmark, vibration)?;
    Some(LandmarkRois { expected, rough })
}

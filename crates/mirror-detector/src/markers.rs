//! Debug line markers from the camera to each visible mirror.

use mirror_core::{Pt3, Real};
use serde::{Deserialize, Serialize};

use crate::{CameraPose, FrameHeader, Landmark, LandmarkId};

pub const BEAM_NAMESPACE: &str = "beam";
pub const BEAM_SCALE: Real = 0.05;
pub const BEAM_LIFETIME_SECS: Real = 0.2;
/// RGBA.
pub const BEAM_COLOR: [Real; 4] = [0.0, 1.0, 0.0, 0.999];

/// Line-list marker expressed in the camera frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BeamMarker {
    pub header: FrameHeader,
    pub id: LandmarkId,
    pub ns: String,
    /// Camera origin, then the mirror center.
    pub points: [Pt3; 2],
    pub scale: Real,
    pub color: [Real; 4],
    pub lifetime: Real,
}

impl BeamMarker {
    pub fn new(header: &FrameHeader, pose: &CameraPose, landmark: &Landmark) -> Self {
        Self {
            header: header.clone(),
            id: landmark.id,
            ns: BEAM_NAMESPACE.to_string(),
            points: [Pt3::origin(), pose.camera_from_map(&landmark.center())],
            scale: BEAM_SCALE,
            color: BEAM_COLOR,
            lifetime: BEAM_LIFETIME_SECS,
        }
    }

    pub fn target(&self) -> &Pt3 {
        &self.points[1]
    }
}

/// One marker per landmark, all drawn from `pose`.
pub fn beam_markers<'a>(
    header: &FrameHeader,
    pose: &CameraPose,
    landmarks: impl IntoIterator<Item = &'a Landmark>,
) -> Vec<BeamMarker> {
    landmarks
        .into_iter()
        .map(|landmark| BeamMarker::new(header, pose, landmark))
        .collect()
}

//! Per-frame input and output records.

use mirror_core::CameraInfo;
use serde::{Deserialize, Serialize};

use crate::{BeamMarker, Stamp, TrafficMirrorRoi};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameHeader {
    pub stamp: Stamp,
    /// Camera frame the image was captured in.
    pub frame_id: String,
}

impl FrameHeader {
    pub fn new(stamp: Stamp, frame_id: impl Into<String>) -> Self {
        Self {
            stamp,
            frame_id: frame_id.into(),
        }
    }
}

/// One camera image's metadata: when and where it was taken, and the
/// calibration to project with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub header: FrameHeader,
    pub info: CameraInfo,
}

/// Everything computed for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameOutput {
    pub header: FrameHeader,
    /// Vibration-inflated ROIs unioned over the candidate poses.
    pub rough_rois: Vec<TrafficMirrorRoi>,
    /// Zero-vibration ROIs from the nominal pose.
    pub expected_rois: Vec<TrafficMirrorRoi>,
    pub markers: Vec<BeamMarker>,
}

impl FrameOutput {
    pub fn new(header: FrameHeader) -> Self {
        Self {
            header,
            rough_rois: Vec::new(),
            expected_rois: Vec::new(),
            markers: Vec::new(),
        }
    }
}

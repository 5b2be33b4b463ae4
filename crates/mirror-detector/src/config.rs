//! Detector configuration.
//!
//! Field names match the node parameter file. Values are
//! checked once by [`DetectorConfig::validated`]; geometry code never sees an
//! out-of-range detection range, sample length or offset window.

use log::{error, info};
use mirror_core::Real;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_DETECTION_RANGE: Real = 200.0;
pub const DEFAULT_TIMESTAMP_SAMPLE_LEN: Real = 0.01;
/// Widest accepted `max_timestamp_offset - min_timestamp_offset` (s).
pub const MAX_TIMESTAMP_WINDOW_SECS: Real = 1.0;

/// Worst-case oscillation of the camera mount relative to the map.
///
/// Angles are in radians, lengths in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VibrationConfig {
    #[serde(rename = "max_vibration_pitch")]
    pub max_pitch: Real,
    #[serde(rename = "max_vibration_yaw")]
    pub max_yaw: Real,
    #[serde(rename = "max_vibration_height")]
    pub max_height: Real,
    #[serde(rename = "max_vibration_width")]
    pub max_width: Real,
    #[serde(rename = "max_vibration_depth")]
    pub max_depth: Real,
}

impl VibrationConfig {
    /// No vibration at all; used for the expected ROI.
    pub const fn zero() -> Self {
        Self {
            max_pitch: 0.0,
            max_yaw: 0.0,
            max_height: 0.0,
            max_width: 0.0,
            max_depth: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    #[serde(flatten)]
    pub vibration: VibrationConfig,
    /// Start of the pose sampling window relative to the frame stamp (s).
    pub min_timestamp_offset: Real,
    /// End of the pose sampling window relative to the frame stamp (s).
    pub max_timestamp_offset: Real,
    /// Validated but not used by the sampler, which steps at a fixed 10 ms.
    pub timestamp_sample_len: Real,
    /// Planar distance beyond which a landmark is never visible (m).
    pub max_detection_range: Real,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            vibration: VibrationConfig::default(),
            min_timestamp_offset: 0.0,
            max_timestamp_offset: 0.0,
            timestamp_sample_len: DEFAULT_TIMESTAMP_SAMPLE_LEN,
            max_detection_range: DEFAULT_MAX_DETECTION_RANGE,
        }
    }
}

impl DetectorConfig {
    /// Replace invalid values with safe defaults, logging each correction.
    pub fn validated(mut self) -> Self {
        if !is_positive(self.max_detection_range) {
            error!(
                "Invalid param max_detection_range = {}, set to default value = {}",
                self.max_detection_range, DEFAULT_MAX_DETECTION_RANGE
            );
            self.max_detection_range = DEFAULT_MAX_DETECTION_RANGE;
        }
        if !is_positive(self.timestamp_sample_len) {
            error!(
                "Invalid param timestamp_sample_len = {}, set to default value = {}",
                self.timestamp_sample_len, DEFAULT_TIMESTAMP_SAMPLE_LEN
            );
            self.timestamp_sample_len = DEFAULT_TIMESTAMP_SAMPLE_LEN;
        }
        if !self.min_timestamp_offset.is_finite() || !self.max_timestamp_offset.is_finite() {
            error!(
                "Invalid timestamp offsets min = {}, max = {}. Set both to 0",
                self.min_timestamp_offset, self.max_timestamp_offset
            );
            self.max_timestamp_offset = 0.0;
            self.min_timestamp_offset = 0.0;
        }
        if self.max_timestamp_offset < self.min_timestamp_offset {
            error!(
                "max_timestamp_offset ({}) < min_timestamp_offset ({}). Set both to 0",
                self.max_timestamp_offset, self.min_timestamp_offset
            );
            self.max_timestamp_offset = 0.0;
            self.min_timestamp_offset = 0.0;
        }
        if self.max_timestamp_offset - self.min_timestamp_offset > MAX_TIMESTAMP_WINDOW_SECS {
            error!(
                "Timestamp window [{}, {}] is wider than {} s. Set both to 0",
                self.min_timestamp_offset, self.max_timestamp_offset, MAX_TIMESTAMP_WINDOW_SECS
            );
            self.max_timestamp_offset = 0.0;
            self.min_timestamp_offset = 0.0;
        }
        self
    }

    pub fn log_summary(&self) {
        let v = &self.vibration;
        info!(
            "config: max_vibration_pitch={} max_vibration_yaw={} max_vibration_height={} \
             max_vibration_width={} max_vibration_depth={} min_timestamp_offset={} \
             max_timestamp_offset={} timestamp_sample_len={} max_detection_range={}",
            v.max_pitch,
            v.max_yaw,
            v.max_height,
            v.max_width,
            v.max_depth,
            self.min_timestamp_offset,
            self.max_timestamp_offset,
            self.timestamp_sample_len,
            self.max_detection_range
        );
    }
}

// NaN is not positive.
fn is_positive(value: Real) -> bool {
    value > 0.0
}

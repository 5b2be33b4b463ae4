//! Candidate camera poses over the timestamp uncertainty window.

use log::debug;
use mirror_core::Real;

use crate::{CameraPose, DetectorConfig, DetectorError, FrameHeader, Stamp, TransformLookup};

/// Step between two sampled instants (10 ms).
pub const SAMPLE_STEP_NANOS: i64 = 10_000_000;

/// Upper bound on sampled instants; covers a window of
/// [`MAX_TIMESTAMP_WINDOW_SECS`](crate::config::MAX_TIMESTAMP_WINDOW_SECS).
pub const MAX_WINDOW_SAMPLES: usize = 101;

/// Wait budget handed to every transform lookup (s).
pub const TRANSFORM_TIMEOUT_SECS: Real = 0.2;

/// The pose at the frame stamp and the poses sampled around it.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidatePoses {
    nominal: CameraPose,
    window: Vec<CameraPose>,
}

impl CandidatePoses {
    /// Pose at the frame stamp; the expected ROI is projected from it.
    pub fn nominal(&self) -> &CameraPose {
        &self.nominal
    }

    /// Ordered window poses; never empty.
    pub fn window(&self) -> &[CameraPose] {
        &self.window
    }

    /// First window pose; beam markers are drawn in its frame.
    pub fn first(&self) -> &CameraPose {
        self.window.first().unwrap_or(&self.nominal)
    }
}

/// Instants `stamp + min_offset, +10 ms, ... <= stamp + max_offset`.
///
/// Stops at the end of the `i64` clock and after [`MAX_WINDOW_SAMPLES`].
pub fn sample_stamps(stamp: Stamp, min_offset: Real, max_offset: Real) -> Vec<Stamp> {
    let start = stamp.offset_secs(min_offset);
    let end = stamp.offset_secs(max_offset);
    std::iter::successors(Some(start), |t| {
        t.nanos().checked_add(SAMPLE_STEP_NANOS).map(Stamp::from_nanos)
    })
    .take_while(|t| *t <= end)
    .take(MAX_WINDOW_SAMPLES)
    .collect()
}

/// Look up the nominal pose and every pose in the configured window.
///
/// Window instants without a transform are skipped. An empty window falls
/// back to the nominal pose alone; a missing nominal pose fails the frame.
pub fn sample_camera_poses<L>(
    lookup: &L,
    header: &FrameHeader,
    config: &DetectorConfig,
) -> Result<CandidatePoses, DetectorError>
where
    L: TransformLookup + ?Sized,
{
    let nominal = lookup
        .lookup(header.stamp, &header.frame_id, TRANSFORM_TIMEOUT_SECS)
        .map(CameraPose::new)
        .ok_or_else(|| DetectorError::NoPose {
            frame_id: header.frame_id.clone(),
            stamp: header.stamp,
        })?;

    let stamps = sample_stamps(
        header.stamp,
        config.min_timestamp_offset,
        config.max_timestamp_offset,
    );
    let mut window: Vec<CameraPose> = stamps
        .iter()
        .filter_map(|t| lookup.lookup(*t, &header.frame_id, TRANSFORM_TIMEOUT_SECS))
        .map(CameraPose::new)
        .collect();
    debug!(
        "sampled {}/{} poses of `{}` around {}",
        window.len(),
        stamps.len(),
        header.frame_id,
        header.stamp
    );
    if window.is_empty() {
        window.push(nominal);
    }

    Ok(CandidatePoses { nominal, window })
}

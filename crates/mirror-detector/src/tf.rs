//! Map → frame transform lookups.
//!
//! [`TransformLookup`] is the seam to whatever tracks the vehicle pose. The
//! in-memory [`TransformBuffer`] answers lookups from recorded samples by
//! interpolation; it never extrapolates past the recorded span.

use std::collections::HashMap;

use mirror_core::{Iso3, Real};
use nalgebra::{Quaternion, Translation3, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::Stamp;

/// Lookup of `map_se3_frame` (frame → map) at an instant.
pub trait TransformLookup {
    /// `timeout` is how long (s) a live source may wait for data to arrive.
    fn lookup(&self, stamp: Stamp, frame_id: &str, timeout: Real) -> Option<Iso3>;
}

impl<F> TransformLookup for F
where
    F: Fn(Stamp, &str) -> Option<Iso3>,
{
    fn lookup(&self, stamp: Stamp, frame_id: &str, _timeout: Real) -> Option<Iso3> {
        self(stamp, frame_id)
    }
}

/// Serialized transform sample: pose of `child_frame_id` in the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StampedTransform {
    pub stamp: Stamp,
    pub child_frame_id: String,
    pub translation: [Real; 3],
    /// Quaternion as `[x, y, z, w]`.
    pub rotation: [Real; 4],
}

impl StampedTransform {
    pub fn new(stamp: Stamp, child_frame_id: impl Into<String>, map_se3_child: &Iso3) -> Self {
        let t = map_se3_child.translation.vector;
        let q = map_se3_child.rotation.quaternion();
        Self {
            stamp,
            child_frame_id: child_frame_id.into(),
            translation: [t.x, t.y, t.z],
            rotation: [q.i, q.j, q.k, q.w],
        }
    }

    pub fn to_isometry(&self) -> Iso3 {
        let [x, y, z] = self.translation;
        let [qx, qy, qz, qw] = self.rotation;
        Iso3::from_parts(
            Translation3::new(x, y, z),
            UnitQuaternion::from_quaternion(Quaternion::new(qw, qx, qy, qz)),
        )
    }
}

/// Time-sorted transform samples per child frame.
#[derive(Clone, Debug, Default)]
pub struct TransformBuffer {
    frames: HashMap<String, Vec<(Stamp, Iso3)>>,
}

impl TransformBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sample, replacing any sample of the same frame and stamp.
    pub fn insert(&mut self, frame_id: &str, stamp: Stamp, map_se3_frame: Iso3) {
        let samples = self.frames.entry(frame_id.to_string()).or_default();
        match samples.binary_search_by_key(&stamp, |(s, _)| *s) {
            Ok(idx) => samples[idx].1 = map_se3_frame,
            Err(idx) => samples.insert(idx, (stamp, map_se3_frame)),
        }
    }

    pub fn insert_stamped(&mut self, transform: &StampedTransform) {
        self.insert(
            &transform.child_frame_id,
            transform.stamp,
            transform.to_isometry(),
        );
    }

    /// Number of samples stored for a frame.
    pub fn len(&self, frame_id: &str) -> usize {
        self.frames.get(frame_id).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.values().all(Vec::is_empty)
    }

    /// Pose at `stamp`, interpolated between the two neighbouring samples.
    pub fn interpolate(&self, stamp: Stamp, frame_id: &str) -> Option<Iso3> {
        let samples = self.frames.get(frame_id)?;
        match samples.binary_search_by_key(&stamp, |(s, _)| *s) {
            Ok(idx) => Some(samples[idx].1),
            Err(idx) if idx == 0 || idx == samples.len() => None,
            Err(idx) => {
                let (t0, a) = &samples[idx - 1];
                let (t1, b) = &samples[idx];
                let alpha = stamp.secs_since(*t0) / t1.secs_since(*t0);
                Some(interpolate_isometry(a, b, alpha))
            }
        }
    }
}

impl TransformLookup for TransformBuffer {
    fn lookup(&self, stamp: Stamp, frame_id: &str, _timeout: Real) -> Option<Iso3> {
        self.interpolate(stamp, frame_id)
    }
}

impl FromIterator<StampedTransform> for TransformBuffer {
    fn from_iter<I: IntoIterator<Item = StampedTransform>>(iter: I) -> Self {
        let mut buffer = Self::new();
        for transform in iter {
            buffer.insert_stamped(&transform);
        }
        buffer
    }
}

/// Linear interpolation of translation and spherical interpolation of rotation.
fn interpolate_isometry(a: &Iso3, b: &Iso3, alpha: Real) -> Iso3 {
    let translation = a
        .translation
        .vector
        .lerp(&b.translation.vector, alpha);
    // slerp is undefined for (nearly) equal or opposite rotations
    let rotation = a
        .rotation
        .try_slerp(&b.rotation, alpha, 1e-9)
        .unwrap_or(a.rotation);
    Iso3::from_parts(Translation3::from(translation), rotation)
}

//! Integer-nanosecond timestamps.

use std::fmt;

use mirror_core::Real;
use serde::{Deserialize, Serialize};

pub const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Point in time, in nanoseconds on the sensor clock.
///
/// Sampling arithmetic stays in integers so that stepping through a window
/// never accumulates rounding error.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Stamp(i64);

impl Stamp {
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    pub fn from_secs_f64(secs: Real) -> Self {
        Self(secs_to_nanos(secs))
    }

    pub const fn nanos(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> Real {
        self.0 as Real / NANOS_PER_SEC as Real
    }

    /// Shift by a signed number of seconds.
    pub fn offset_secs(self, secs: Real) -> Self {
        self.offset_nanos(secs_to_nanos(secs))
    }

    pub fn offset_nanos(self, nanos: i64) -> Self {
        Self(self.0.saturating_add(nanos))
    }

    /// Signed seconds from `earlier` to `self`.
    pub fn secs_since(self, earlier: Stamp) -> Real {
        (self.0 - earlier.0) as Real / NANOS_PER_SEC as Real
    }
}

pub fn secs_to_nanos(secs: Real) -> i64 {
    (secs * NANOS_PER_SEC as Real).round() as i64
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.div_euclid(NANOS_PER_SEC);
        let nanos = self.0.rem_euclid(NANOS_PER_SEC);
        write!(f, "{secs}.{nanos:09}")
    }
}

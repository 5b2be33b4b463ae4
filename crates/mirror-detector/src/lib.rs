//! Map-based traffic mirror detection.
//!
//! For every camera frame the detector
//! 1. samples camera poses over the timestamp uncertainty window ([`sampler`]),
//! 2. keeps the mapped mirrors that are in range, facing the camera and inside
//!    the image from at least one pose ([`visibility`]),
//! 3. projects each visible mirror into a vibration-inflated ROI per pose and
//!    unions them ([`roi`], [`aggregate`]), next to a zero-vibration ROI from
//!    the nominal pose.
//!
//! Mirrors come from a vector map, optionally restricted to a route ([`map`]).
//! [`MapBasedDetector`] ties the steps together.

pub mod aggregate;
pub mod config;
pub mod detector;
pub mod error;
pub mod frame;
pub mod landmark;
pub mod map;
pub mod markers;
pub mod pose;
pub mod roi;
pub mod sampler;
pub mod stamp;
pub mod tf;
pub mod throttle;
pub mod visibility;

pub use aggregate::*;
pub use config::*;
pub use detector::*;
pub use error::*;
pub use frame::*;
pub use landmark::*;
pub use map::*;
pub use markers::*;
pub use pose::*;
pub use roi::*;
pub use sampler::*;
pub use stamp::*;
pub use tf::*;
pub use throttle::*;
pub use visibility::*;

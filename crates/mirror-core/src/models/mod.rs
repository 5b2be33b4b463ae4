//! Camera model building blocks.
//!
//! The raw image is formed in three steps: pinhole projection to normalized
//! coordinates, [`RadialTangential`] distortion, then [`FxFyCxCySkew`]
//! intrinsics. [`PinholeCameraModel`] adds the rectification rotation `R` and
//! rectified projection `P` of a ROS-style [`CameraInfo`].

mod distortion;
mod intrinsics;
mod params;
mod pinhole;

pub use distortion::*;
pub use intrinsics::*;
pub use params::*;
pub use pinhole::*;

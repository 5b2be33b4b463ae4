//! Core math and camera primitives for the map-based mirror detector.
//!
//! This crate contains:
//! - linear algebra type aliases (`Real`, `Vec2`, `Pt3`, `Iso3`, ...),
//! - the raw camera stages (radial-tangential distortion, `K` intrinsics),
//! - a ROS-style [`CameraInfo`] that builds a [`PinholeCameraModel`] with
//!   rectified projection and unrectification,
//! - the projection and gating primitives used by the visibility filter
//!   ([`geometry`]).
//!
//! Raw pixel pipeline for a distorted camera:
//! `pixel = K ∘ distortion ∘ pinhole(Rᵀ · ray(P⁻¹ · rectified))`;
//! without distortion the rectified pixel is the raw pixel.

/// Projection, clamping and distance/angle/frame gates.
pub mod geometry;
/// Linear algebra type aliases and angle helpers.
pub mod math;
/// Camera models and distortion utilities.
pub mod models;

pub use geometry::*;
pub use math::*;
pub use models::*;

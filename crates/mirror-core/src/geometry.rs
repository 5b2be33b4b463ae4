//! Projection and gating primitives.
//!
//! All functions are pure. Points passed to the projection helpers are in the
//! camera frame (`z` = depth along the optical axis).

use crate::{PinholeCameraModel, Pt2, Pt3, Real};

/// Project a camera-frame point into raw (distorted) pixel coordinates.
///
/// Rectified projection through `P` followed by unrectification. Returns
/// `None` for points that cannot be projected; callers reject non-positive
/// depths before getting here.
pub fn project_to_pixel(camera: &PinholeCameraModel, p_c: &Pt3) -> Option<Pt2> {
    let rectified = camera.project_3d_to_pixel(p_c)?;
    camera.unrectify_point(&rectified)
}

/// Clamp a pixel into `[0, width-1] x [0, height-1]`.
pub fn clamp_to_image(camera: &PinholeCameraModel, px: &Pt2) -> Pt2 {
    let max_x = (camera.width() as Real - 1.0).max(0.0);
    let max_y = (camera.height() as Real - 1.0).max(0.0);
    Pt2::new(px.x.min(max_x).max(0.0), px.y.min(max_y).max(0.0))
}

/// Planar (x, y) distance test, strictly inside `max_range`.
pub fn is_in_distance_range(p1: &Pt3, p2: &Pt3, max_range: Real) -> bool {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    dx * dx + dy * dy < max_range * max_range
}

/// Unsigned heading difference test, strictly inside `max_angle`.
///
/// The difference is `acos` of the dot product of the two unit headings, so
/// it lies in `[0, π]` and the side of the difference is not observable.
pub fn is_in_angle_range(yaw1: Real, yaw2: Real, max_angle: Real) -> bool {
    let dot = yaw1.cos() * yaw2.cos() + yaw1.sin() * yaw2.sin();
    let diff = dot.clamp(-1.0, 1.0).acos();
    diff.abs() < max_angle
}

/// Whether a camera-frame point lands inside the raw image.
pub fn is_in_image_frame(camera: &PinholeCameraModel, p_c: &Pt3) -> bool {
    if p_c.z <= 0.0 {
        return false;
    }
    let Some(px) = project_to_pixel(camera, p_c) else {
        return false;
    };
    (0.0..camera.width() as Real).contains(&px.x) && (0.0..camera.height() as Real).contains(&px.y)
}

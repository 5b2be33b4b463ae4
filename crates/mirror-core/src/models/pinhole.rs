use super::{FxFyCxCySkew, RadialTangential};
use crate::{Mat3, Mat34, Pt2, Pt3, Vec2, Vec3};

/// Monocular pinhole camera with a rectified and a raw image.
///
/// Points are first projected into the rectified image with `P`, then mapped
/// back into the raw (distorted) image by [`PinholeCameraModel::unrectify_point`].
#[derive(Clone, Debug)]
pub struct PinholeCameraModel {
    width: u32,
    height: u32,
    k: FxFyCxCySkew,
    distortion: RadialTangential,
    rectification: Mat3,
    projection: Mat34,
}

impl PinholeCameraModel {
    pub fn new(
        width: u32,
        height: u32,
        k: FxFyCxCySkew,
        distortion: RadialTangential,
        rectification: Mat3,
        projection: Mat34,
    ) -> Self {
        Self {
            width,
            height,
            k,
            distortion,
            rectification,
            projection,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn distortion(&self) -> &RadialTangential {
        &self.distortion
    }

    pub fn projection(&self) -> &Mat34 {
        &self.projection
    }

    /// Project a camera-frame point into the rectified image using `P`.
    ///
    /// Returns `None` when the homogeneous scale is not positive.
    pub fn project_3d_to_pixel(&self, p_c: &Pt3) -> Option<Pt2> {
        let uvw = self.projection * p_c.to_homogeneous();
        if uvw.z <= 0.0 {
            return None;
        }
        Some(Pt2::new(uvw.x / uvw.z, uvw.y / uvw.z))
    }

    /// Ray through a rectified pixel, in the rectified camera frame (`z = 1`).
    pub fn project_pixel_to_3d_ray(&self, uv_rect: &Pt2) -> Vec3 {
        let p = &self.projection;
        let (fx, fy) = (p[(0, 0)], p[(1, 1)]);
        let (cx, cy) = (p[(0, 2)], p[(1, 2)]);
        let (tx, ty) = (p[(0, 3)], p[(1, 3)]);
        Vec3::new((uv_rect.x - cx - tx) / fx, (uv_rect.y - cy - ty) / fy, 1.0)
    }

    /// Project a point in the unrectified camera frame through `D` and `K`.
    pub fn project_raw(&self, p_c: &Vec3) -> Option<Pt2> {
        if p_c.z <= 0.0 {
            return None;
        }
        let n = Vec2::new(p_c.x / p_c.z, p_c.y / p_c.z);
        Some(Pt2::from(self.k.to_pixel(&self.distortion.distort(&n))))
    }

    /// Map a rectified pixel to its location in the raw (distorted) image.
    ///
    /// Without distortion the rectified pixel is returned as is. Otherwise the
    /// rectified ray is rotated back by `Rᵀ` and projected through `D` and `K`.
    pub fn unrectify_point(&self, uv_rect: &Pt2) -> Option<Pt2> {
        if self.distortion.is_identity() {
            return Some(*uv_rect);
        }
        let ray = self.rectification.transpose() * self.project_pixel_to_3d_ray(uv_rect);
        self.project_raw(&ray)
    }
}

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FxFyCxCySkew, PinholeCameraModel, RadialTangential};
use crate::{Mat3, Mat34, Real};

/// Errors raised while turning a [`CameraInfo`] into a usable camera model.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },
    #[error("{matrix} matrix has a zero focal length")]
    ZeroFocalLength { matrix: &'static str },
    #[error("unsupported distortion model `{0}`")]
    UnsupportedDistortionModel(String),
}

/// Serializable calibration record, laid out like a ROS `CameraInfo` message.
///
/// Matrices are row-major. `r` defaults to identity and `p` defaults to
/// `[K | 0]`, which is what a monocular, unrectified camera publishes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_distortion_model")]
    pub distortion_model: String,
    /// Distortion coefficients in ROS order `k1, k2, p1, p2, k3[, k4, k5, k6]`.
    #[serde(default)]
    pub d: Vec<Real>,
    pub k: [Real; 9],
    #[serde(default = "identity_rows")]
    pub r: [Real; 9],
    #[serde(default)]
    pub p: Option<[Real; 12]>,
}

fn default_distortion_model() -> String {
    "plumb_bob".to_string()
}

fn identity_rows() -> [Real; 9] {
    [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]
}

impl CameraInfo {
    /// Distortion-free camera with square-pixel intrinsics and identity rectification.
    pub fn from_intrinsics(width: u32, height: u32, fx: Real, fy: Real, cx: Real, cy: Real) -> Self {
        Self {
            width,
            height,
            distortion_model: default_distortion_model(),
            d: vec![0.0; 5],
            k: [fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0],
            r: identity_rows(),
            p: None,
        }
    }

    /// Build a concrete camera model from this record.
    pub fn build(&self) -> Result<PinholeCameraModel, CameraError> {
        if self.width == 0 || self.height == 0 {
            return Err(CameraError::InvalidImageSize {
                width: self.width,
                height: self.height,
            });
        }

        let distortion = match self.distortion_model.as_str() {
            "" | "none" => RadialTangential::default(),
            "plumb_bob" => RadialTangential::plumb_bob(&self.d),
            "rational_polynomial" => RadialTangential::rational_polynomial(&self.d),
            other => return Err(CameraError::UnsupportedDistortionModel(other.to_string())),
        };

        let k_mat = Mat3::from_row_slice(&self.k);
        let k = FxFyCxCySkew::from_k_matrix(&k_mat);
        if k.fx == 0.0 || k.fy == 0.0 {
            return Err(CameraError::ZeroFocalLength { matrix: "K" });
        }

        let projection = match &self.p {
            Some(p) => Mat34::from_row_slice(p),
            None => k_mat.insert_column(3, 0.0),
        };
        if projection[(0, 0)] == 0.0 || projection[(1, 1)] == 0.0 {
            return Err(CameraError::ZeroFocalLength { matrix: "P" });
        }

        Ok(PinholeCameraModel::new(
            self.width,
            self.height,
            k,
            distortion,
            Mat3::from_row_slice(&self.r),
            projection,
        ))
    }
}

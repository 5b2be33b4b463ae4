use mirror_core::CameraError;
use thiserror::Error;

use crate::Stamp;

/// Reasons a camera frame produced no output.
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("no traffic mirror data available")]
    NoLandmarks,
    #[error("cannot get transform from map frame to `{frame_id}` at {stamp}")]
    NoPose { frame_id: String, stamp: Stamp },
    #[error("invalid camera info: {0}")]
    Camera(#[from] CameraError),
}

/// Errors raised while indexing a vector map or resolving a route against it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapError {
    #[error("cannot set traffic mirrors in route because no map was received")]
    NoMap,
    #[error("lanelet {0} not found in map")]
    NoSuchLanelet(u64),
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },
}

//! Frame-by-frame detector context.
//!
//! [`MapBasedDetector`] owns the configuration and the current map, full-map
//! landmark set and route landmark set. Map and route updates build a new set
//! and swap it in whole; a frame being processed keeps the `Arc` it started
//! with.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use mirror_core::Real;
use parking_lot::{Mutex, RwLock};

use crate::{
    beam_markers, default_max_view_angle, landmark_rois, sample_camera_poses, visible_landmarks,
    CameraFrame, DetectorConfig, DetectorError, FrameOutput, LandmarkSet, LaneletMap,
    LaneletRoute, MapError, TransformLookup, VectorMap, WarnThrottle,
};

/// Minimum spacing of repeated "no pose" warnings.
pub const NO_POSE_WARN_PERIOD: Duration = Duration::from_secs(5);

pub struct MapBasedDetector {
    config: DetectorConfig,
    max_view_angle: Real,
    map: RwLock<Option<Arc<LaneletMap>>>,
    all_traffic_mirrors: RwLock<Option<Arc<LandmarkSet>>>,
    route_traffic_mirrors: RwLock<Option<Arc<LandmarkSet>>>,
    no_pose_warning: Mutex<WarnThrottle>,
}

impl MapBasedDetector {
    /// Validate `config` and start with no map.
    pub fn new(config: DetectorConfig) -> Self {
        let config = config.validated();
        config.log_summary();
        Self {
            config,
            max_view_angle: default_max_view_angle(),
            map: RwLock::new(None),
            all_traffic_mirrors: RwLock::new(None),
            route_traffic_mirrors: RwLock::new(None),
            no_pose_warning: Mutex::new(WarnThrottle::new(NO_POSE_WARN_PERIOD)),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Replace the map and the full-map landmark set.
    ///
    /// The route set is left as is. Returns the number of landmarks found.
    pub fn on_map(&self, map: VectorMap) -> Result<usize, MapError> {
        let map = LaneletMap::from_vector_map(map).inspect_err(|err| {
            error!("rejected vector map: {err}");
        })?;
        let mirrors = map.all_traffic_mirrors();
        let count = mirrors.len();
        info!(
            "loaded map with {} lanelets and {} traffic mirrors",
            map.num_lanelets(),
            count
        );
        *self.map.write() = Some(Arc::new(map));
        *self.all_traffic_mirrors.write() = Some(Arc::new(mirrors));
        Ok(count)
    }

    /// Restrict the landmarks to the lanelets of `route`.
    ///
    /// Ignored with a warning before the first map. A route that names an
    /// unknown lanelet is rejected and the previous route set stays.
    pub fn on_route(&self, route: &LaneletRoute) -> Result<usize, MapError> {
        let Some(map) = self.map.read().clone() else {
            warn!("{}", MapError::NoMap);
            return Err(MapError::NoMap);
        };
        let mirrors = map.route_traffic_mirrors(route).inspect_err(|err| {
            error!("{err}");
        })?;
        let count = mirrors.len();
        info!("route restricts detection to {count} traffic mirrors");
        *self.route_traffic_mirrors.write() = Some(Arc::new(mirrors));
        Ok(count)
    }

    /// Route set if one was accepted, else the full-map set.
    pub fn active_landmarks(&self) -> Option<Arc<LandmarkSet>> {
        self.route_traffic_mirrors
            .read()
            .clone()
            .or_else(|| self.all_traffic_mirrors.read().clone())
    }

    /// Sample poses, filter visible mirrors and project their ROIs.
    ///
    /// A landmark appears in both ROI lists or in neither. Markers cover every
    /// visible landmark, including those whose ROIs failed.
    pub fn process_frame<L>(
        &self,
        frame: &CameraFrame,
        lookup: &L,
    ) -> Result<FrameOutput, DetectorError>
    where
        L: TransformLookup + ?Sized,
    {
        let Some(landmarks) = self.active_landmarks() else {
            debug!("no traffic mirror data available, skipping frame");
            return Err(DetectorError::NoLandmarks);
        };
        let camera = frame.info.build()?;

        let poses = match sample_camera_poses(lookup, &frame.header, &self.config) {
            Ok(poses) => poses,
            Err(err) => {
                let mut throttle = self.no_pose_warning.lock();
                match throttle.should_emit() {
                    Some(0) => warn!("{err}"),
                    Some(dropped) => warn!("{err} ({dropped} similar warnings suppressed)"),
                    None => {}
                }
                return Err(err);
            }
        };

        let visible = visible_landmarks(
            &landmarks,
            poses.window(),
            &camera,
            self.config.max_detection_range,
            self.max_view_angle,
        );

        let mut output = FrameOutput::new(frame.header.clone());
        for landmark in &visible {
            let Some(rois) = landmark_rois(
                poses.nominal(),
                poses.window(),
                &camera,
                landmark,
                &self.config.vibration,
            ) else {
                continue;
            };
            output.rough_rois.push(rois.rough);
            output.expected_rois.push(rois.expected);
        }
        output.markers = beam_markers(&frame.header, poses.first(), visible.iter().copied());

        debug!(
            "frame {}: {} poses, {} visible, {} rois",
            frame.header.stamp,
            poses.window().len(),
            visible.len(),
            output.rough_rois.len()
        );
        Ok(output)
    }
}

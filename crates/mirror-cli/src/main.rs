use std::{fs, path::Path};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use mirror_detector::{
    CameraFrame, DetectorConfig, DetectorError, LaneletRoute, MapBasedDetector, StampedTransform,
    TransformBuffer, VectorMap,
};

/// Replay camera frames against a vector map and print the traffic mirror ROIs.
#[derive(Debug, Parser)]
#[command(author, version, about = "Map-based traffic mirror ROI detector")]
struct Args {
    /// JSON VectorMap with lanelets, regulatory elements and line strings.
    #[arg(long)]
    map: String,

    /// JSON array of StampedTransform samples (map → camera frame poses).
    #[arg(long)]
    poses: String,

    /// JSON array of CameraFrame records to process in order.
    #[arg(long)]
    frames: String,

    /// Optional JSON LaneletRoute restricting the mirrors to its lanelets.
    #[arg(long)]
    route: Option<String>,

    /// Optional JSON DetectorConfig. Defaults are used if omitted.
    #[arg(long)]
    config: Option<String>,
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

/// Run every frame and return one JSON line per frame that produced output.
fn run_from_files(args: &Args) -> Result<Vec<String>> {
    let config = match &args.config {
        Some(path) => load_json_file::<DetectorConfig>(Path::new(path))?,
        None => DetectorConfig::default(),
    };
    let detector = MapBasedDetector::new(config);

    let map: VectorMap = load_json_file(Path::new(&args.map))?;
    detector.on_map(map).context("failed to load vector map")?;

    if let Some(path) = &args.route {
        let route: LaneletRoute = load_json_file(Path::new(path))?;
        detector.on_route(&route).context("failed to apply route")?;
    }

    let transforms: Vec<StampedTransform> = load_json_file(Path::new(&args.poses))?;
    let buffer: TransformBuffer = transforms.into_iter().collect();
    let frames: Vec<CameraFrame> = load_json_file(Path::new(&args.frames))?;

    let mut lines = Vec::with_capacity(frames.len());
    for frame in &frames {
        match detector.process_frame(frame, &buffer) {
            Ok(output) => lines.push(serde_json::to_string(&output)?),
            // already reported by the detector
            Err(DetectorError::NoPose { .. }) => {}
            Err(err) => warn!("skipping frame at {}: {err}", frame.header.stamp),
        }
    }
    info!("processed {} of {} frames", lines.len(), frames.len());
    Ok(lines)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = try_main() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();
    for line in run_from_files(&args)? {
        println!("{line}");
    }
    Ok(())
}

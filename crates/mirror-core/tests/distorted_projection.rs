//! Integration tests for raw-image projection through a distorted camera.
//!
//! With `R = I` and `P = [K | 0]`, projecting through the rectified image and
//! unrectifying must agree with projecting straight through `D` and `K`.

use mirror_core::{project_to_pixel, CameraInfo, Pt3};

fn distorted_info() -> CameraInfo {
    let mut info = CameraInfo::from_intrinsics(1280, 720, 800.0, 780.0, 640.0, 360.0);
    info.d = vec![-0.3, 0.1, 0.001, -0.001, 0.0];
    info
}

#[test]
fn rectified_then_unrectified_matches_raw_projection() {
    let camera = distorted_info().build().expect("camera should build");

    let test_points = vec![
        Pt3::new(0.0, 0.0, 2.0),
        Pt3::new(0.2, 0.1, 2.5),
        Pt3::new(-0.15, -0.08, 1.8),
        Pt3::new(0.3, -0.2, 3.0),
        Pt3::new(-0.1, 0.15, 2.2),
    ];

    for point in test_points {
        let via_rectified = project_to_pixel(&camera, &point).expect("point in front");
        let direct = camera
            .project_raw(&point.coords)
            .expect("point should project successfully");

        let dx = (via_rectified.x - direct.x).abs();
        let dy = (via_rectified.y - direct.y).abs();
        assert!(dx < 1e-6, "u error too large: {} for point {:?}", dx, point);
        assert!(dy < 1e-6, "v error too large: {} for point {:?}", dy, point);
    }
}

#[test]
fn rational_polynomial_with_zero_denominator_terms_matches_plumb_bob() {
    let plumb_bob = distorted_info().build().unwrap();
    let mut info = distorted_info();
    info.distortion_model = "rational_polynomial".to_string();
    info.d.extend([0.0, 0.0, 0.0]);
    let rational = info.build().unwrap();

    let point = Pt3::new(0.25, -0.1, 3.0);
    let a = project_to_pixel(&plumb_bob, &point).unwrap();
    let b = project_to_pixel(&rational, &point).unwrap();
    assert!((a - b).norm() < 1e-12);
}

/// Rectification rotation about the camera y axis.
fn rotated_info(d: Vec<f64>) -> CameraInfo {
    let mut info = CameraInfo::from_intrinsics(640, 480, 500.0, 500.0, 320.0, 240.0);
    let (s, c) = 0.05_f64.sin_cos();
    info.r = [c, 0.0, s, 0.0, 1.0, 0.0, -s, 0.0, c];
    info.d = d;
    info
}

#[test]
fn rectification_is_undone_with_the_transposed_rotation() {
    let camera = rotated_info(vec![1e-12, 0.0, 0.0, 0.0, 0.0]).build().unwrap();
    let px = project_to_pixel(&camera, &Pt3::new(0.0, 0.0, 5.0)).unwrap();
    // ray (0,0,1) rotated by Rᵀ to (-sin, 0, cos): u = 320 - 500 * tan(0.05)
    assert!((px.x - (320.0 - 500.0 * 0.05_f64.tan())).abs() < 1e-6);
    assert!((px.y - 240.0).abs() < 1e-6);
}

#[test]
fn undistorted_camera_keeps_the_rectified_pixel() {
    let camera = rotated_info(vec![0.0; 5]).build().unwrap();
    let px = project_to_pixel(&camera, &Pt3::new(0.0, 0.0, 5.0)).unwrap();
    assert_eq!((px.x, px.y), (320.0, 240.0));
}

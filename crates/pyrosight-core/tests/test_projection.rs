use approx::assert_abs_diff_eq;

use pyrosight_core::projection::{
    distance_3d, project_pixel_to_approx_world, CameraIntrinsics, Point2, Point3,
};

#[test]
fn test_projection_onto_plane() {
    let k = CameraIntrinsics::new(500.0, 400.0, 320.0, 240.0);
    let p = project_pixel_to_approx_world(Point2::new(420.0, 140.0), &k, 8.0);
    assert_abs_diff_eq!(p.x, 1.6, epsilon = 1e-12);
    assert_abs_diff_eq!(p.y, -2.0, epsilon = 1e-12);
    assert_eq!(p.z, 8.0);
}

#[test]
fn test_principal_point_projects_to_axis() {
    let k = CameraIntrinsics::default();
    let p = project_pixel_to_approx_world(Point2::new(k.cx, k.cy), &k, 5.0);
    assert_eq!(p, Point3::new(0.0, 0.0, 5.0));
}

#[test]
fn test_zero_focal_length_degrades_to_sentinel() {
    let k = CameraIntrinsics::new(0.0, 500.0, 320.0, 240.0);
    let p = project_pixel_to_approx_world(Point2::new(12.5, 7.0), &k, 8.0);
    assert_eq!(p, Point3::new(12.5, 7.0, 0.0));
    assert!(!p.has_valid_projection());
}

#[test]
fn test_non_finite_intrinsics_are_invalid() {
    assert!(!CameraIntrinsics::new(f64::NAN, 500.0, 0.0, 0.0).is_valid());
    assert!(!CameraIntrinsics::new(500.0, 0.0, 0.0, 0.0).is_valid());
    assert!(CameraIntrinsics::default().is_valid());
}

#[test]
fn test_distance_3d() {
    let a = Point3::new(0.0, 0.0, 8.0);
    let b = Point3::new(3.0, 4.0, 8.0);
    assert_abs_diff_eq!(distance_3d(&a, &b), 5.0, epsilon = 1e-12);
}

#[test]
fn test_distance_sentinel_never_groups() {
    let valid = Point3::new(1.0, 1.0, 8.0);
    let broken = Point3::new(1.0, 1.0, 0.0);
    let d = distance_3d(&valid, &broken);
    assert!(d.is_infinite());
    assert!(d >= f64::MAX);
    assert!(distance_3d(&broken, &broken).is_infinite());
}

//! Monocular pixel-to-world projection under a planar-distance assumption.
//!
//! A single thermal camera cannot observe depth, so every point is assumed to
//! lie on a plane at a configured distance in front of the sensor. When the
//! intrinsics are unusable the projection degrades to a `z == 0` sentinel
//! instead of failing; [`distance_3d`] treats that sentinel as infinitely far
//! away so broken projections are never merged.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_FOCAL_LENGTH, DEFAULT_PRINCIPAL_X, DEFAULT_PRINCIPAL_Y};

/// Sub-pixel image coordinate: `x` is the column, `y` the row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Approximate camera-frame position in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// False for the `z == 0` "no valid projection" sentinel.
    pub fn has_valid_projection(&self) -> bool {
        self.z != 0.0
    }
}

/// Pinhole camera intrinsics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in x (pixels).
    pub fx: f64,
    /// Focal length in y (pixels).
    pub fy: f64,
    /// Principal point x (pixels).
    pub cx: f64,
    /// Principal point y (pixels).
    pub cy: f64,
}

impl CameraIntrinsics {
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Returns `true` when both focal lengths are finite and non-zero.
    pub fn is_valid(&self) -> bool {
        self.fx.is_finite()
            && self.fy.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.fx != 0.0
            && self.fy != 0.0
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            fx: DEFAULT_FOCAL_LENGTH,
            fy: DEFAULT_FOCAL_LENGTH,
            cx: DEFAULT_PRINCIPAL_X,
            cy: DEFAULT_PRINCIPAL_Y,
        }
    }
}

/// Project a pixel onto the plane `Z = plane_distance`.
///
/// Returns `(px, py, 0)` when the intrinsics are invalid.
pub fn project_pixel_to_approx_world(
    pixel: Point2,
    intrinsics: &CameraIntrinsics,
    plane_distance: f64,
) -> Point3 {
    if !intrinsics.is_valid() {
        return Point3::new(pixel.x, pixel.y, 0.0);
    }
    let x = (pixel.x - intrinsics.cx) * plane_distance / intrinsics.fx;
    let y = (pixel.y - intrinsics.cy) * plane_distance / intrinsics.fy;
    Point3::new(x, y, plane_distance)
}

/// Euclidean distance, or `f64::INFINITY` if either point carries the `z == 0` sentinel.
pub fn distance_3d(a: &Point3, b: &Point3) -> f64 {
    if !a.has_valid_projection() || !b.has_valid_projection() {
        return f64::INFINITY;
    }
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

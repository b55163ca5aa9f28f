use serde::{Deserialize, Serialize};

use crate::aim::{AimGeometry, NozzleOffset, PitchPolarity};
use crate::consts::{
    DEFAULT_HFOV_DEGREES, DEFAULT_MAX_GROUPING_DISTANCE, DEFAULT_PLANE_DISTANCE,
    DEFAULT_VFOV_DEGREES,
};
use crate::error::{PyroError, Result};
use crate::io::thermal::ThermalImageConfig;
use crate::projection::CameraIntrinsics;
use crate::segment::DetectionConfig;

/// Session configuration. Loaded once at startup and passed by reference into
/// every frame; replace it only between frames.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PyroConfig {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub gimbal: GimbalConfig,
    #[serde(default)]
    pub thermal_image: ThermalImageConfig,
}

impl PyroConfig {
    /// Reject values that would make the grouping or loading stages meaningless.
    ///
    /// Field of view is not checked here; the resolver reports it per frame and
    /// holds the gimbal instead.
    pub fn validate(&self) -> Result<()> {
        let d = self.grouping.max_grouping_distance;
        if !d.is_finite() || d <= 0.0 {
            return Err(PyroError::Configuration(format!(
                "max_grouping_distance must be finite and positive, got {d}"
            )));
        }
        let z = self.projection.plane_distance;
        if !z.is_finite() || z < 0.0 {
            return Err(PyroError::Configuration(format!(
                "plane_distance must be finite and non-negative, got {z}"
            )));
        }
        if self.detection.temperature_threshold.is_nan() {
            return Err(PyroError::Configuration(
                "temperature_threshold is NaN".into(),
            ));
        }
        self.thermal_image.validate()
    }

    /// Aim geometry for a frame of the given size.
    pub fn aim_geometry(&self, image_width: usize, image_height: usize) -> AimGeometry {
        AimGeometry {
            image_width,
            image_height,
            hfov_degrees: self.camera.hfov_degrees,
            vfov_degrees: self.camera.vfov_degrees,
            pitch_polarity: self.gimbal.pitch_polarity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Assumed distance (metres) to the fire plane.
    #[serde(default = "default_plane_distance")]
    pub plane_distance: f64,
    /// Pinhole intrinsics of the thermal camera.
    #[serde(default)]
    pub intrinsics: CameraIntrinsics,
}

fn default_plane_distance() -> f64 {
    DEFAULT_PLANE_DISTANCE
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            plane_distance: DEFAULT_PLANE_DISTANCE,
            intrinsics: CameraIntrinsics::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Hotspots strictly closer than this (metres) to a seed join its target.
    #[serde(default = "default_max_grouping_distance")]
    pub max_grouping_distance: f64,
}

fn default_max_grouping_distance() -> f64 {
    DEFAULT_MAX_GROUPING_DISTANCE
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            max_grouping_distance: DEFAULT_MAX_GROUPING_DISTANCE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_hfov")]
    pub hfov_degrees: f64,
    #[serde(default = "default_vfov")]
    pub vfov_degrees: f64,
}

fn default_hfov() -> f64 {
    DEFAULT_HFOV_DEGREES
}
fn default_vfov() -> f64 {
    DEFAULT_VFOV_DEGREES
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            hfov_degrees: DEFAULT_HFOV_DEGREES,
            vfov_degrees: DEFAULT_VFOV_DEGREES,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GimbalConfig {
    #[serde(default)]
    pub pitch_polarity: PitchPolarity,
    /// Calibrated nozzle-to-camera angular offset.
    #[serde(default)]
    pub nozzle_offset: NozzleOffset,
}

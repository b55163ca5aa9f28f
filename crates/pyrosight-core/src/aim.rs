//! Pixel-to-angle resolution for the two-axis nozzle gimbal.
//!
//! The offset of a target from the image center is mapped to an angle
//! linearly: `offset = (pixel - center) / center * fov / 2`. This is a
//! small-angle approximation of the pinhole geometry; the exact angle is
//! `atan((pixel - center) / f)`. The two agree at the center and at the image
//! edge; in between the linear form under-reads, by up to about 1.1 deg at
//! 60 deg HFOV, and the error grows quickly for wider optics.
//!
//! No clamping or wrap-around is applied. Enforcing mechanical limits is the
//! caller's job.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PyroError, Result};
use crate::projection::Point2;

/// Absolute gimbal attitude in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GimbalAngles {
    pub azimuth_degrees: f64,
    pub pitch_degrees: f64,
}

impl GimbalAngles {
    pub fn new(azimuth_degrees: f64, pitch_degrees: f64) -> Self {
        Self {
            azimuth_degrees,
            pitch_degrees,
        }
    }
}

impl fmt::Display for GimbalAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "az {:.3}\u{b0}, pitch {:.3}\u{b0}",
            self.azimuth_degrees, self.pitch_degrees
        )
    }
}

/// Fixed angular displacement of the nozzle axis relative to the camera axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NozzleOffset {
    pub azimuth_degrees: f64,
    pub pitch_degrees: f64,
}

/// How a downward move in the image (increasing row) maps onto gimbal pitch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchPolarity {
    /// Targets below the image center increase pitch.
    #[default]
    DownIsPositive,
    /// Targets below the image center decrease pitch.
    DownIsNegative,
}

impl PitchPolarity {
    pub fn sign(self) -> f64 {
        match self {
            Self::DownIsPositive => 1.0,
            Self::DownIsNegative => -1.0,
        }
    }
}

impl fmt::Display for PitchPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DownIsPositive => write!(f, "Down is positive"),
            Self::DownIsNegative => write!(f, "Down is negative"),
        }
    }
}

/// Image and field-of-view geometry needed to turn pixels into angles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimGeometry {
    pub image_width: usize,
    pub image_height: usize,
    pub hfov_degrees: f64,
    pub vfov_degrees: f64,
    pub pitch_polarity: PitchPolarity,
}

impl AimGeometry {
    pub fn validate(&self) -> Result<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(PyroError::Configuration(format!(
                "image dimensions must be positive, got {}x{}",
                self.image_width, self.image_height
            )));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.hfov_degrees) || !positive(self.vfov_degrees) {
            return Err(PyroError::Configuration(format!(
                "field of view must be positive, got {}x{} degrees",
                self.hfov_degrees, self.vfov_degrees
            )));
        }
        Ok(())
    }

    /// Angular offset (horizontal, vertical) of `pixel` from the optical center.
    pub fn angular_offset(&self, pixel: Point2) -> (f64, f64) {
        let center_x = self.image_width as f64 / 2.0;
        let center_y = self.image_height as f64 / 2.0;
        let horizontal = (pixel.x - center_x) / center_x * (self.hfov_degrees / 2.0);
        let vertical = self.pitch_polarity.sign()
            * ((pixel.y - center_y) / center_y)
            * (self.vfov_degrees / 2.0);
        (horizontal, vertical)
    }
}

/// Absolute gimbal setpoint that points the nozzle at `target_pixel`.
///
/// `azimuth = current + horizontal - nozzle`, `pitch = current + vertical - nozzle`.
/// Invalid geometry is a configuration error.
pub fn resolve_gimbal_angles(
    target_pixel: Point2,
    geometry: &AimGeometry,
    current: GimbalAngles,
    nozzle: NozzleOffset,
) -> Result<GimbalAngles> {
    geometry.validate()?;
    let (horizontal, vertical) = geometry.angular_offset(target_pixel);
    Ok(GimbalAngles {
        azimuth_degrees: current.azimuth_degrees + horizontal - nozzle.azimuth_degrees,
        pitch_degrees: current.pitch_degrees + vertical - nozzle.pitch_degrees,
    })
}

/// Outcome of one aim resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum GimbalCommand {
    /// Drive the gimbal to these angles.
    Actuate(GimbalAngles),
    /// Keep the current attitude; actuation must be suppressed.
    Hold(GimbalAngles),
}

impl GimbalCommand {
    pub fn angles(&self) -> GimbalAngles {
        match self {
            Self::Actuate(a) | Self::Hold(a) => *a,
        }
    }

    pub fn is_actuate(&self) -> bool {
        matches!(self, Self::Actuate(_))
    }
}

/// [`resolve_gimbal_angles`], falling back to holding `current` on a configuration error.
pub fn resolve_or_hold(
    target_pixel: Point2,
    geometry: &AimGeometry,
    current: GimbalAngles,
    nozzle: NozzleOffset,
) -> GimbalCommand {
    match resolve_gimbal_angles(target_pixel, geometry, current, nozzle) {
        Ok(angles) => GimbalCommand::Actuate(angles),
        Err(e) => {
            warn!(error = %e, "Withholding gimbal command");
            GimbalCommand::Hold(current)
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_AREA_PIXELS, DEFAULT_TEMPERATURE_THRESHOLD};

/// Configuration for hotspot segmentation in a single frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Samples at or above this temperature are hot.
    #[serde(default = "default_temperature_threshold")]
    pub temperature_threshold: f32,
    /// Minimum region area (pixels) for a hotspot. Equal area is kept.
    #[serde(default = "default_min_area_pixels")]
    pub min_area_pixels: usize,
}

fn default_temperature_threshold() -> f32 {
    DEFAULT_TEMPERATURE_THRESHOLD
}
fn default_min_area_pixels() -> usize {
    DEFAULT_MIN_AREA_PIXELS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            temperature_threshold: DEFAULT_TEMPERATURE_THRESHOLD,
            min_area_pixels: DEFAULT_MIN_AREA_PIXELS,
        }
    }
}

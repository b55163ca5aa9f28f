use std::path::Path;

use image::imageops::FilterType;
use image::{ImageBuffer, Luma};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_THERMAL_HEIGHT, DEFAULT_THERMAL_MAX_TEMPERATURE, DEFAULT_THERMAL_MIN_TEMPERATURE,
    DEFAULT_THERMAL_WIDTH,
};
use crate::error::{PyroError, Result};
use crate::field::TemperatureField;

/// 16-bit grayscale buffer, the intermediate form of every loaded thermal image.
pub type Gray16Image = ImageBuffer<Luma<u16>, Vec<u16>>;

/// How a grayscale thermal image maps onto temperatures.
///
/// Black maps to `min_temperature`, white to `max_temperature`, linearly in between.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThermalImageConfig {
    #[serde(default = "default_min_temperature")]
    pub min_temperature: f32,
    #[serde(default = "default_max_temperature")]
    pub max_temperature: f32,
    /// Sensor width the image is resampled to when `resize` is set.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Sensor height the image is resampled to when `resize` is set.
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_true")]
    pub resize: bool,
}

fn default_min_temperature() -> f32 {
    DEFAULT_THERMAL_MIN_TEMPERATURE
}
fn default_max_temperature() -> f32 {
    DEFAULT_THERMAL_MAX_TEMPERATURE
}
fn default_width() -> u32 {
    DEFAULT_THERMAL_WIDTH
}
fn default_height() -> u32 {
    DEFAULT_THERMAL_HEIGHT
}
fn default_true() -> bool {
    true
}

impl Default for ThermalImageConfig {
    fn default() -> Self {
        Self {
            min_temperature: DEFAULT_THERMAL_MIN_TEMPERATURE,
            max_temperature: DEFAULT_THERMAL_MAX_TEMPERATURE,
            width: DEFAULT_THERMAL_WIDTH,
            height: DEFAULT_THERMAL_HEIGHT,
            resize: true,
        }
    }
}

impl ThermalImageConfig {
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = (self.min_temperature, self.max_temperature);
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return Err(PyroError::Configuration(format!(
                "thermal max_temperature ({}) must exceed min_temperature ({})",
                self.max_temperature, self.min_temperature
            )));
        }
        if self.resize && (self.width == 0 || self.height == 0) {
            return Err(PyroError::Configuration(format!(
                "thermal resize target must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Load a grayscale thermal image as a temperature field.
pub fn load_thermal_image(path: &Path, config: &ThermalImageConfig) -> Result<TemperatureField> {
    config.validate()?;
    let mut img = image::open(path)?;
    if config.resize && (img.width() != config.width || img.height() != config.height) {
        img = img.resize_exact(config.width, config.height, FilterType::Triangle);
    }
    let gray = img.to_luma16();
    field_from_luma(&gray, config.min_temperature, config.max_temperature)
}

/// Map a 16-bit grayscale buffer linearly onto `[min_temperature, max_temperature]`.
pub fn field_from_luma(
    gray: &Gray16Image,
    min_temperature: f32,
    max_temperature: f32,
) -> Result<TemperatureField> {
    let (w, h) = gray.dimensions();
    if w == 0 || h == 0 {
        return Err(PyroError::DataFormat(format!(
            "thermal image is empty ({w}x{h})"
        )));
    }

    let scale = (max_temperature - min_temperature) / 65535.0;
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));
    for row in 0..h as usize {
        for col in 0..w as usize {
            let pixel = gray.get_pixel(col as u32, row as u32);
            data[[row, col]] = min_temperature + pixel.0[0] as f32 * scale;
        }
    }

    Ok(TemperatureField::new(data))
}

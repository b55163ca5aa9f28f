use ndarray::Array2;

use crate::error::{PyroError, Result};

/// A calibrated thermal frame.
/// Samples are temperatures (degrees Celsius) in an f32 grid, shape = (height, width).
#[derive(Clone, Debug)]
pub struct TemperatureField {
    /// Sample data, row-major.
    pub data: Array2<f32>,
}

impl TemperatureField {
    pub fn new(data: Array2<f32>) -> Self {
        Self { data }
    }

    /// Build a field from a row-major sample buffer.
    pub fn from_raw(width: usize, height: usize, samples: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || samples.len() != width * height {
            return Err(PyroError::InvalidDimensions {
                width,
                height,
                samples: samples.len(),
            });
        }
        let data = Array2::from_shape_vec((height, width), samples)
            .map_err(|e| PyroError::DataFormat(e.to_string()))?;
        Ok(Self { data })
    }

    /// A uniform field, mostly useful as a background for synthetic scenes.
    pub fn filled(width: usize, height: usize, temperature: f32) -> Self {
        Self {
            data: Array2::from_elem((height, width), temperature),
        }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Temperature at `(row, col)`.
    pub fn at(&self, row: usize, col: usize) -> f32 {
        self.data[[row, col]]
    }
}

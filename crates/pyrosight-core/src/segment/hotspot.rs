use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ProjectionConfig;
use crate::consts::MORPHOLOGY_KERNEL_SIZE;
use crate::error::{PyroError, Result};
use crate::field::TemperatureField;
use crate::projection::{project_pixel_to_approx_world, CameraIntrinsics, Point2, Point3};

use super::components::connected_components;
use super::config::DetectionConfig;
use super::contour::trace_outer_boundary;
use super::morphology::{fill_holes, morphological_closing, morphological_opening, StructuringElement};
use super::threshold::{peak_in_label, threshold_mask};

/// A contiguous hot region of one frame.
#[derive(Clone, Debug, Serialize)]
pub struct HotSpot {
    /// Sequential per frame, starting at 0.
    pub id: usize,
    /// Geometric centroid (column, row) of the filled region.
    pub pixel_centroid: Point2,
    /// Centroid projected onto the assumed fire plane; `z == 0` if no valid projection.
    pub approx_world_position: Point3,
    /// Pixel count of the filled region.
    pub pixel_area: usize,
    /// Hottest sample inside the region.
    pub peak_temperature: f32,
    /// Outer boundary as clockwise (row, col) pixels.
    pub boundary: Vec<(usize, usize)>,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

impl HotSpot {
    /// Contribution of this hotspot to a target's severity.
    pub fn severity(&self) -> f64 {
        self.pixel_area as f64 * self.peak_temperature as f64
    }
}

/// Extract hotspots from a temperature field.
///
/// Pipeline: threshold -> opening -> closing -> hole filling ->
/// 8-connected labeling -> area filter -> moments, peak, boundary -> projection.
///
/// An empty field is a data-format error. Invalid intrinsics are not an error:
/// positions fall back to the `z == 0` sentinel.
pub fn segment(
    field: &TemperatureField,
    intrinsics: &CameraIntrinsics,
    plane_distance: f64,
    temperature_threshold: f32,
    min_area_pixels: usize,
) -> Result<Vec<HotSpot>> {
    let (h, w) = field.data.dim();
    if field.is_empty() {
        return Err(PyroError::DataFormat(format!(
            "temperature field is empty ({w}x{h})"
        )));
    }

    // Step 1: Binary mask.
    let mask = threshold_mask(&field.data, temperature_threshold);

    // Step 2: Opening drops speckle, closing bridges small gaps.
    let element = StructuringElement::ellipse(MORPHOLOGY_KERNEL_SIZE);
    let opened = morphological_opening(&mask, &element);
    let cleaned = morphological_closing(&opened, &element);

    // Step 3: Outer outlines only, so holes belong to their enclosing region.
    let filled = fill_holes(&cleaned);
    let labeled = connected_components(&filled);

    if !intrinsics.is_valid() {
        warn!("Invalid camera intrinsics, hotspot positions degrade to pixel coordinates");
    }

    let mut hotspots = Vec::new();
    let mut too_small = 0usize;

    for component in &labeled.components {
        // Step 4: Area filter.
        if component.area < min_area_pixels {
            too_small += 1;
            continue;
        }

        // Step 5: Centroid from first-order moments.
        let m00 = component.area as f64;
        if m00 == 0.0 {
            continue;
        }
        let centroid = Point2::new(component.sum_col / m00, component.sum_row / m00);

        // Step 6: Peak temperature on the original field.
        let Some(peak) = peak_in_label(&field.data, &labeled.labels, component.label, component.bbox)
        else {
            continue;
        };

        // Step 7: Boundary for visualization.
        let boundary = trace_outer_boundary(
            &labeled.labels,
            component.label,
            component.first_pixel,
            component.area,
        );

        // Step 8: Projection.
        let world = project_pixel_to_approx_world(centroid, intrinsics, plane_distance);

        hotspots.push(HotSpot {
            id: hotspots.len(),
            pixel_centroid: centroid,
            approx_world_position: world,
            pixel_area: component.area,
            peak_temperature: peak,
            boundary,
            bbox: component.bbox,
        });
    }

    debug!(
        components = labeled.components.len(),
        too_small,
        hotspots = hotspots.len(),
        "Segmentation complete"
    );

    Ok(hotspots)
}

/// [`segment`] driven by configuration objects.
pub fn segment_with(
    field: &TemperatureField,
    detection: &DetectionConfig,
    projection: &ProjectionConfig,
) -> Result<Vec<HotSpot>> {
    segment(
        field,
        &projection.intrinsics,
        projection.plane_distance,
        detection.temperature_threshold,
        detection.min_area_pixels,
    )
}

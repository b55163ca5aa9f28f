#![allow(dead_code)]

use pyrosight_core::field::TemperatureField;
use pyrosight_core::projection::{Point2, Point3};
use pyrosight_core::segment::HotSpot;

/// Ambient temperature of synthetic scenes.
pub const BACKGROUND: f32 = 20.0;

/// Field at ambient temperature.
pub fn blank_field(width: usize, height: usize) -> TemperatureField {
    TemperatureField::filled(width, height, BACKGROUND)
}

/// Paint a uniform disc of `temperature` centred at (`cx`, `cy`) = (col, row).
pub fn paint_disc(field: &mut TemperatureField, cx: f64, cy: f64, radius: f64, temperature: f32) {
    let (h, w) = field.data.dim();
    for row in 0..h {
        for col in 0..w {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            if (dx * dx + dy * dy).sqrt() <= radius {
                field.data[[row, col]] = temperature;
            }
        }
    }
}

/// Paint an annulus between `inner` (exclusive) and `outer` (inclusive) radius.
/// Returns the number of painted pixels.
pub fn paint_ring(
    field: &mut TemperatureField,
    cx: f64,
    cy: f64,
    inner: f64,
    outer: f64,
    temperature: f32,
) -> usize {
    let (h, w) = field.data.dim();
    let mut painted = 0;
    for row in 0..h {
        for col in 0..w {
            let dx = col as f64 - cx;
            let dy = row as f64 - cy;
            let r = (dx * dx + dy * dy).sqrt();
            if r > inner && r <= outer {
                field.data[[row, col]] = temperature;
                painted += 1;
            }
        }
    }
    painted
}

/// Hand-built hotspot for clustering tests.
pub fn hotspot(id: usize, pixel: (f64, f64), world: (f64, f64, f64), area: usize, peak: f32) -> HotSpot {
    HotSpot {
        id,
        pixel_centroid: Point2::new(pixel.0, pixel.1),
        approx_world_position: Point3::new(world.0, world.1, world.2),
        pixel_area: area,
        peak_temperature: peak,
        boundary: Vec::new(),
        bbox: (0, 0, 0, 0),
    }
}

/// Hotspot on the default 8 m plane at world x = `x`.
pub fn hotspot_at(id: usize, x: f64, area: usize, peak: f32) -> HotSpot {
    hotspot(id, (100.0 + x * 10.0, 100.0), (x, 0.0, 8.0), area, peak)
}

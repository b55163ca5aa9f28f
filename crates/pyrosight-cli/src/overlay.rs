use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, Rgb, RgbImage};
use pyrosight_core::field::TemperatureField;
use pyrosight_core::pipeline::FrameReport;
use pyrosight_core::segment::threshold::threshold_mask;

const RAW_CONTOUR: Rgb<u8> = Rgb([255, 255, 255]);
const BOUNDARY: Rgb<u8> = Rgb([0, 255, 0]);
const CENTROID: Rgb<u8> = Rgb([255, 0, 0]);
const AIM: Rgb<u8> = Rgb([255, 0, 255]);
const MEMBER_BOX: Rgb<u8> = Rgb([0, 0, 0]);
const PRIMARY: Rgb<u8> = Rgb([255, 255, 0]);

/// Render the field as a jet-coloured image with detections drawn on top.
///
/// Layers, bottom to top: edges of the raw `>= threshold` mask (white), hotspot
/// outlines (green) and centroids (red), member boxes (black), then one circle
/// per target labelled with its rank (`T1` is the primary target, in yellow).
pub fn render_overlay(field: &TemperatureField, report: &FrameReport, threshold: f32) -> RgbImage {
    let (h, w) = field.data.dim();
    let (lo, hi) = field
        .data
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = if hi > lo { hi - lo } else { 1.0 };

    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            let t = ((field.data[[row, col]] - lo) / span).clamp(0.0, 1.0);
            img.put_pixel(col as u32, row as u32, jet(t));
        }
    }

    let raw = threshold_mask(&field.data, threshold);
    for ((row, col), &hot) in raw.indexed_iter() {
        let edge = hot
            && (row == 0
                || col == 0
                || row + 1 == h
                || col + 1 == w
                || !raw[[row - 1, col]]
                || !raw[[row + 1, col]]
                || !raw[[row, col - 1]]
                || !raw[[row, col + 1]]);
        if edge {
            img.put_pixel(col as u32, row as u32, RAW_CONTOUR);
        }
    }

    for spot in &report.hotspots {
        for &(row, col) in &spot.boundary {
            put(&mut img, col as i64, row as i64, BOUNDARY);
        }
        fill_disc(
            &mut img,
            spot.pixel_centroid.x.round() as i64,
            spot.pixel_centroid.y.round() as i64,
            3,
            CENTROID,
        );
    }

    for (rank, target) in report.targets.iter().enumerate() {
        for id in &target.member_hotspot_ids {
            if let Some(spot) = report.hotspots.iter().find(|s| s.id == *id) {
                draw_rect(&mut img, spot.bbox, MEMBER_BOX);
            }
        }
        let color = if rank == 0 { PRIMARY } else { AIM };
        let cx = target.aim_pixel_point.x.round() as i64;
        let cy = target.aim_pixel_point.y.round() as i64;
        draw_circle(&mut img, cx, cy, 8, color);
        draw_label(&mut img, cx + 10, cy - 12, &format!("T{}", rank + 1), color);
    }

    img
}

pub fn save_overlay(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("Failed to write overlay {}", path.display()))
}

/// Piecewise-linear jet colormap for `t` in [0, 1].
fn jet(t: f32) -> Rgb<u8> {
    let channel = |offset: f32| -> u8 {
        let v = 1.5 - (4.0 * t - offset).abs();
        (v.clamp(0.0, 1.0) * 255.0) as u8
    };
    Rgb([channel(3.0), channel(2.0), channel(1.0)])
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn fill_disc(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// 3x5 glyphs, one row per byte, high bit on the left.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b010, 0b010, 0b010],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        _ => return None,
    };
    Some(rows)
}

/// Draw `text` at 2x scale with its top-left corner at `(x, y)`.
fn draw_label(img: &mut RgbImage, x: i64, y: i64, text: &str, color: Rgb<u8>) {
    const SCALE: i64 = 2;
    let mut pen = x;
    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (gy, bits) in rows.iter().enumerate() {
                for gx in 0..3 {
                    if bits & (0b100 >> gx) == 0 {
                        continue;
                    }
                    for sy in 0..SCALE {
                        for sx in 0..SCALE {
                            put(img, pen + gx * SCALE + sx, y + gy as i64 * SCALE + sy, color);
                        }
                    }
                }
            }
        }
        pen += 4 * SCALE;
    }
}

/// Midpoint circle outline.
fn draw_circle(img: &mut RgbImage, cx: i64, cy: i64, radius: i64, color: Rgb<u8>) {
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;
    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            put(img, cx + dx, cy + dy, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

fn draw_rect(img: &mut RgbImage, bbox: (usize, usize, usize, usize), color: Rgb<u8>) {
    let (min_row, max_row, min_col, max_col) = bbox;
    let (top, bottom) = (min_row as i64 - 1, max_row as i64 + 1);
    let (left, right) = (min_col as i64 - 1, max_col as i64 + 1);
    for x in left..=right {
        put(img, x, top, color);
        put(img, x, bottom, color);
    }
    for y in top..=bottom {
        put(img, left, y, color);
        put(img, right, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        assert_eq!(jet(0.0), Rgb([0, 0, 127]));
        assert_eq!(jet(1.0), Rgb([127, 0, 0]));
    }

    #[test]
    fn test_drawing_clips_to_image() {
        let mut img = RgbImage::new(4, 4);
        draw_circle(&mut img, 0, 0, 8, AIM);
        fill_disc(&mut img, -2, -2, 3, CENTROID);
        draw_rect(&mut img, (0, 3, 0, 3), MEMBER_BOX);
        draw_label(&mut img, -20, -20, "T12", PRIMARY);
        assert_eq!(img.get_pixel(0, 0), &CENTROID);
    }

    #[test]
    fn test_label_draws_scaled_glyph() {
        let mut img = RgbImage::new(16, 12);
        draw_label(&mut img, 0, 0, "T1", PRIMARY);
        // Top bar of the T spans 3 glyph columns at 2x.
        for x in 0..6 {
            assert_eq!(img.get_pixel(x, 0), &PRIMARY);
        }
        assert_eq!(img.get_pixel(0, 2), &Rgb([0, 0, 0]));
        // Stem of the 1 starts after a 4-column advance.
        assert_eq!(img.get_pixel(10, 0), &PRIMARY);
    }

    #[test]
    fn test_raw_threshold_edges_are_white() {
        let mut field = TemperatureField::filled(9, 9, 20.0);
        for row in 2..7 {
            for col in 2..7 {
                field.data[[row, col]] = 400.0;
            }
        }
        let report = FrameReport {
            frame_index: 0,
            width: 9,
            height: 9,
            hotspots: Vec::new(),
            targets: Vec::new(),
            command: None,
        };
        let img = render_overlay(&field, &report, 250.0);
        assert_eq!(img.get_pixel(2, 2), &RAW_CONTOUR);
        assert_eq!(img.get_pixel(4, 6), &RAW_CONTOUR);
        assert_ne!(img.get_pixel(4, 4), &RAW_CONTOUR);
        assert_ne!(img.get_pixel(0, 0), &RAW_CONTOUR);
    }
}

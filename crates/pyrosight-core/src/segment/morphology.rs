use ndarray::Array2;

/// Binary structuring element stored as `(d_row, d_col)` offsets from its anchor.
#[derive(Clone, Debug)]
pub struct StructuringElement {
    offsets: Vec<(i64, i64)>,
}

impl StructuringElement {
    /// Filled ellipse inscribed in a `size x size` square, anchored at the center.
    ///
    /// For `size = 5` this is the 17-pixel disc
    /// ```text
    /// . . # . .
    /// # # # # #
    /// # # # # #
    /// # # # # #
    /// . . # . .
    /// ```
    pub fn ellipse(size: usize) -> Self {
        let size = size.max(1);
        let r = (size / 2) as i64;
        let c = (size / 2) as i64;
        let mut offsets = Vec::new();

        for row in 0..size as i64 {
            let dy = row - r;
            let half_width = if r == 0 {
                c
            } else {
                let ratio = ((r * r - dy * dy) as f64 / (r * r) as f64).max(0.0);
                (c as f64 * ratio.sqrt()).round() as i64
            };
            let start = (c - half_width).max(0);
            let end = (c + half_width + 1).min(size as i64);
            for col in start..end {
                offsets.push((dy, col - c));
            }
        }

        Self { offsets }
    }

    /// 3x3 square (8-neighbourhood plus center).
    pub fn square3() -> Self {
        let mut offsets = Vec::with_capacity(9);
        for dr in -1..=1 {
            for dc in -1..=1 {
                offsets.push((dr, dc));
            }
        }
        Self { offsets }
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Morphological opening (erosion followed by dilation).
///
/// Removes isolated foreground speckle smaller than the element.
pub fn morphological_opening(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let eroded = erode(mask, element);
    dilate(&eroded, element)
}

/// Morphological closing (dilation followed by erosion).
///
/// Bridges gaps narrower than the element between neighbouring foreground regions.
pub fn morphological_closing(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let dilated = dilate(mask, element);
    erode(&dilated, element)
}

/// Binary erosion: a pixel stays true only if every in-bounds pixel under the element is true.
///
/// Out-of-bounds positions are ignored so regions touching the frame edge are not eaten away.
fn erode(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }
            let all_true = element.offsets.iter().all(|&(dr, dc)| {
                match neighbor(row, col, dr, dc, h, w) {
                    Some((nr, nc)) => mask[[nr, nc]],
                    None => true,
                }
            });
            result[[row, col]] = all_true;
        }
    }

    result
}

/// Binary dilation: a pixel becomes true if any in-bounds pixel under the reflected element is true.
fn dilate(mask: &Array2<bool>, element: &StructuringElement) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut result = Array2::from_elem((h, w), false);

    for row in 0..h {
        for col in 0..w {
            let any_true = element.offsets.iter().any(|&(dr, dc)| {
                matches!(neighbor(row, col, -dr, -dc, h, w), Some((nr, nc)) if mask[[nr, nc]])
            });
            result[[row, col]] = any_true;
        }
    }

    result
}

/// Fill background regions that cannot be reached from the frame border.
///
/// Background is flooded with 4-connectivity, the dual of the 8-connected
/// foreground, so every hole enclosed by an 8-connected region is filled.
pub fn fill_holes(mask: &Array2<bool>) -> Array2<bool> {
    let (h, w) = mask.dim();
    let mut outside = Array2::from_elem((h, w), false);
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for row in 0..h {
        for col in 0..w {
            let on_border = row == 0 || col == 0 || row == h - 1 || col == w - 1;
            if on_border && !mask[[row, col]] && !outside[[row, col]] {
                outside[[row, col]] = true;
                stack.push((row, col));
            }
        }
    }

    while let Some((row, col)) = stack.pop() {
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some((nr, nc)) = neighbor(row, col, dr, dc, h, w) {
                if !mask[[nr, nc]] && !outside[[nr, nc]] {
                    outside[[nr, nc]] = true;
                    stack.push((nr, nc));
                }
            }
        }
    }

    outside.mapv(|o| !o)
}

fn neighbor(row: usize, col: usize, dr: i64, dc: i64, h: usize, w: usize) -> Option<(usize, usize)> {
    let nr = row as i64 + dr;
    let nc = col as i64 + dc;
    if nr < 0 || nr >= h as i64 || nc < 0 || nc >= w as i64 {
        None
    } else {
        Some((nr as usize, nc as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from(rows: &[&str]) -> Array2<bool> {
        let h = rows.len();
        let w = rows[0].len();
        let cells: Vec<bool> = rows.iter().flat_map(|r| r.chars().map(|c| c == '#')).collect();
        Array2::from_shape_vec((h, w), cells).unwrap()
    }

    #[test]
    fn test_ellipse_5_matches_reference_disc() {
        let se = StructuringElement::ellipse(5);
        assert_eq!(se.len(), 17);
        assert!(se.offsets.contains(&(-2, 0)));
        assert!(!se.offsets.contains(&(-2, -1)));
        assert!(!se.offsets.contains(&(-2, -2)));
        assert!(!se.offsets.contains(&(2, 2)));
        assert!(se.offsets.contains(&(-1, -2)));
        assert!(se.offsets.contains(&(2, 0)));
    }

    #[test]
    fn test_opening_removes_speckle() {
        let mut mask = Array2::from_elem((20, 20), false);
        mask[[10, 10]] = true;
        mask[[3, 4]] = true;
        let opened = morphological_opening(&mask, &StructuringElement::ellipse(5));
        assert!(opened.iter().all(|&v| !v));
    }

    #[test]
    fn test_opening_keeps_large_block() {
        let mut mask = Array2::from_elem((20, 20), false);
        for row in 5..15 {
            for col in 5..15 {
                mask[[row, col]] = true;
            }
        }
        let opened = morphological_opening(&mask, &StructuringElement::ellipse(5));
        assert!(opened[[10, 10]]);
        assert!(opened[[6, 10]]);
    }

    #[test]
    fn test_opening_keeps_region_at_frame_edge() {
        let mut mask = Array2::from_elem((12, 12), false);
        for row in 0..6 {
            for col in 0..6 {
                mask[[row, col]] = true;
            }
        }
        let opened = morphological_opening(&mask, &StructuringElement::ellipse(5));
        assert!(opened[[0, 0]]);
    }

    #[test]
    fn test_closing_bridges_one_pixel_gap() {
        let mask = mask_from(&[
            "..........",
            ".###.###..",
            ".###.###..",
            ".###.###..",
            "..........",
        ]);
        let closed = morphological_closing(&mask, &StructuringElement::square3());
        assert!(closed[[2, 4]]);
    }

    #[test]
    fn test_fill_holes_fills_enclosed_background() {
        let mask = mask_from(&[
            ".......",
            ".#####.",
            ".#...#.",
            ".#.#.#.",
            ".#...#.",
            ".#####.",
            ".......",
        ]);
        let filled = fill_holes(&mask);
        assert!(filled[[2, 2]]);
        assert!(filled[[3, 3]]);
        assert!(!filled[[0, 0]]);
        assert!(!filled[[6, 3]]);
    }

    #[test]
    fn test_fill_holes_leaves_open_cup() {
        let mask = mask_from(&[
            ".#.#.",
            ".#.#.",
            ".###.",
        ]);
        let filled = fill_holes(&mask);
        assert!(!filled[[0, 2]]);
        assert!(!filled[[1, 2]]);
    }
}

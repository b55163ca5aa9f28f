use ndarray::Array2;

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Label of this component in [`LabeledComponents::labels`], starting at 1.
    pub label: u32,
    /// Number of pixels in the component (zeroth moment).
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
    /// First pixel of the component in raster order, as (row, col).
    pub first_pixel: (usize, usize),
    /// Sum of column indices (first moment m10).
    pub sum_col: f64,
    /// Sum of row indices (first moment m01).
    pub sum_row: f64,
}

/// Label image plus per-component statistics.
#[derive(Clone, Debug)]
pub struct LabeledComponents {
    /// 0 for background, otherwise the component label.
    pub labels: Array2<u32>,
    /// Components ordered by the raster position of their first pixel.
    pub components: Vec<ComponentStats>,
}

/// Perform connected component analysis on a binary mask using two-pass
/// labeling with union-find. Uses 8-connectivity (upper-left, upper,
/// upper-right and left neighbours in the first pass).
///
/// Labels are compacted to `1..=n` in raster order of each component's first
/// pixel, so the output ordering is deterministic.
pub fn connected_components(mask: &Array2<bool>) -> LabeledComponents {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return LabeledComponents {
            labels,
            components: Vec::new(),
        };
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let mut neighbours = [0u32; 4];
            if row > 0 {
                if col > 0 {
                    neighbours[0] = labels[[row - 1, col - 1]];
                }
                neighbours[1] = labels[[row - 1, col]];
                if col + 1 < w {
                    neighbours[2] = labels[[row - 1, col + 1]];
                }
            }
            if col > 0 {
                neighbours[3] = labels[[row, col - 1]];
            }

            let smallest = neighbours.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    // New label.
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(smallest) => {
                    labels[[row, col]] = smallest;
                    for &other in neighbours.iter().filter(|&&l| l > 0 && l != smallest) {
                        union(&mut parent, smallest, other);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Root -> compact label, assigned when a root is first seen in raster order.
    let mut compact = vec![0u32; next_label as usize];
    let mut components: Vec<ComponentStats> = Vec::new();

    // Pass 2: resolve labels and collect stats.
    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize] as usize;
            if compact[root] == 0 {
                components.push(ComponentStats {
                    label: components.len() as u32 + 1,
                    area: 0,
                    bbox: (row, row, col, col),
                    first_pixel: (row, col),
                    sum_col: 0.0,
                    sum_row: 0.0,
                });
                compact[root] = components.len() as u32;
            }
            let label = compact[root];
            labels[[row, col]] = label;

            let entry = &mut components[label as usize - 1];
            entry.area += 1;
            entry.sum_col += col as f64;
            entry.sum_row += row as f64;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    LabeledComponents { labels, components }
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
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
    fn test_diagonal_pixels_are_one_component() {
        let mask = mask_from(&["#...", ".#..", "..#.", "...#"]);
        let labeled = connected_components(&mask);
        assert_eq!(labeled.components.len(), 1);
        assert_eq!(labeled.components[0].area, 4);
    }

    #[test]
    fn test_u_shape_merges_through_union() {
        let mask = mask_from(&["#..#", "#..#", "####"]);
        let labeled = connected_components(&mask);
        assert_eq!(labeled.components.len(), 1);
        assert_eq!(labeled.components[0].area, 8);
        assert_eq!(labeled.labels[[0, 3]], labeled.labels[[0, 0]]);
    }

    #[test]
    fn test_components_in_raster_order() {
        let mask = mask_from(&["...##", ".....", "##...", "##..."]);
        let labeled = connected_components(&mask);
        assert_eq!(labeled.components.len(), 2);
        assert_eq!(labeled.components[0].first_pixel, (0, 3));
        assert_eq!(labeled.components[1].first_pixel, (2, 0));
        assert_eq!(labeled.components[1].area, 4);
        assert_eq!(labeled.components[1].bbox, (2, 3, 0, 1));
        assert_eq!(labeled.labels[[3, 1]], 2);
    }

    #[test]
    fn test_moments() {
        let mask = mask_from(&["##", "##"]);
        let c = &connected_components(&mask).components[0];
        assert_eq!(c.sum_col / c.area as f64, 0.5);
        assert_eq!(c.sum_row / c.area as f64, 0.5);
    }

    #[test]
    fn test_empty_mask() {
        let mask = Array2::from_elem((0, 0), false);
        assert!(connected_components(&mask).components.is_empty());
    }
}

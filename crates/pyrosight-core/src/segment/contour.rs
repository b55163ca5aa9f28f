use ndarray::Array2;

/// Moore neighbourhood as (d_row, d_col), clockwise on screen starting east.
const MOORE: [(i64, i64); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

/// Trace the outer boundary of the component carrying `label`.
///
/// `start` must be the component's first pixel in raster order, which is
/// always on the outer boundary with its west neighbour outside the region.
/// Returns (row, col) pixels in clockwise order beginning at `start`; a
/// single-pixel region yields just `[start]`.
pub fn trace_outer_boundary(
    labels: &Array2<u32>,
    label: u32,
    start: (usize, usize),
    area: usize,
) -> Vec<(usize, usize)> {
    let start = (start.0 as i64, start.1 as i64);
    let inside = |(row, col): (i64, i64)| -> bool {
        let (h, w) = labels.dim();
        row >= 0
            && col >= 0
            && (row as usize) < h
            && (col as usize) < w
            && labels[[row as usize, col as usize]] == label
    };

    let mut boundary = vec![to_pixel(start)];
    let Some((second, mut back)) = step(start, (start.0, start.1 - 1), &inside) else {
        return boundary;
    };

    let mut current = second;
    boundary.push(to_pixel(second));

    // A closed outer trace visits each boundary pixel at most four times.
    let max_steps = 4 * area + 8;
    for _ in 0..max_steps {
        let Some((next, next_back)) = step(current, back, &inside) else {
            break;
        };
        if current == start && next == second {
            break;
        }
        boundary.push(to_pixel(next));
        current = next;
        back = next_back;
    }

    if boundary.len() > 1 && boundary.last() == Some(&to_pixel(start)) {
        boundary.pop();
    }
    boundary
}

/// One Moore-tracing step: scan clockwise around `current` starting just after
/// `back` and return the first region pixel with the background pixel examined
/// before it.
fn step(
    current: (i64, i64),
    back: (i64, i64),
    inside: &impl Fn((i64, i64)) -> bool,
) -> Option<((i64, i64), (i64, i64))> {
    let offset = (back.0 - current.0, back.1 - current.1);
    let back_dir = MOORE.iter().position(|&d| d == offset)?;

    let mut previous = back;
    for k in 1..=8 {
        let (dr, dc) = MOORE[(back_dir + k) % 8];
        let candidate = (current.0 + dr, current.1 + dc);
        if inside(candidate) {
            return Some((candidate, previous));
        }
        previous = candidate;
    }
    None
}

fn to_pixel(p: (i64, i64)) -> (usize, usize) {
    (p.0 as usize, p.1 as usize)
}

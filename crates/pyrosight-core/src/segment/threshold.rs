use ndarray::Array2;

/// Binary mask of samples at or above `threshold`.
///
/// NaN samples compare false and therefore never count as hot.
pub fn threshold_mask(data: &Array2<f32>, threshold: f32) -> Array2<bool> {
    data.mapv(|v| v >= threshold)
}

/// Maximum sample among pixels carrying `label`, scanning only `bbox`
/// `(min_row, max_row, min_col, max_col)`.
///
/// Returns `None` when no non-NaN sample carries the label.
pub fn peak_in_label(
    data: &Array2<f32>,
    labels: &Array2<u32>,
    label: u32,
    bbox: (usize, usize, usize, usize),
) -> Option<f32> {
    let (min_row, max_row, min_col, max_col) = bbox;
    let mut peak: Option<f32> = None;
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if labels[[row, col]] != label {
                continue;
            }
            let v = data[[row, col]];
            if v.is_nan() {
                continue;
            }
            peak = Some(peak.map_or(v, |p| p.max(v)));
        }
    }
    peak
}

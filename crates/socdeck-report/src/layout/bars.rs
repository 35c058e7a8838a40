use super::geometry::Rect;

/// Scale each value to `value / max(values) * extent`.
///
/// The maximum is taken over this dataset only. Values that are zero,
/// negative or not finite scale to `0.0`, as does every value when the
/// dataset has no positive maximum.
#[must_use]
pub fn scale_bars(values: &[f64], extent: f64) -> Vec<f64> {
    let max = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    values
        .iter()
        .map(|&v| {
            if max <= 0.0 || !v.is_finite() || v <= 0.0 {
                0.0
            } else {
                v / max * extent
            }
        })
        .collect()
}

/// Bottom-aligned vertical bars, one per value, evenly spaced in `area`.
///
/// Bars for non-positive values have zero height and should not be drawn.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bar_rects(area: Rect, values: &[f64], gap: f64) -> Vec<Rect> {
    if values.is_empty() {
        return Vec::new();
    }
    let n = values.len() as f64;
    let bar_w = ((area.w - gap * (n - 1.0)) / n).max(0.0);
    scale_bars(values, area.h)
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
            let x = area.x + i as f64 * (bar_w + gap);
            Rect::new(x, area.bottom() - h, bar_w, h)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scales_relative_to_dataset_max() {
        let scaled = scale_bars(&[50.0, 100.0, 25.0], 200.0);
        assert_eq!(scaled, vec![100.0, 200.0, 50.0]);
    }

    #[test]
    fn max_is_recomputed_per_dataset() {
        assert_eq!(scale_bars(&[1.0, 2.0], 10.0), vec![5.0, 10.0]);
        assert_eq!(scale_bars(&[1000.0, 2000.0], 10.0), vec![5.0, 10.0]);
    }

    #[test]
    fn non_positive_values_render_no_bar() {
        let scaled = scale_bars(&[-5.0, 0.0, 10.0, f64::NAN], 100.0);
        assert_eq!(scaled, vec![0.0, 0.0, 100.0, 0.0]);
    }

    #[test]
    fn all_zero_dataset_renders_nothing() {
        assert_eq!(scale_bars(&[0.0, 0.0, 0.0], 100.0), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn bar_rects_are_bottom_aligned() {
        let rects = bar_rects(Rect::new(0.0, 0.0, 100.0, 50.0), &[1.0, 2.0], 20.0);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0], Rect::new(0.0, 25.0, 40.0, 25.0));
        assert_eq!(rects[1], Rect::new(60.0, 0.0, 40.0, 50.0));
    }
}

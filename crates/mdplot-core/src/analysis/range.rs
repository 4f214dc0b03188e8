use nalgebra::DMatrix;

/// Value range used when every pooled entry is zero or nothing was pooled,
/// so diverging color scales keep a visible span.
const FALLBACK_SPAN: f64 = 0.1;

/// Smallest and largest finite entries of a matrix, or `None` when there
/// are no finite entries.
pub fn finite_range(matrix: &DMatrix<f64>) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in matrix.iter().copied().filter(|v| v.is_finite()) {
        min = min.min(value);
        max = max.max(value);
    }
    (min <= max).then_some((min, max))
}

/// Color range shared by a family of matrices, symmetric around zero.
///
/// All finite entries are pooled, the `lower_pct` and `upper_pct`
/// percentiles are taken to shave off outliers, and the larger magnitude of
/// the two defines the half-width of the returned `(-vmax, vmax)` range.
/// Matrices whose entries are all zero fall back to a small fixed span;
/// an empty pool yields `None`.
pub fn pooled_symmetric_range<'a, I>(
    matrices: I,
    lower_pct: f64,
    upper_pct: f64,
) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a DMatrix<f64>>,
{
    let mut pool: Vec<f64> = matrices
        .into_iter()
        .flat_map(|matrix| matrix.iter().copied())
        .filter(|v| v.is_finite())
        .collect();
    if pool.is_empty() {
        return None;
    }
    pool.sort_by(f64::total_cmp);

    let low = percentile(&pool, lower_pct);
    let high = percentile(&pool, upper_pct);
    let vmax = low.abs().max(high.abs());
    if vmax > 0.0 {
        Some((-vmax, vmax))
    } else {
        Some((-FALLBACK_SPAN, FALLBACK_SPAN))
    }
}

/// Linearly interpolated percentile of an ascending-sorted slice.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let last = sorted.len() - 1;
    let rank = (pct / 100.0 * last as f64).clamp(0.0, last as f64);
    let below = rank.floor() as usize;
    let above = (below + 1).min(last);
    let fraction = rank - below as f64;
    sorted[below] + fraction * (sorted[above] - sorted[below])
}

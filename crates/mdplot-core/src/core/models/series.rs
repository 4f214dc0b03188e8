/// Tabular numeric data read from an XVG file, one `Vec<f64>` per data row.
///
/// Every stored row has exactly `columns` entries. The first column is
/// conventionally the time axis, but nothing here depends on that.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    columns: usize,
    rows: Vec<Vec<f64>>,
}

impl TimeSeries {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub(crate) fn push_row(&mut self, row: Vec<f64>) {
        debug_assert_eq!(row.len(), self.columns);
        self.rows.push(row);
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// `(x, y)` pairs built from the first two columns.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.rows
            .iter()
            .filter_map(|row| Some((*row.first()?, *row.get(1)?)))
    }

    /// Values of a single column, in row order.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().filter_map(move |row| row.get(index).copied())
    }

    /// Smallest and largest finite values of a column, or `None` when the
    /// column has no finite entries.
    pub fn column_range(&self, index: usize) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for value in self.column(index).filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
        (min <= max).then_some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TimeSeries {
        let mut series = TimeSeries::new(2);
        series.push_row(vec![0.0, 0.2]);
        series.push_row(vec![1.0, 0.4]);
        series.push_row(vec![2.0, 0.3]);
        series
    }

    #[test]
    fn points_pair_first_two_columns() {
        let series = sample();
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(0.0, 0.2), (1.0, 0.4), (2.0, 0.3)]);
    }

    #[test]
    fn column_range_covers_min_and_max() {
        let series = sample();
        assert_eq!(series.column_range(0), Some((0.0, 2.0)));
        assert_eq!(series.column_range(1), Some((0.2, 0.4)));
    }

    #[test]
    fn column_range_ignores_non_finite_values() {
        let mut series = TimeSeries::new(2);
        series.push_row(vec![0.0, f64::NAN]);
        series.push_row(vec![1.0, 0.5]);
        series.push_row(vec![2.0, f64::INFINITY]);
        assert_eq!(series.column_range(1), Some((0.5, 0.5)));
    }

    #[test]
    fn column_range_is_none_for_empty_series() {
        let series = TimeSeries::new(2);
        assert!(series.is_empty());
        assert_eq!(series.column_range(0), None);
    }

    #[test]
    fn column_out_of_bounds_yields_nothing() {
        let series = sample();
        assert_eq!(series.column(5).count(), 0);
    }
}

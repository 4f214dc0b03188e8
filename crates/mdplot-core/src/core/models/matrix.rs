use nalgebra::DMatrix;
use std::collections::HashMap;

/// The four integers declared in an XPM dimension header:
/// width, height, number of colors, and characters per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpmHeader {
    pub width: usize,
    pub height: usize,
    pub ncolors: usize,
    pub chars_per_pixel: usize,
}

/// Maps single-character pixel codes to the numeric values carried in the
/// legend comments of a GROMACS XPM file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Legend {
    entries: HashMap<char, f64>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a code. A code defined twice keeps its last value.
    pub fn insert(&mut self, code: char, value: f64) {
        self.entries.insert(code, value);
    }

    /// The numeric value for a pixel code. Codes absent from the legend
    /// decode to `0.0`.
    pub fn value_of(&self, code: char) -> f64 {
        self.entries.get(&code).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A numeric matrix decoded from an XPM file.
///
/// `values` holds one row per successfully decoded pixel row, in file order.
/// Rows whose decoded length disagreed with the declared width are dropped
/// during parsing and only show up in [`skipped_rows`](Self::skipped_rows),
/// so the stored matrix may be shorter than the header promises.
#[derive(Debug, Clone, PartialEq)]
pub struct XpmMatrix {
    values: DMatrix<f64>,
    header: XpmHeader,
    legend_size: usize,
    skipped_rows: usize,
}

impl XpmMatrix {
    pub(crate) fn new(
        values: DMatrix<f64>,
        header: XpmHeader,
        legend_size: usize,
        skipped_rows: usize,
    ) -> Self {
        Self {
            values,
            header,
            legend_size,
            skipped_rows,
        }
    }

    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    pub fn into_values(self) -> DMatrix<f64> {
        self.values
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn header(&self) -> &XpmHeader {
        &self.header
    }

    /// Number of distinct legend codes that carried a parseable numeric label.
    pub fn legend_size(&self) -> usize {
        self.legend_size
    }

    /// Number of pixel rows dropped because their length did not match the
    /// declared width.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Whether every declared row was decoded at its declared width.
    pub fn is_complete(&self) -> bool {
        self.skipped_rows == 0 && self.values.nrows() == self.header.height
    }
}

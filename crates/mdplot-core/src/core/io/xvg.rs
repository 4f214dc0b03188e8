use crate::core::io::traits::AnalysisFile;
use crate::core::models::series::TimeSeries;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Time plus one observable, the layout of almost every GROMACS .xvg file.
pub const DEFAULT_COLUMNS: usize = 2;

/// Grace directives (`@`), comments (`#`) and dataset separators (`&`).
const COMMENT_PREFIXES: [char; 3] = ['@', '#', '&'];

#[derive(Debug, Error)]
pub enum XvgError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reader for GROMACS XVG time-series files.
///
/// Parsing is lenient by design: annotation lines are filtered out, tokens
/// that fail to parse as floats are dropped, and a row is emitted only when
/// enough numeric tokens remain to fill every requested column. A file with
/// no usable rows parses to an empty series rather than an error.
pub struct XvgFile;

impl XvgFile {
    /// Reads the first `columns` numeric columns of every data row.
    ///
    /// Requests for fewer than [`DEFAULT_COLUMNS`] columns are widened to
    /// that minimum, matching the two-column layout the format guarantees.
    pub fn read_columns_from(
        reader: &mut impl BufRead,
        columns: usize,
    ) -> Result<TimeSeries, XvgError> {
        let columns = columns.max(DEFAULT_COLUMNS);
        let mut series = TimeSeries::new(columns);
        for line in reader.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with(&COMMENT_PREFIXES[..]) {
                continue;
            }
            let numbers: Vec<f64> = trimmed
                .split_whitespace()
                .filter_map(|token| token.parse().ok())
                .collect();
            if numbers.len() < columns {
                continue;
            }
            series.push_row(numbers[..columns].to_vec());
        }
        Ok(series)
    }

    /// Reads the first `columns` numeric columns from a file path.
    pub fn read_columns_from_path<P: AsRef<Path>>(
        path: P,
        columns: usize,
    ) -> Result<TimeSeries, XvgError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_columns_from(&mut reader, columns)
    }
}

impl AnalysisFile for XvgFile {
    type Data = TimeSeries;
    type Error = XvgError;

    fn read_from(reader: &mut impl BufRead) -> Result<TimeSeries, XvgError> {
        Self::read_columns_from(reader, DEFAULT_COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(content: &str) -> TimeSeries {
        XvgFile::read_from(&mut content.as_bytes()).unwrap()
    }

    #[test]
    fn skips_annotations_and_unparseable_lines() {
        let content = "@ title \"RMSD\"\n# comment\n1.0 2.0\nbad line\n3.0 4.0\n";
        let series = parse(content);
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn skips_dataset_separators_and_blank_lines() {
        let content = "0.0 1.0\n&\n\n   \n0.5 2.0\n";
        let series = parse(content);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn drops_rows_with_too_few_numeric_tokens() {
        let content = "1.0\n2.0 3.0\n";
        let series = parse(content);
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(2.0, 3.0)]);
    }

    #[test]
    fn non_numeric_tokens_within_a_row_are_dropped() {
        let content = "1.0 abc 2.0\n";
        let series = parse(content);
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![(1.0, 2.0)]);
    }

    #[test]
    fn extra_columns_are_truncated_to_request() {
        let content = "1.0 2.0 3.0 4.0\n";
        let series = parse(content);
        assert_eq!(series.columns(), 2);
        assert_eq!(series.rows().next().unwrap(), &[1.0, 2.0][..]);
    }

    #[test]
    fn reads_requested_number_of_columns() {
        let content = "0.0 1.0 2.0\n1.0 1.5 2.5\nshort 1.0\n";
        let series =
            XvgFile::read_columns_from(&mut content.as_bytes(), 3).unwrap();
        assert_eq!(series.columns(), 3);
        assert_eq!(series.len(), 2);
        assert_eq!(series.rows().next().unwrap(), &[0.0, 1.0, 2.0][..]);
    }

    #[test]
    fn column_requests_below_two_are_widened() {
        let content = "1.0 2.0\n3.0\n";
        let series = XvgFile::read_columns_from(&mut content.as_bytes(), 1).unwrap();
        assert_eq!(series.columns(), 2);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn empty_and_comment_only_files_parse_to_empty_series() {
        assert!(parse("").is_empty());
        assert!(parse("@ xaxis label \"Time\"\n# generated by gmx rms\n").is_empty());
    }

    #[test]
    fn read_from_path_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rmsd.xvg");
        fs::write(&path, "@ yaxis label \"RMSD\"\n0.0 0.1\n1.0 0.2\n").unwrap();
        let series = XvgFile::read_from_path(&path).unwrap();
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = XvgFile::read_from_path(dir.path().join("absent.xvg"));
        assert!(matches!(result, Err(XvgError::Io(_))));
    }
}

use crate::core::io::traits::AnalysisFile;
use crate::core::models::matrix::{Legend, XpmHeader, XpmMatrix};
use nalgebra::DMatrix;
use std::io::{self, BufRead};
use thiserror::Error;

/// GROMACS writes the dimension header near the top of the file; scanning
/// further only risks misreading a data row as a header.
const HEADER_SCAN_LINES: usize = 30;

#[derive(Debug, Error)]
pub enum XpmError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("No dimension header found in the first {HEADER_SCAN_LINES} lines")]
    DimensionsNotFound,
    #[error("Legend defines no codes with numeric labels")]
    EmptyLegend,
    #[error("No data rows matched the declared width")]
    NoDataRows,
}

/// Content of the first quoted span in a line, if any.
fn quoted_span(line: &str) -> Option<&str> {
    let rest = &line[line.find('"')? + 1..];
    Some(&rest[..rest.find('"')?])
}

/// Matches a legend line of the form `"A  c #0000FF " /* "-0.0143" */,`.
///
/// The pixel code is the first character of the quoted span, the numeric
/// label lives in the trailing comment. Entries whose label does not parse
/// as a float (axis titles, secondary-structure names) are ignored.
fn legend_entry(line: &str) -> Option<(char, f64)> {
    let rest = line.trim_start().strip_prefix('"')?;
    let close = rest.find('"')?;
    let (interior, tail) = (&rest[..close], &rest[close + 1..]);

    let code = interior.chars().next()?;
    let after_code = &interior[code.len_utf8()..];
    if !after_code.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }
    let mut fields = after_code.split_whitespace();
    if fields.next()? != "c" {
        return None;
    }
    fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    let comment = tail.split_once("/*")?.1;
    let value = quoted_span(comment)?.trim().parse().ok()?;
    Some((code, value))
}

fn find_header(lines: &[String]) -> Option<(XpmHeader, usize)> {
    for (index, line) in lines.iter().take(HEADER_SCAN_LINES).enumerate() {
        let Some(span) = quoted_span(line) else {
            continue;
        };
        let fields: Vec<&str> = span.split_whitespace().collect();
        if fields.len() != 4 {
            continue;
        }
        let Some(numbers) = fields
            .iter()
            .map(|field| field.parse::<usize>().ok())
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };
        if numbers[0] == 0 || numbers[1] == 0 {
            continue;
        }
        let header = XpmHeader {
            width: numbers[0],
            height: numbers[1],
            ncolors: numbers[2],
            chars_per_pixel: numbers[3],
        };
        return Some((header, index));
    }
    None
}

/// Reader for GROMACS XPM matrix files (free-energy probability surfaces,
/// covariance matrices, secondary-structure maps).
pub struct XpmFile;

impl XpmFile {
    fn parse_lines(lines: &[String]) -> Result<XpmMatrix, XpmError> {
        let (header, header_index) = find_header(lines).ok_or(XpmError::DimensionsNotFound)?;

        let mut legend = Legend::new();
        for line in lines {
            if let Some((code, value)) = legend_entry(line) {
                legend.insert(code, value);
            }
        }
        if legend.is_empty() {
            return Err(XpmError::EmptyLegend);
        }

        // Data rows are quoted lines carrying neither a color assignment
        // nor a comment. Rows are decoded until the declared height is
        // reached; rows of the wrong width are dropped and counted.
        let mut values = Vec::new();
        let mut kept = 0;
        let mut skipped = 0;
        for line in &lines[header_index + 1..] {
            if kept == header.height {
                break;
            }
            let trimmed = line.trim();
            if !trimmed.starts_with('"') || trimmed.contains(" c ") || trimmed.contains("/*") {
                continue;
            }
            let Some(span) = quoted_span(trimmed) else {
                continue;
            };
            if span.chars().count() != header.width {
                skipped += 1;
                continue;
            }
            values.extend(span.chars().map(|code| legend.value_of(code)));
            kept += 1;
        }
        if kept == 0 {
            return Err(XpmError::NoDataRows);
        }

        let matrix = DMatrix::from_row_slice(kept, header.width, &values);
        Ok(XpmMatrix::new(matrix, header, legend.len(), skipped))
    }
}

impl AnalysisFile for XpmFile {
    type Data = XpmMatrix;
    type Error = XpmError;

    fn read_from(reader: &mut impl BufRead) -> Result<XpmMatrix, XpmError> {
        let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
        Self::parse_lines(&lines)
    }
}

use crate::cli::{InspectArgs, InspectFormat};
use crate::error::{CliError, Result};
use mdplot::{
    analysis::range::finite_range,
    core::io::{traits::AnalysisFile, xpm::XpmFile, xvg::XvgFile},
};
use std::path::Path;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let format = resolve_format(&args)?;
    info!("Inspecting {:?} as {:?}.", args.file, format);

    match format {
        InspectFormat::Xvg => inspect_xvg(&args.file, args.columns),
        InspectFormat::Xpm => inspect_xpm(&args.file),
    }
}

fn resolve_format(args: &InspectArgs) -> Result<InspectFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }
    let extension = args.file.extension().and_then(|e| e.to_str());
    match extension {
        Some(ext) if ext.eq_ignore_ascii_case("xvg") => Ok(InspectFormat::Xvg),
        Some(ext) if ext.eq_ignore_ascii_case("xpm") => Ok(InspectFormat::Xpm),
        _ => Err(CliError::Argument(format!(
            "Cannot infer the format of '{}'; pass --format xvg or --format xpm.",
            args.file.display()
        ))),
    }
}

fn inspect_xvg(path: &Path, columns: usize) -> Result<()> {
    let series =
        XvgFile::read_columns_from_path(path, columns).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

    println!("XVG time series: {}", path.display());
    println!("  rows:    {}", series.len());
    println!("  columns: {}", series.columns());
    for index in 0..series.columns() {
        match series.column_range(index) {
            Some((min, max)) => println!("  column {}: {:.4} to {:.4}", index, min, max),
            None => println!("  column {}: no finite values", index),
        }
    }
    Ok(())
}

fn inspect_xpm(path: &Path) -> Result<()> {
    let matrix = XpmFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    let header = matrix.header();
    println!("XPM matrix: {}", path.display());
    println!(
        "  declared size: {} x {} ({} colors, {} chars per pixel)",
        header.width, header.height, header.ncolors, header.chars_per_pixel
    );
    println!(
        "  decoded rows:  {} ({} skipped)",
        matrix.nrows(),
        matrix.skipped_rows()
    );
    println!("  legend codes:  {}", matrix.legend_size());
    match finite_range(matrix.values()) {
        Some((min, max)) => println!("  value range:   {:.4} to {:.4}", min, max),
        None => println!("  value range:   no finite values"),
    }
    if !matrix.is_complete() {
        println!("Warning: the decoded matrix is smaller than its header declares.");
    }
    Ok(())
}

use super::config::{FigureConfig, FigureKind, PanelSpec, SeriesInput};
use super::report::{FigureReport, PanelOutcome, PanelReport, PlaceholderReason};
use crate::analysis::fel::free_energy_landscape;
use crate::analysis::range::{finite_range, pooled_symmetric_range};
use crate::core::io::traits::AnalysisFile;
use crate::core::io::xpm::XpmFile;
use crate::core::io::xvg::XvgFile;
use crate::core::models::matrix::XpmMatrix;
use crate::core::models::series::TimeSeries;
use crate::progress::{Progress, ProgressReporter};
use crate::render::colormap::Colormap;
use crate::render::figure::{
    Figure, HeatmapPanel, Origin, PanelContent, PlaceholderPanel, RenderError, SeriesPanel, Trace,
    render_figure_file,
};
use crate::render::theme::{Theme, parse_hex_color};
use plotters::style::RGBColor;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir { path: String, source: io::Error },
}

/// Runs one figure from config to files on disk.
///
/// Inputs that cannot be loaded never abort the run: series traces are left
/// off their panel and matrix panels fall back to placeholders, so one bad
/// file still yields a complete figure. The returned report records what
/// each panel ended up showing and which files were written.
#[instrument(skip_all, name = "figure_workflow")]
pub fn run(
    config: &FigureConfig,
    theme: &Theme,
    reporter: &ProgressReporter,
) -> Result<FigureReport, WorkflowError> {
    // === Phase 1: Load and transform panel data ===
    reporter.report(Progress::FigureStart {
        title: config.title.clone(),
        total_panels: config.panels.len() as u64,
    });
    info!(
        kind = ?config.kind,
        panels = config.panels.len(),
        "Preparing figure panels."
    );

    let (panels, panel_reports) = match config.kind {
        FigureKind::Series => prepare_series_panels(config, theme, reporter),
        FigureKind::Landscape => prepare_landscape_panels(config, reporter),
        FigureKind::Correlation => prepare_correlation_panels(config, reporter),
    };

    // === Phase 2: Assemble and write the figure ===
    let colormap = Colormap::by_name(&config.colormap).unwrap_or_else(|| {
        warn!(name = %config.colormap, "Unknown colormap, falling back to viridis.");
        Colormap::VIRIDIS
    });
    let figure = Figure {
        title: config.title.clone(),
        panels,
        columns: config.columns,
        x_label: config.x_label.clone(),
        y_label: config.y_label.clone(),
        value_label: config.value_label.clone(),
        colormap,
        show_legend: config.show_legend,
    };

    ensure_output_dir(&config.output_stem)?;
    let mut outputs = Vec::with_capacity(config.formats.len());
    for format in &config.formats {
        let path = config.output_stem.with_extension(format.extension());
        reporter.report(Progress::Note(format!("Writing {}", path.display())));
        render_figure_file(&figure, theme, &path, *format, config.size)?;
        info!(path = %path.display(), "Figure written.");
        outputs.push(path);
    }
    reporter.report(Progress::FigureFinish);

    let report = FigureReport {
        outputs,
        panels: panel_reports,
    };
    info!(
        outputs = report.outputs.len(),
        placeholders = report.placeholder_count(),
        "Figure workflow finished."
    );
    Ok(report)
}

fn prepare_series_panels(
    config: &FigureConfig,
    theme: &Theme,
    reporter: &ProgressReporter,
) -> (Vec<PanelContent>, Vec<PanelReport>) {
    let mut panels = Vec::with_capacity(config.panels.len());
    let mut reports = Vec::with_capacity(config.panels.len());
    // Palette position runs across the whole figure, not per panel, so
    // default colors stay distinct between neighbouring panels.
    let mut trace_index = 0;

    for spec in &config.panels {
        reporter.report(Progress::PanelStart {
            label: spec.label.clone(),
        });

        let mut traces = Vec::new();
        let mut missing_inputs = Vec::new();
        let mut points = 0;
        for input in &spec.inputs {
            let color = resolve_trace_color(input, theme, trace_index);
            trace_index += 1;
            match load_series(input, config.series_columns) {
                Some(series) => {
                    points += series.len();
                    traces.push(Trace {
                        name: trace_name(input),
                        color,
                        series,
                    });
                }
                None => missing_inputs.push(input.path.clone()),
            }
        }

        reports.push(PanelReport {
            label: spec.label.clone(),
            outcome: PanelOutcome::Series {
                traces: traces.len(),
                points,
                missing_inputs,
            },
        });
        panels.push(PanelContent::Series(SeriesPanel {
            label: spec.label.clone(),
            traces,
        }));
        reporter.report(Progress::PanelFinish);
    }
    (panels, reports)
}

fn prepare_landscape_panels(
    config: &FigureConfig,
    reporter: &ProgressReporter,
) -> (Vec<PanelContent>, Vec<PanelReport>) {
    let mut panels = Vec::with_capacity(config.panels.len());
    let mut reports = Vec::with_capacity(config.panels.len());

    for spec in &config.panels {
        reporter.report(Progress::PanelStart {
            label: spec.label.clone(),
        });
        let path = &spec.inputs[0].path;
        let prepared = load_matrix(path, config.expected_size).and_then(|matrix| {
            let skipped_rows = matrix.skipped_rows();
            free_energy_landscape(matrix.values(), config.kt)
                .map(|energy| (energy, skipped_rows))
                .map_err(|error| {
                    warn!(path = %path.display(), %error, "Free-energy transform failed.");
                    PlaceholderReason::DegenerateLandscape
                })
        });
        match prepared {
            Ok((energy, skipped_rows)) => {
                let range = finite_range(&energy).unwrap_or((0.0, 1.0));
                reports.push(PanelReport {
                    label: spec.label.clone(),
                    outcome: PanelOutcome::Heatmap {
                        rows: energy.nrows(),
                        cols: energy.ncols(),
                        skipped_rows,
                        value_range: range,
                    },
                });
                panels.push(PanelContent::Heatmap(HeatmapPanel {
                    label: spec.label.clone(),
                    values: energy,
                    range,
                    origin: Origin::Lower,
                }));
            }
            Err(reason) => push_placeholder(spec, reason, &mut panels, &mut reports),
        }
        reporter.report(Progress::PanelFinish);
    }
    (panels, reports)
}

fn prepare_correlation_panels(
    config: &FigureConfig,
    reporter: &ProgressReporter,
) -> (Vec<PanelContent>, Vec<PanelReport>) {
    // Every matrix is parsed up front so the color scale can be shared
    // across all panels.
    let loaded: Vec<Result<XpmMatrix, PlaceholderReason>> = config
        .panels
        .iter()
        .map(|spec| {
            reporter.report(Progress::PanelStart {
                label: spec.label.clone(),
            });
            let result = load_matrix(&spec.inputs[0].path, config.expected_size);
            reporter.report(Progress::PanelFinish);
            result
        })
        .collect();

    let (lower, upper) = config.percentile_clip;
    let shared_range = pooled_symmetric_range(
        loaded
            .iter()
            .filter_map(|result| result.as_ref().ok())
            .map(XpmMatrix::values),
        lower,
        upper,
    )
    .unwrap_or((-0.1, 0.1));
    info!(
        lower = shared_range.0,
        upper = shared_range.1,
        "Using shared symmetric color scale."
    );

    let mut panels = Vec::with_capacity(config.panels.len());
    let mut reports = Vec::with_capacity(config.panels.len());
    for (spec, result) in config.panels.iter().zip(loaded) {
        match result {
            Ok(matrix) => {
                reports.push(PanelReport {
                    label: spec.label.clone(),
                    outcome: PanelOutcome::Heatmap {
                        rows: matrix.nrows(),
                        cols: matrix.ncols(),
                        skipped_rows: matrix.skipped_rows(),
                        value_range: shared_range,
                    },
                });
                panels.push(PanelContent::Heatmap(HeatmapPanel {
                    label: spec.label.clone(),
                    values: matrix.into_values(),
                    range: shared_range,
                    origin: Origin::Upper,
                }));
            }
            Err(reason) => push_placeholder(spec, reason, &mut panels, &mut reports),
        }
    }
    (panels, reports)
}

fn push_placeholder(
    spec: &PanelSpec,
    reason: PlaceholderReason,
    panels: &mut Vec<PanelContent>,
    reports: &mut Vec<PanelReport>,
) {
    reports.push(PanelReport {
        label: spec.label.clone(),
        outcome: PanelOutcome::Placeholder { reason },
    });
    panels.push(PanelContent::Placeholder(PlaceholderPanel {
        label: spec.label.clone(),
        message: reason.message().to_string(),
    }));
}

fn load_series(input: &SeriesInput, columns: usize) -> Option<TimeSeries> {
    if !input.path.exists() {
        warn!(path = %input.path.display(), "Series input not found, skipping trace.");
        return None;
    }
    match XvgFile::read_columns_from_path(&input.path, columns) {
        Ok(series) => Some(series),
        Err(error) => {
            warn!(path = %input.path.display(), %error, "Failed to read series input, skipping trace.");
            None
        }
    }
}

fn load_matrix(
    path: &Path,
    expected_size: Option<(usize, usize)>,
) -> Result<XpmMatrix, PlaceholderReason> {
    if !path.exists() {
        warn!(path = %path.display(), "Matrix input not found.");
        return Err(PlaceholderReason::MissingInput);
    }
    match XpmFile::read_from_path(path) {
        Ok(matrix) => {
            if matrix.skipped_rows() > 0 {
                warn!(
                    path = %path.display(),
                    skipped = matrix.skipped_rows(),
                    "Matrix rows with unexpected width were skipped."
                );
            }
            if let Some((rows, cols)) = expected_size {
                if (matrix.nrows(), matrix.ncols()) != (rows, cols) {
                    warn!(
                        path = %path.display(),
                        expected_rows = rows,
                        expected_cols = cols,
                        rows = matrix.nrows(),
                        cols = matrix.ncols(),
                        "Decoded matrix size does not match the configured expectation."
                    );
                }
            }
            Ok(matrix)
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "Failed to parse matrix input.");
            Err(PlaceholderReason::UnreadableInput)
        }
    }
}

fn trace_name(input: &SeriesInput) -> String {
    if let Some(name) = &input.name {
        return name.clone();
    }
    input
        .path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "series".to_string())
}

fn resolve_trace_color(input: &SeriesInput, theme: &Theme, index: usize) -> RGBColor {
    if let Some(value) = &input.color {
        if let Some(color) = parse_hex_color(value) {
            return color;
        }
        warn!(
            color = %value,
            path = %input.path.display(),
            "Unparseable trace color, using the theme palette."
        );
    }
    theme.palette_color(index)
}

fn ensure_output_dir(stem: &Path) -> Result<(), WorkflowError> {
    if let Some(parent) = stem.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| WorkflowError::OutputDir {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }
    }
    Ok(())
}

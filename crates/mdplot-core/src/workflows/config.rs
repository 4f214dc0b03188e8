use crate::analysis::fel::KT_300K;
use crate::render::colormap::Colormap;
use crate::render::figure::ImageFormat;
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

/// What a figure plots, which decides how panel inputs are interpreted.
///
/// - `Series`: each input is an XVG file drawn as one curve.
/// - `Landscape`: each panel holds one XPM probability matrix, transformed
///   into a free-energy surface.
/// - `Correlation`: each panel holds one XPM correlation matrix, drawn on a
///   color scale shared across the whole figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FigureKind {
    Series,
    Landscape,
    Correlation,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown figure kind '{0}' (expected 'series', 'landscape' or 'correlation')")]
pub struct ParseFigureKindError(String);

impl FromStr for FigureKind {
    type Err = ParseFigureKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "series" => Ok(FigureKind::Series),
            "landscape" => Ok(FigureKind::Landscape),
            "correlation" => Ok(FigureKind::Correlation),
            _ => Err(ParseFigureKindError(s.to_string())),
        }
    }
}

/// One data file feeding a panel. Name and color only apply to series
/// figures; matrix panels take their color from the figure colormap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SeriesInput {
    pub path: PathBuf,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PanelSpec {
    pub label: String,
    #[serde(rename = "input", default)]
    pub inputs: Vec<SeriesInput>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureConfig {
    pub kind: FigureKind,
    pub title: String,
    pub panels: Vec<PanelSpec>,
    pub output_stem: PathBuf,
    pub formats: Vec<ImageFormat>,
    pub size: (u32, u32),
    pub columns: usize,
    pub x_label: String,
    pub y_label: String,
    pub value_label: String,
    pub colormap: String,
    pub kt: f64,
    pub percentile_clip: (f64, f64),
    pub series_columns: usize,
    pub show_legend: bool,
    /// Matrix shape (rows, cols) the input files are expected to decode to.
    /// When set, decoded matrices of a different shape are reported as a
    /// data-quality warning; they are still drawn.
    pub expected_size: Option<(usize, usize)>,
}

impl FigureConfig {
    pub fn builder() -> FigureConfigBuilder {
        FigureConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct FigureConfigBuilder {
    kind: Option<FigureKind>,
    title: Option<String>,
    panels: Option<Vec<PanelSpec>>,
    output_stem: Option<PathBuf>,
    formats: Option<Vec<ImageFormat>>,
    size: Option<(u32, u32)>,
    columns: Option<usize>,
    x_label: Option<String>,
    y_label: Option<String>,
    value_label: Option<String>,
    colormap: Option<String>,
    kt: Option<f64>,
    percentile_clip: Option<(f64, f64)>,
    series_columns: Option<usize>,
    show_legend: Option<bool>,
    expected_size: Option<(usize, usize)>,
}

impl FigureConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: FigureKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    pub fn panels(mut self, panels: Vec<PanelSpec>) -> Self {
        self.panels = Some(panels);
        self
    }

    pub fn output_stem(mut self, stem: PathBuf) -> Self {
        self.output_stem = Some(stem);
        self
    }

    pub fn formats(mut self, formats: Vec<ImageFormat>) -> Self {
        self.formats = Some(formats);
        self
    }

    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = Some(size);
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn x_label(mut self, label: String) -> Self {
        self.x_label = Some(label);
        self
    }

    pub fn y_label(mut self, label: String) -> Self {
        self.y_label = Some(label);
        self
    }

    pub fn value_label(mut self, label: String) -> Self {
        self.value_label = Some(label);
        self
    }

    pub fn colormap(mut self, name: String) -> Self {
        self.colormap = Some(name);
        self
    }

    pub fn kt(mut self, kt: f64) -> Self {
        self.kt = Some(kt);
        self
    }

    pub fn percentile_clip(mut self, clip: (f64, f64)) -> Self {
        self.percentile_clip = Some(clip);
        self
    }

    pub fn series_columns(mut self, columns: usize) -> Self {
        self.series_columns = Some(columns);
        self
    }

    pub fn show_legend(mut self, show: bool) -> Self {
        self.show_legend = Some(show);
        self
    }

    pub fn expected_size(mut self, size: (usize, usize)) -> Self {
        self.expected_size = Some(size);
        self
    }

    pub fn build(self) -> Result<FigureConfig, ConfigError> {
        let kind = self.kind.ok_or(ConfigError::MissingParameter("kind"))?;
        let config = FigureConfig {
            kind,
            title: self.title.ok_or(ConfigError::MissingParameter("title"))?,
            panels: self.panels.ok_or(ConfigError::MissingParameter("panel"))?,
            output_stem: self
                .output_stem
                .ok_or(ConfigError::MissingParameter("output"))?,
            formats: self.formats.unwrap_or_else(|| vec![ImageFormat::Png]),
            size: self.size.unwrap_or_else(|| default_size(kind)),
            columns: self.columns.unwrap_or(2),
            x_label: self
                .x_label
                .unwrap_or_else(|| default_axis_labels(kind).0.to_string()),
            y_label: self
                .y_label
                .unwrap_or_else(|| default_axis_labels(kind).1.to_string()),
            value_label: self
                .value_label
                .unwrap_or_else(|| default_value_label(kind).to_string()),
            colormap: self
                .colormap
                .unwrap_or_else(|| default_colormap(kind).to_string()),
            kt: self.kt.unwrap_or(KT_300K),
            percentile_clip: self.percentile_clip.unwrap_or((2.0, 98.0)),
            series_columns: self.series_columns.unwrap_or(2),
            show_legend: self.show_legend.unwrap_or(true),
            expected_size: self.expected_size,
        };
        validate(&config)?;
        Ok(config)
    }
}

fn default_size(kind: FigureKind) -> (u32, u32) {
    match kind {
        FigureKind::Series => (1600, 1200),
        FigureKind::Landscape | FigureKind::Correlation => (1400, 1000),
    }
}

fn default_axis_labels(kind: FigureKind) -> (&'static str, &'static str) {
    match kind {
        FigureKind::Series => ("Time (ns)", ""),
        FigureKind::Landscape => ("PC1", "PC2"),
        FigureKind::Correlation => ("Residue Index", "Residue Index"),
    }
}

fn default_value_label(kind: FigureKind) -> &'static str {
    match kind {
        FigureKind::Series => "",
        FigureKind::Landscape => "Free Energy (kJ/mol)",
        FigureKind::Correlation => "Covariance (nm²)",
    }
}

fn default_colormap(kind: FigureKind) -> &'static str {
    match kind {
        FigureKind::Correlation => "rdbu-r",
        FigureKind::Series | FigureKind::Landscape => "viridis",
    }
}

fn validate(config: &FigureConfig) -> Result<(), ConfigError> {
    if config.panels.is_empty() {
        return Err(ConfigError::InvalidParameter {
            parameter: "panel",
            reason: "at least one panel is required".to_string(),
        });
    }
    for panel in &config.panels {
        match config.kind {
            FigureKind::Series => {
                if panel.inputs.is_empty() {
                    return Err(ConfigError::InvalidParameter {
                        parameter: "panel",
                        reason: format!("panel '{}' declares no input files", panel.label),
                    });
                }
            }
            FigureKind::Landscape | FigureKind::Correlation => {
                if panel.inputs.len() != 1 {
                    return Err(ConfigError::InvalidParameter {
                        parameter: "panel",
                        reason: format!(
                            "panel '{}' must declare exactly one matrix file, found {}",
                            panel.label,
                            panel.inputs.len()
                        ),
                    });
                }
            }
        }
    }
    if config.formats.is_empty() {
        return Err(ConfigError::InvalidParameter {
            parameter: "formats",
            reason: "at least one output format is required".to_string(),
        });
    }
    if config.size.0 == 0 || config.size.1 == 0 {
        return Err(ConfigError::InvalidParameter {
            parameter: "size",
            reason: "width and height must be positive".to_string(),
        });
    }
    if config.columns == 0 {
        return Err(ConfigError::InvalidParameter {
            parameter: "columns",
            reason: "must be at least 1".to_string(),
        });
    }
    if !(config.kt.is_finite() && config.kt > 0.0) {
        return Err(ConfigError::InvalidParameter {
            parameter: "kt",
            reason: format!("must be a positive finite number, got {}", config.kt),
        });
    }
    let (lower, upper) = config.percentile_clip;
    if !(0.0..=100.0).contains(&lower) || !(0.0..=100.0).contains(&upper) || lower >= upper {
        return Err(ConfigError::InvalidParameter {
            parameter: "percentile_clip",
            reason: format!("expected 0 <= lower < upper <= 100, got ({lower}, {upper})"),
        });
    }
    if config.series_columns < 2 {
        return Err(ConfigError::InvalidParameter {
            parameter: "series_columns",
            reason: "at least two columns (x and y) are required".to_string(),
        });
    }
    if let Some((rows, cols)) = config.expected_size {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "expected_size",
                reason: "rows and columns must be positive".to_string(),
            });
        }
    }
    if Colormap::by_name(&config.colormap).is_none() {
        return Err(ConfigError::InvalidParameter {
            parameter: "colormap",
            reason: format!(
                "unknown colormap '{}' (available: {})",
                config.colormap,
                Colormap::names().collect::<Vec<_>>().join(", ")
            ),
        });
    }
    Ok(())
}

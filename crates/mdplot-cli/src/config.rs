use crate::cli::RenderArgs;
use crate::error::{CliError, Result};
use mdplot::render::figure::ImageFormat;
use mdplot::workflows::config::{FigureConfig, FigureKind, PanelSpec};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// The figure description as it appears in a TOML file, before CLI
/// overrides are applied and defaults are filled in.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartialFigureConfig {
    kind: Option<FigureKind>,
    title: Option<String>,
    #[serde(rename = "panel", default)]
    panels: Vec<PanelSpec>,
    output: Option<PathBuf>,
    formats: Option<Vec<ImageFormat>>,
    size: Option<[u32; 2]>,
    columns: Option<usize>,
    x_label: Option<String>,
    y_label: Option<String>,
    value_label: Option<String>,
    colormap: Option<String>,
    kt: Option<f64>,
    percentile_clip: Option<[f64; 2]>,
    series_columns: Option<usize>,
    show_legend: Option<bool>,
    expected_size: Option<[usize; 2]>,
}

impl PartialFigureConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading figure configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Folds CLI arguments over the file values and builds the final,
    /// validated configuration. CLI values win over `--set` pairs, which in
    /// turn win over the file.
    pub fn merge_with_cli(mut self, args: &RenderArgs) -> Result<FigureConfig> {
        self.apply_set_values(&args.set_values)?;

        let mut builder = FigureConfig::builder();
        if let Some(kind) = self.kind {
            builder = builder.kind(kind);
        }
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if !self.panels.is_empty() {
            builder = builder.panels(self.panels);
        }
        if let Some(output) = args.output.clone().or(self.output) {
            builder = builder.output_stem(output);
        }
        let formats = if args.format.is_empty() {
            self.formats
        } else {
            Some(parse_formats(&args.format)?)
        };
        if let Some(formats) = formats {
            builder = builder.formats(formats);
        }
        if let Some(size) = self.size {
            builder = builder.size((size[0], size[1]));
        }
        if let Some(columns) = self.columns {
            builder = builder.columns(columns);
        }
        if let Some(label) = self.x_label {
            builder = builder.x_label(label);
        }
        if let Some(label) = self.y_label {
            builder = builder.y_label(label);
        }
        if let Some(label) = self.value_label {
            builder = builder.value_label(label);
        }
        if let Some(colormap) = self.colormap {
            builder = builder.colormap(colormap);
        }
        if let Some(kt) = args.kt.or(self.kt) {
            builder = builder.kt(kt);
        }
        if let Some(clip) = self.percentile_clip {
            builder = builder.percentile_clip((clip[0], clip[1]));
        }
        if let Some(columns) = self.series_columns {
            builder = builder.series_columns(columns);
        }
        let show_legend = if args.no_legend {
            Some(false)
        } else {
            self.show_legend
        };
        if let Some(show) = show_legend {
            builder = builder.show_legend(show);
        }
        if let Some(size) = self.expected_size {
            builder = builder.expected_size((size[0], size[1]));
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "title" => self.title = Some(value.to_string()),
                "output" => self.output = Some(PathBuf::from(value)),
                "colormap" => self.colormap = Some(value.to_string()),
                "x-label" => self.x_label = Some(value.to_string()),
                "y-label" => self.y_label = Some(value.to_string()),
                "value-label" => self.value_label = Some(value.to_string()),
                "columns" => self.columns = Some(parse_set_value(key, value)?),
                "series-columns" => self.series_columns = Some(parse_set_value(key, value)?),
                "kt" => self.kt = Some(parse_set_value(key, value)?),
                "show-legend" => self.show_legend = Some(parse_set_value(key, value)?),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_set_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn parse_formats(values: &[String]) -> Result<Vec<ImageFormat>> {
    values
        .iter()
        .map(|value| {
            value
                .trim()
                .parse::<ImageFormat>()
                .map_err(|e| CliError::Argument(e.to_string()))
        })
        .collect()
}

use super::colormap::Colormap;
use super::heatmap_panel::draw_heatmap_panel;
use super::placeholder::draw_placeholder_panel;
use super::series_panel::draw_series_panel;
use super::theme::Theme;
use crate::core::models::series::TimeSeries;
use nalgebra::DMatrix;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Output encodings a figure can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown image format '{0}' (expected 'png' or 'svg')")]
pub struct ParseImageFormatError(String);

impl FromStr for ImageFormat {
    type Err = ParseImageFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(ParseImageFormatError(s.to_string())),
        }
    }
}

/// Which matrix row is drawn at the bottom of a heatmap. Free-energy
/// surfaces put row zero at the bottom, correlation matrices at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Lower,
    Upper,
}

/// One curve within a series panel.
#[derive(Debug, Clone)]
pub struct Trace {
    pub name: String,
    pub color: RGBColor,
    pub series: TimeSeries,
}

#[derive(Debug, Clone)]
pub struct SeriesPanel {
    pub label: String,
    pub traces: Vec<Trace>,
}

#[derive(Debug, Clone)]
pub struct HeatmapPanel {
    pub label: String,
    pub values: DMatrix<f64>,
    pub range: (f64, f64),
    pub origin: Origin,
}

/// A panel whose input could not be turned into data. It keeps its label
/// and axes so the figure layout stays intact, with a short message where
/// the data would be.
#[derive(Debug, Clone)]
pub struct PlaceholderPanel {
    pub label: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub enum PanelContent {
    Series(SeriesPanel),
    Heatmap(HeatmapPanel),
    Placeholder(PlaceholderPanel),
}

impl PanelContent {
    pub fn label(&self) -> &str {
        match self {
            PanelContent::Series(panel) => &panel.label,
            PanelContent::Heatmap(panel) => &panel.label,
            PanelContent::Placeholder(panel) => &panel.label,
        }
    }
}

/// A complete multi-panel figure, ready to draw.
///
/// Panels are laid out row-major on a grid `columns` wide; the last row may
/// be partially filled. Axis labels and the colormap apply to every panel.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub panels: Vec<PanelContent>,
    pub columns: usize,
    pub x_label: String,
    pub y_label: String,
    pub value_label: String,
    pub colormap: Colormap,
    pub show_legend: bool,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Figure has no panels")]
    EmptyFigure,
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Render buffer holds {actual} bytes but {required} are needed")]
    BufferTooSmall { required: usize, actual: usize },
}

/// Renders a figure to a file in the given format.
pub fn render_figure_file(
    figure: &Figure,
    theme: &Theme,
    path: &Path,
    format: ImageFormat,
    size: (u32, u32),
) -> Result<(), RenderError> {
    if figure.panels.is_empty() {
        return Err(RenderError::EmptyFigure);
    }
    match format {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(&root, figure, theme).map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(&root, figure, theme).map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
        }
    }
    Ok(())
}

/// Renders a figure into a caller-owned RGB888 pixel buffer of at least
/// `size.0 * size.1 * 3` bytes.
pub fn render_figure_into_rgb(
    figure: &Figure,
    theme: &Theme,
    buffer: &mut [u8],
    size: (u32, u32),
) -> Result<(), RenderError> {
    if figure.panels.is_empty() {
        return Err(RenderError::EmptyFigure);
    }
    let required = size.0 as usize * size.1 as usize * 3;
    if buffer.len() < required {
        return Err(RenderError::BufferTooSmall {
            required,
            actual: buffer.len(),
        });
    }
    let root = BitMapBackend::with_buffer(buffer, size).into_drawing_area();
    draw_figure(&root, figure, theme).map_err(|e| RenderError::Draw(e.to_string()))?;
    root.present().map_err(|e| RenderError::Draw(e.to_string()))?;
    Ok(())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&theme.background_color())?;

    let content = if figure.title.is_empty() {
        root.margin(8, 8, 8, 8)
    } else {
        let style = theme
            .font(theme.title_size)
            .color(&theme.foreground_color());
        root.titled(&figure.title, style)?.margin(8, 8, 8, 8)
    };

    let count = figure.panels.len();
    let columns = figure.columns.clamp(1, count);
    let rows = count.div_ceil(columns);
    let cells = content.split_evenly((rows, columns));

    for (cell, panel) in cells.iter().zip(&figure.panels) {
        match panel {
            PanelContent::Series(series) => draw_series_panel(cell, series, figure, theme)?,
            PanelContent::Heatmap(heatmap) => draw_heatmap_panel(cell, heatmap, figure, theme)?,
            PanelContent::Placeholder(placeholder) => {
                draw_placeholder_panel(cell, placeholder, figure, theme)?
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_series_figure() -> Figure {
        let mut series = TimeSeries::new(2);
        series.push_row(vec![0.0, 0.1]);
        series.push_row(vec![1.0, 0.4]);
        series.push_row(vec![2.0, 0.2]);
        Figure {
            title: "Series".to_string(),
            panels: vec![PanelContent::Series(SeriesPanel {
                label: "A) Test".to_string(),
                traces: vec![Trace {
                    name: "Backbone".to_string(),
                    color: RGBColor(30, 58, 138),
                    series,
                }],
            })],
            columns: 1,
            x_label: "Time (ns)".to_string(),
            y_label: "RMSD (nm)".to_string(),
            value_label: String::new(),
            colormap: Colormap::VIRIDIS,
            show_legend: true,
        }
    }

    fn render(figure: &Figure) -> Vec<u8> {
        let size = (320u32, 240u32);
        let mut buffer = vec![0u8; size.0 as usize * size.1 as usize * 3];
        render_figure_into_rgb(figure, &Theme::default(), &mut buffer, size).unwrap();
        buffer
    }

    #[test]
    fn image_format_parses_from_str() {
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("SVG".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert!("eps".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn image_format_extension_round_trips() {
        for format in [ImageFormat::Png, ImageFormat::Svg] {
            assert_eq!(format.extension().parse::<ImageFormat>().unwrap(), format);
        }
    }

    #[test]
    fn series_figure_renders_non_blank_pixels() {
        let buffer = render(&rgb_series_figure());
        assert!(buffer.iter().any(|&byte| byte != 255));
    }

    #[test]
    fn heatmap_figure_renders_non_blank_pixels() {
        let values = DMatrix::from_fn(8, 8, |r, c| (r as f64 - c as f64) / 8.0);
        let figure = Figure {
            title: "Heatmap".to_string(),
            panels: vec![PanelContent::Heatmap(HeatmapPanel {
                label: "A) Matrix".to_string(),
                values,
                range: (-1.0, 1.0),
                origin: Origin::Upper,
            })],
            columns: 1,
            x_label: "Residue Index".to_string(),
            y_label: "Residue Index".to_string(),
            value_label: "Covariance (nm²)".to_string(),
            colormap: Colormap::by_name("rdbu-r").unwrap(),
            show_legend: false,
        };
        let buffer = render(&figure);
        assert!(buffer.iter().any(|&byte| byte != 255));
    }

    #[test]
    fn placeholder_figure_renders_non_blank_pixels() {
        let figure = Figure {
            title: String::new(),
            panels: vec![PanelContent::Placeholder(PlaceholderPanel {
                label: "B) Missing".to_string(),
                message: "File not found".to_string(),
            })],
            columns: 1,
            x_label: "PC1".to_string(),
            y_label: "PC2".to_string(),
            value_label: String::new(),
            colormap: Colormap::VIRIDIS,
            show_legend: false,
        };
        let buffer = render(&figure);
        assert!(buffer.iter().any(|&byte| byte != 255));
    }

    #[test]
    fn rendering_is_deterministic() {
        let figure = rgb_series_figure();
        assert_eq!(render(&figure), render(&figure));
    }

    #[test]
    fn empty_figure_is_rejected() {
        let figure = Figure {
            title: "Empty".to_string(),
            panels: Vec::new(),
            columns: 2,
            x_label: String::new(),
            y_label: String::new(),
            value_label: String::new(),
            colormap: Colormap::VIRIDIS,
            show_legend: false,
        };
        let mut buffer = vec![0u8; 320 * 240 * 3];
        let result = render_figure_into_rgb(&figure, &Theme::default(), &mut buffer, (320, 240));
        assert!(matches!(result, Err(RenderError::EmptyFigure)));
    }

    #[test]
    fn undersized_buffer_is_rejected() {
        let figure = rgb_series_figure();
        let mut buffer = vec![0u8; 16];
        let result = render_figure_into_rgb(&figure, &Theme::default(), &mut buffer, (320, 240));
        assert!(matches!(result, Err(RenderError::BufferTooSmall { .. })));
    }

    #[test]
    fn render_figure_file_writes_png_and_svg() {
        use std::fs;
        use tempfile::tempdir;

        let dir = tempdir().unwrap();
        let figure = rgb_series_figure();
        let theme = Theme::default();

        let png_path = dir.path().join("figure.png");
        render_figure_file(&figure, &theme, &png_path, ImageFormat::Png, (320, 240)).unwrap();
        let png_bytes = fs::read(&png_path).unwrap();
        assert_eq!(&png_bytes[1..4], b"PNG");

        let svg_path = dir.path().join("figure.svg");
        render_figure_file(&figure, &theme, &svg_path, ImageFormat::Svg, (320, 240)).unwrap();
        let svg_text = fs::read_to_string(&svg_path).unwrap();
        assert!(svg_text.contains("<svg"));
    }
}

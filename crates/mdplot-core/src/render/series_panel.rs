use super::figure::{Figure, SeriesPanel};
use super::theme::Theme;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use std::ops::Range;

/// Fraction of the data span added on each side of an axis.
const AXIS_PADDING: f64 = 0.05;

pub(crate) fn draw_series_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &SeriesPanel,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (x_range, y_range) = padded_ranges(panel);

    let mut chart = ChartBuilder::on(area)
        .caption(
            &panel.label,
            theme
                .font(theme.caption_size)
                .color(&theme.foreground_color()),
        )
        .margin(8)
        .x_label_area_size(44)
        .y_label_area_size(54)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .axis_desc_style(
            theme
                .font(theme.label_size)
                .color(&theme.foreground_color()),
        )
        .label_style(theme.font(theme.tick_size).color(&theme.foreground_color()))
        .bold_line_style(theme.grid_color().mix(0.6))
        .light_line_style(theme.grid_color().mix(0.2))
        .draw()?;

    for trace in &panel.traces {
        let color = trace.color;
        chart
            .draw_series(LineSeries::new(trace.series.points(), color.stroke_width(2)))?
            .label(&trace.name)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    // An empty legend box would still be drawn, so skip it when no trace
    // survived loading.
    if figure.show_legend && !panel.traces.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(theme.background_color().mix(0.85))
            .border_style(theme.grid_color())
            .label_font(theme.font(theme.tick_size).color(&theme.foreground_color()))
            .draw()?;
    }
    Ok(())
}

/// Axis ranges covering every finite point of every trace, with a small
/// margin on each side. Falls back to the unit range when the panel holds
/// no plottable point.
fn padded_ranges(panel: &SeriesPanel) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for trace in &panel.traces {
        for (x, y) in trace.series.points() {
            if x.is_finite() && y.is_finite() {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
    }

    if x_min > x_max || y_min > y_max {
        return (0.0..1.0, 0.0..1.0);
    }
    (pad(x_min, x_max), pad(y_min, y_max))
}

fn pad(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let margin = if span > 0.0 { span * AXIS_PADDING } else { 0.5 };
    (min - margin)..(max + margin)
}

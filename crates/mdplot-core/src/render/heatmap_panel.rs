use super::colormap::Colormap;
use super::figure::{Figure, HeatmapPanel, Origin};
use super::theme::Theme;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Pixel width of the colorbar strip on the right of each heatmap.
const COLORBAR_WIDTH: u32 = 64;
/// Horizontal extent of the gradient bar inside the strip.
const BAR_X0: i32 = 10;
const BAR_X1: i32 = 26;
/// Vertical inset of the gradient bar from the strip edges.
const BAR_INSET: i32 = 28;
/// Bands the gradient is quantized into.
const GRADIENT_STEPS: i32 = 64;

pub(crate) fn draw_heatmap_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &HeatmapPanel,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, _) = area.dim_in_pixel();

    // Narrow cells get the whole area; the colorbar would not fit.
    if width <= 2 * COLORBAR_WIDTH {
        return draw_cells(area, panel, figure, theme);
    }

    let (plot_area, bar_area) = area.split_horizontally((width - COLORBAR_WIDTH) as i32);
    draw_cells(&plot_area, panel, figure, theme)?;
    draw_colorbar(&bar_area, panel.range, figure.colormap, &figure.value_label, theme)
}

fn draw_cells<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &HeatmapPanel,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let nrows = panel.values.nrows();
    let ncols = panel.values.ncols();
    let rows_f = nrows as f64;

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
        .build_cartesian_2d(0.0..ncols as f64, 0.0..rows_f)?;

    let x_formatter = |v: &f64| format!("{}", *v as i64);
    let y_formatter: Box<dyn Fn(&f64) -> String> = match panel.origin {
        Origin::Lower => Box::new(|v: &f64| format!("{}", *v as i64)),
        Origin::Upper => Box::new(move |v: &f64| format!("{}", (rows_f - *v) as i64)),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(6)
        .y_labels(6)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&*y_formatter)
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .axis_desc_style(
            theme
                .font(theme.label_size)
                .color(&theme.foreground_color()),
        )
        .label_style(theme.font(theme.tick_size).color(&theme.foreground_color()))
        .draw()?;

    chart.draw_series((0..nrows).flat_map(|row| {
        let display = display_row(row, nrows, panel.origin) as f64;
        (0..ncols).map(move |col| {
            let color = figure.colormap.sample_in(panel.values[(row, col)], panel.range);
            Rectangle::new(
                [(col as f64, display), (col as f64 + 1.0, display + 1.0)],
                color.filled(),
            )
        })
    }))?;
    Ok(())
}

/// Maps a matrix row to the cell row it is drawn in, counting from the
/// bottom of the panel.
fn display_row(row: usize, nrows: usize, origin: Origin) -> usize {
    match origin {
        Origin::Lower => row,
        Origin::Upper => nrows - 1 - row,
    }
}

fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    range: (f64, f64),
    colormap: Colormap,
    value_label: &str,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, height) = area.dim_in_pixel();
    let top = BAR_INSET;
    let bottom = height as i32 - BAR_INSET;
    if bottom <= top {
        return Ok(());
    }
    let span = (bottom - top) as f64;

    for step in 0..GRADIENT_STEPS {
        let t0 = step as f64 / GRADIENT_STEPS as f64;
        let t1 = (step + 1) as f64 / GRADIENT_STEPS as f64;
        let y0 = top + (t0 * span) as i32;
        let y1 = top + (t1 * span).ceil() as i32;
        // The top band carries the maximum value.
        let color = colormap.sample(1.0 - (t0 + t1) / 2.0);
        area.draw(&Rectangle::new([(BAR_X0, y0), (BAR_X1, y1)], color.filled()))?;
    }
    area.draw(&Rectangle::new(
        [(BAR_X0, top), (BAR_X1, bottom)],
        theme.foreground_color().stroke_width(1),
    ))?;

    let tick_style = theme
        .font(theme.tick_size)
        .color(&theme.foreground_color())
        .pos(Pos::new(HPos::Left, VPos::Center));
    area.draw(&Text::new(
        format!("{:.2}", range.1),
        (BAR_X1 + 4, top),
        tick_style.clone(),
    ))?;
    area.draw(&Text::new(
        format!("{:.2}", range.0),
        (BAR_X1 + 4, bottom),
        tick_style,
    ))?;

    if !value_label.is_empty() {
        let label_style = theme
            .font(theme.label_size)
            .color(&theme.foreground_color())
            .transform(FontTransform::Rotate270)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(
            value_label.to_string(),
            (width as i32 - 10, height as i32 / 2),
            label_style,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_origin_keeps_row_order() {
        assert_eq!(display_row(0, 5, Origin::Lower), 0);
        assert_eq!(display_row(4, 5, Origin::Lower), 4);
    }

    #[test]
    fn upper_origin_flips_row_order() {
        assert_eq!(display_row(0, 5, Origin::Upper), 4);
        assert_eq!(display_row(4, 5, Origin::Upper), 0);
        assert_eq!(display_row(2, 5, Origin::Upper), 2);
    }
}

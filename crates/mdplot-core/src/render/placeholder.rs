use super::figure::{Figure, PlaceholderPanel};
use super::theme::Theme;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Draws a panel whose data never materialized. The axes and label stay in
/// place so multi-panel layouts keep their grid, with the message centered
/// where the data would be.
pub(crate) fn draw_placeholder_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &PlaceholderPanel,
    figure: &Figure,
    theme: &Theme,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
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
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(3)
        .y_labels(3)
        .x_desc(figure.x_label.as_str())
        .y_desc(figure.y_label.as_str())
        .axis_desc_style(
            theme
                .font(theme.label_size)
                .color(&theme.foreground_color()),
        )
        .label_style(theme.font(theme.tick_size).color(&theme.foreground_color()))
        .draw()?;

    let style = theme
        .italic_font(theme.label_size)
        .color(&theme.placeholder_color())
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(std::iter::once(Text::new(
        panel.message.clone(),
        (0.5, 0.5),
        style,
    )))?;
    Ok(())
}

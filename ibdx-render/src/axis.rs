//! Axis lines, ticks and titles

use crate::scale::{format_tick, nice_round_length, LinearScale};
use crate::surface::{DrawSurface, Stroke, TextAnchor, TextStyle};
use crate::{PlotArea, RenderStyle};

const AXIS_COLOR: &str = "#000000";
const GRID_COLOR: &str = "#cccccc";

fn tick_step(scale: &LinearScale, desired: usize) -> f64 {
    let (lo, hi) = scale.domain;
    nice_round_length((hi - lo).abs() / desired.max(1) as f64)
}

/// Left axis with ticks mapped through `y`
pub fn draw_y_axis(
    surface: &mut dyn DrawSurface,
    area: &PlotArea,
    y: &LinearScale,
    desired_ticks: usize,
    title: &str,
    style: &RenderStyle,
) {
    let axis = Stroke::solid(AXIS_COLOR, 1.0);
    surface.add_line(area.left, area.top, area.left, area.bottom(), &axis);

    let step = tick_step(y, desired_ticks);
    let label_style = TextStyle::new(style.font_size - 2.0)
        .anchor(TextAnchor::End)
        .family(&style.font_family);
    for value in y.ticks(desired_ticks) {
        let py = y.map(value);
        surface.add_line(area.left - 5.0, py, area.left, py, &axis);
        if style.grid {
            surface.add_line(area.left, py, area.right(), py, &Stroke::solid(GRID_COLOR, 1.0));
        }
        surface.add_text(area.left - 8.0, py + 4.0, &format_tick(value, step), &label_style);
    }

    if !title.is_empty() {
        let x = area.left - 40.0;
        let cy = area.top + area.height / 2.0;
        surface.add_text(
            x,
            cy,
            title,
            &TextStyle::new(style.font_size)
                .anchor(TextAnchor::Middle)
                .family(&style.font_family)
                .rotate(-90.0),
        );
    }
}

/// Bottom axis with numeric ticks mapped through `x`
pub fn draw_x_axis(
    surface: &mut dyn DrawSurface,
    area: &PlotArea,
    x: &LinearScale,
    desired_ticks: usize,
    title: &str,
    style: &RenderStyle,
) {
    let axis = Stroke::solid(AXIS_COLOR, 1.0);
    surface.add_line(area.left, area.bottom(), area.right(), area.bottom(), &axis);

    let step = tick_step(x, desired_ticks);
    let label_style = TextStyle::new(style.font_size - 2.0)
        .anchor(TextAnchor::Middle)
        .family(&style.font_family);
    for value in x.ticks(desired_ticks) {
        let px = x.map(value);
        surface.add_line(px, area.bottom(), px, area.bottom() + 5.0, &axis);
        if style.grid {
            surface.add_line(px, area.top, px, area.bottom(), &Stroke::solid(GRID_COLOR, 1.0));
        }
        surface.add_text(px, area.bottom() + 18.0, &format_tick(value, step), &label_style);
    }

    if !title.is_empty() {
        surface.add_text(
            area.left + area.width / 2.0,
            area.bottom() + 40.0,
            title,
            &TextStyle::new(style.font_size)
                .anchor(TextAnchor::Middle)
                .family(&style.font_family),
        );
    }
}

/// Bottom axis line with one rotated label per category center
pub fn draw_category_axis(
    surface: &mut dyn DrawSurface,
    area: &PlotArea,
    centers: &[(f64, String)],
    style: &RenderStyle,
) {
    surface.add_line(
        area.left,
        area.bottom(),
        area.right(),
        area.bottom(),
        &Stroke::solid(AXIS_COLOR, 1.0),
    );
    let label_style = TextStyle::new(style.font_size - 2.0)
        .anchor(TextAnchor::End)
        .family(&style.font_family)
        .rotate(-45.0);
    for (x, label) in centers {
        surface.add_text(*x, area.bottom() + 12.0, label, &label_style);
    }
}

pub fn draw_title(surface: &mut dyn DrawSurface, title: &str, style: &RenderStyle) {
    surface.add_text(
        style.width / 2.0,
        style.margins.top / 2.0 + 5.0,
        title,
        &TextStyle::new(style.font_size + 4.0)
            .anchor(TextAnchor::Middle)
            .family(&style.font_family)
            .bold(),
    );
}

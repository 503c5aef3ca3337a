//! Volcano and PCA scatter plots

use ibdx_core::{PcaData, Regulation, VolcanoData};

use crate::axis::{draw_title, draw_x_axis, draw_y_axis};
use crate::colors::{model_color, regulation_color, DOWN_COLOR, THRESHOLD_COLOR, UP_COLOR};
use crate::legend::{draw_legend, Swatch};
use crate::scale::LinearScale;
use crate::surface::{DrawSurface, Stroke, TextAnchor, TextStyle};
use crate::{render_message, PlotArea, RenderStyle};

const VOLCANO_X: (f64, f64) = (-4.5, 4.5);
const VOLCANO_Y: (f64, f64) = (0.0, 6.5);
const PCA_X: (f64, f64) = (-6.0, 6.0);
const PCA_Y: (f64, f64) = (-4.0, 5.0);
const PCA_MARKER: f64 = 6.0;

struct Frame {
    area: PlotArea,
    x: LinearScale,
    y: LinearScale,
}

impl Frame {
    fn new(style: &RenderStyle, x_domain: (f64, f64), y_domain: (f64, f64)) -> Self {
        let area = PlotArea::from_style(style);
        Self {
            x: LinearScale::new(x_domain, (area.left, area.right())),
            y: LinearScale::new(y_domain, (area.bottom(), area.top)),
            area,
        }
    }

    fn rect(&self, surface: &mut dyn DrawSurface, x0: f64, y0: f64, x1: f64, y1: f64, fill: &str) {
        let (px0, px1) = (self.x.map(x0), self.x.map(x1));
        let (py0, py1) = (self.y.map(y1), self.y.map(y0));
        surface.add_rect(px0.min(px1), py0.min(py1), (px1 - px0).abs(), (py1 - py0).abs(), fill);
    }

    fn line(&self, surface: &mut dyn DrawSurface, x0: f64, y0: f64, x1: f64, y1: f64, stroke: &Stroke) {
        surface.add_line(self.x.map(x0), self.y.map(y0), self.x.map(x1), self.y.map(y1), stroke);
    }
}

pub fn render_volcano(surface: &mut dyn DrawSurface, data: &VolcanoData, style: &RenderStyle) {
    if data.points.is_empty() {
        render_message(surface, style, &format!("No volcano data for {}.", data.comparison));
        return;
    }

    let frame = Frame::new(style, VOLCANO_X, VOLCANO_Y);
    let params = &data.params;
    let fc_max = params.max_fold_change;
    let p_top = 6.0;

    surface.begin(style.width, style.height, &style.background);
    draw_title(surface, &format!("Volcano Plot: {}", data.comparison), style);

    // significance regions
    frame.rect(surface, params.fc_threshold, params.p_threshold, fc_max, p_top, "rgba(255, 0, 0, 0.1)");
    frame.rect(surface, -fc_max, params.p_threshold, -params.fc_threshold, p_top, "rgba(0, 0, 255, 0.1)");

    for point in &data.points {
        surface.add_circle(
            frame.x.map(point.log2_fc),
            frame.y.map(point.neg_log10_p),
            point.marker_size() / 2.0,
            regulation_color(point.regulation),
        );
        surface.set_tooltip(&format!(
            "{}\nlog2FC: {:.2}\n-log10(p): {:.2}",
            point.gene, point.log2_fc, point.neg_log10_p
        ));
    }

    let dashed = Stroke::dashed(THRESHOLD_COLOR, 1.0);
    frame.line(surface, -fc_max, params.p_threshold, fc_max, params.p_threshold, &dashed);
    frame.line(surface, -params.fc_threshold, 0.0, -params.fc_threshold, p_top, &dashed);
    frame.line(surface, params.fc_threshold, 0.0, params.fc_threshold, p_top, &dashed);

    let note = TextStyle::new(style.font_size).anchor(TextAnchor::Middle).family(&style.font_family);
    surface.add_text(
        frame.x.map(2.5),
        frame.y.map(5.0),
        "Up-regulated significant",
        &note.clone().fill(UP_COLOR),
    );
    surface.add_text(
        frame.x.map(-2.5),
        frame.y.map(5.0),
        "Down-regulated significant",
        &note.fill(DOWN_COLOR),
    );

    if style.axes {
        draw_x_axis(surface, &frame.area, &frame.x, 8, "log2 Fold Change", style);
        draw_y_axis(surface, &frame.area, &frame.y, 6, "-log10(p-value)", style);
    }

    if style.legend {
        let entries: Vec<(String, String)> = [Regulation::Up, Regulation::Down, Regulation::NotSignificant]
            .iter()
            .map(|r| (format!("{} ({})", r.label(), data.count(*r)), regulation_color(*r).to_string()))
            .collect();
        draw_legend(surface, &entries, Swatch::Dot, frame.area.right(), frame.area.top, style);
    }
}

pub fn render_pca(surface: &mut dyn DrawSurface, data: &PcaData, style: &RenderStyle) {
    if data.points.is_empty() {
        render_message(surface, style, "No PCA data available.");
        return;
    }

    let frame = Frame::new(style, PCA_X, PCA_Y);
    surface.begin(style.width, style.height, &style.background);
    draw_title(surface, "PCA of Gene Expression Across Models and Conditions", style);

    let zero = Stroke::solid("#dddddd", 1.0);
    frame.line(surface, PCA_X.0, 0.0, PCA_X.1, 0.0, &zero);
    frame.line(surface, 0.0, PCA_Y.0, 0.0, PCA_Y.1, &zero);

    let mut legend: Vec<(String, String)> = Vec::new();
    let label_style = TextStyle::new(style.font_size - 2.0)
        .anchor(TextAnchor::Middle)
        .family(&style.font_family);

    for point in &data.points {
        if !legend.iter().any(|(name, _)| name == &point.model_name) {
            let color = model_color(&point.model_name, legend.len()).to_string();
            legend.push((point.model_name.clone(), color));
        }
        let color = legend
            .iter()
            .find(|(name, _)| name == &point.model_name)
            .map(|(_, c)| c.clone())
            .unwrap_or_default();

        let (px, py) = (frame.x.map(point.x), frame.y.map(point.y));
        // baselines are dots, disease conditions are squares
        if point.baseline {
            surface.add_circle(px, py, PCA_MARKER, &color);
        } else {
            surface.add_rect(px - PCA_MARKER, py - PCA_MARKER, PCA_MARKER * 2.0, PCA_MARKER * 2.0, &color);
        }
        surface.set_tooltip(&format!(
            "{}\nModel: {}\nPC1: {:.2}\nPC2: {:.2}",
            point.context.condition, point.model_name, point.x, point.y
        ));
        surface.add_text(px, py - PCA_MARKER - 4.0, &point.context.condition, &label_style);
    }

    if style.axes {
        draw_x_axis(surface, &frame.area, &frame.x, 6, &PcaData::x_label(), style);
        draw_y_axis(surface, &frame.area, &frame.y, 5, &PcaData::y_label(), style);
    }
    if style.legend {
        draw_legend(surface, &legend, Swatch::Dot, frame.area.right(), frame.area.top, style);
    }
}

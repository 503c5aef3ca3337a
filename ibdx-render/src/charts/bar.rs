//! Expression bar chart and model-comparison grouped bars

use ibdx_core::{ContextSchema, ExpressionProfile, ModelComparison};

use crate::axis::{draw_category_axis, draw_title, draw_y_axis};
use crate::colors::{condition_color, palette};
use crate::legend::{draw_legend, Swatch};
use crate::scale::{BandScale, LinearScale};
use crate::surface::{DrawSurface, TextAnchor, TextStyle};
use crate::{render_message, PlotArea, RenderStyle};

const BAR_FILL_RATIO: f64 = 0.8;
const Y_TICKS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct BarRecord {
    pub model: String,
    pub condition: String,
    pub value: f64,
}

impl BarRecord {
    pub fn new(model: &str, condition: &str, value: f64) -> Self {
        Self {
            model: model.to_string(),
            condition: condition.to_string(),
            value,
        }
    }

    pub fn label(&self) -> String {
        format!("{} - {}", self.model, self.condition)
    }

    pub fn tooltip(&self) -> String {
        format!("{} - {}: {:.1}", self.model, self.condition, self.value)
    }
}

/// One record per context, labelled with the model's display name
pub fn records_from_profile(profile: &ExpressionProfile, schema: &ContextSchema) -> Vec<BarRecord> {
    profile
        .levels
        .iter()
        .map(|level| {
            let model = schema
                .get(&level.context.model)
                .map(|m| m.name.as_str())
                .unwrap_or(level.context.model.as_str());
            BarRecord::new(model, &level.context.condition, level.value)
        })
        .collect()
}

/// Order by model name, then condition name
pub fn sort_records(records: &mut [BarRecord]) {
    records.sort_by(|a, b| a.model.cmp(&b.model).then_with(|| a.condition.cmp(&b.condition)));
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarMark {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
    pub record: BarRecord,
}

/// Place sorted records into evenly spaced slots over `area`
pub fn layout_bars(records: &[BarRecord], area: &PlotArea) -> (Vec<BarMark>, LinearScale) {
    let max = records.iter().map(|r| r.value).fold(0.0, f64::max);
    let y = LinearScale::zero_based(max, (area.bottom(), area.top));
    let band = BandScale::new(records.len(), area.left, area.right());
    let bar_width = band.slot_width() * BAR_FILL_RATIO;

    let marks = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let top = y.map(record.value.max(0.0));
            BarMark {
                x: band.center(i) - bar_width / 2.0,
                y: top,
                width: bar_width,
                height: area.bottom() - top,
                color: condition_color(&record.condition).to_string(),
                record: record.clone(),
            }
        })
        .collect();
    (marks, y)
}

fn condition_legend(records: &[BarRecord]) -> Vec<(String, String)> {
    let mut seen: Vec<String> = Vec::new();
    for r in records {
        if !seen.contains(&r.condition) {
            seen.push(r.condition.clone());
        }
    }
    seen.into_iter()
        .map(|c| {
            let color = condition_color(&c).to_string();
            (c, color)
        })
        .collect()
}

/// Bars for one gene across all contexts; empty input renders a not-found message
pub fn render_expression(surface: &mut dyn DrawSurface, gene: &str, records: &[BarRecord], style: &RenderStyle) {
    if records.is_empty() {
        render_message(
            surface,
            style,
            &format!("Gene {} not found in dataset. Please try another gene.", gene),
        );
        return;
    }

    let mut sorted = records.to_vec();
    sort_records(&mut sorted);

    let area = PlotArea::from_style(style);
    let (marks, y) = layout_bars(&sorted, &area);

    surface.begin(style.width, style.height, &style.background);
    draw_title(surface, &format!("Expression of {}", gene), style);

    let value_style = TextStyle::new(style.font_size - 2.0)
        .anchor(TextAnchor::Middle)
        .family(&style.font_family);
    for mark in &marks {
        surface.add_rect(mark.x, mark.y, mark.width, mark.height, &mark.color);
        surface.set_tooltip(&mark.record.tooltip());
        if style.value_labels {
            surface.add_text(
                mark.x + mark.width / 2.0,
                mark.y - 5.0,
                &format!("{:.1}", mark.record.value),
                &value_style,
            );
        }
    }

    if style.axes {
        draw_y_axis(surface, &area, &y, Y_TICKS, "Expression Level", style);
        let centers: Vec<(f64, String)> = marks
            .iter()
            .map(|m| (m.x + m.width / 2.0, m.record.label()))
            .collect();
        draw_category_axis(surface, &area, &centers, style);
    }

    if style.legend {
        draw_legend(
            surface,
            &condition_legend(&sorted),
            Swatch::Square,
            area.right(),
            area.top,
            style,
        );
    }
}

/// Four metric bars per (mouse model, human disease) pair
pub fn render_comparison(
    surface: &mut dyn DrawSurface,
    comparison: &ModelComparison,
    schema: &ContextSchema,
    style: &RenderStyle,
) {
    if comparison.rows.is_empty() {
        render_message(surface, style, "No model comparison data available.");
        return;
    }

    let area = PlotArea::from_style(style);
    let y = LinearScale::new((0.0, 1.0), (area.bottom(), area.top));
    let groups = BandScale::new(comparison.rows.len(), area.left, area.right());
    let name_of = |id: &str| {
        schema
            .get(id)
            .map(|m| m.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    surface.begin(style.width, style.height, &style.background);
    draw_title(surface, "Mouse Model Similarity to Human IBD", style);

    let mut centers = Vec::with_capacity(comparison.rows.len());
    let mut legend = Vec::new();
    for (g, row) in comparison.rows.iter().enumerate() {
        let metrics = row.metrics.named();
        let group_width = groups.slot_width() * BAR_FILL_RATIO;
        let inner = BandScale::new(
            metrics.len(),
            groups.center(g) - group_width / 2.0,
            groups.center(g) + group_width / 2.0,
        );
        let pair = format!("{} vs {}", name_of(&row.mouse), name_of(&row.human));
        for (m, (metric, value)) in metrics.iter().enumerate() {
            let top = y.map(*value);
            let color = palette(m);
            surface.add_rect(inner.slot_start(m), top, inner.slot_width(), area.bottom() - top, color);
            surface.set_tooltip(&format!("{}\n{}: {:.2}", pair, metric, value));
            if g == 0 {
                legend.push((metric.to_string(), color.to_string()));
            }
        }
        centers.push((groups.center(g), pair));
    }

    if style.axes {
        draw_y_axis(surface, &area, &y, Y_TICKS, "Similarity", style);
        draw_category_axis(surface, &area, &centers, style);
    }
    if style.legend {
        draw_legend(surface, &legend, Swatch::Square, area.right(), area.top, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SceneRecorder;

    #[test]
    fn test_sort_model_then_condition() {
        let mut records = vec![
            BarRecord::new("ModelB", "Cond2", 5.0),
            BarRecord::new("ModelA", "Cond1", 3.0),
            BarRecord::new("ModelA", "Cond2", 7.0),
        ];
        sort_records(&mut records);
        let labels: Vec<String> = records.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["ModelA - Cond1", "ModelA - Cond2", "ModelB - Cond2"]);
    }

    #[test]
    fn test_layout_scales_to_max() {
        let area = PlotArea {
            left: 0.0,
            top: 0.0,
            width: 300.0,
            height: 100.0,
        };
        let records = vec![
            BarRecord::new("A", "Control", 10.0),
            BarRecord::new("A", "DSS", 20.0),
            BarRecord::new("B", "Control", 5.0),
        ];
        let (marks, y) = layout_bars(&records, &area);
        assert_eq!(y.domain, (0.0, 20.0));
        assert_eq!(marks[1].height, 100.0);
        assert_eq!(marks[0].height, 50.0);
        assert_eq!(marks[0].width, 80.0);
        assert_eq!(marks[0].x, 10.0);
        assert_eq!(marks[1].color, "#2ca02c");
    }

    #[test]
    fn test_all_zero_values_use_unit_domain() {
        let area = PlotArea {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            height: 100.0,
        };
        let (marks, y) = layout_bars(&[BarRecord::new("A", "WT", 0.0)], &area);
        assert_eq!(y.domain, (0.0, 1.0));
        assert_eq!(marks[0].height, 0.0);
    }

    #[test]
    fn test_render_expression_emits_bars_and_tooltips() {
        let mut scene = SceneRecorder::new();
        let records = vec![
            BarRecord::new("IL-10KO", "WT", 15.0),
            BarRecord::new("IL-10KO", "IL10KO", 55.0),
        ];
        render_expression(&mut scene, "TNF", &records, &RenderStyle::default());
        assert!(scene.has_text("Expression of TNF"));
        assert!(scene.has_text("55.0"));
        // value order after sort: IL10KO before WT
        assert_eq!(scene.tooltips(), vec!["IL-10KO - IL10KO: 55.0", "IL-10KO - WT: 15.0"]);
    }

    #[test]
    fn test_empty_records_render_message() {
        let mut scene = SceneRecorder::new();
        render_expression(&mut scene, "NOPE", &[], &RenderStyle::default());
        assert!(scene.has_text("Gene NOPE not found in dataset"));
        assert!(scene.rects().is_empty());
    }
}

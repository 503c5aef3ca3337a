//! Cell heatmaps: model similarity and pathway enrichment

use ibdx_core::pathway::{display_name, MAX_ENRICHMENT};
use ibdx_core::{ContextSchema, PathwayTable, SimilarityMatrix};

use crate::axis::draw_title;
use crate::colors::viridis;
use crate::scale::{BandScale, LinearScale};
use crate::surface::{DrawSurface, TextAnchor, TextStyle};
use crate::{render_message, PlotArea, RenderStyle};

/// Normalized values above this get white value text
pub const LIGHT_TEXT_THRESHOLD: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapData {
    pub title: String,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// `values[row][col]`
    pub values: Vec<Vec<f64>>,
    pub domain: (f64, f64),
    pub row_axis: String,
    pub col_axis: String,
    pub value_name: String,
}

impl HeatmapData {
    pub fn similarity(matrix: &SimilarityMatrix) -> Self {
        Self {
            title: "Gene Expression Correlation Between Models".to_string(),
            row_labels: matrix.names.clone(),
            col_labels: matrix.names.clone(),
            values: matrix.values.clone(),
            domain: (0.0, 1.0),
            row_axis: "Model 1".to_string(),
            col_axis: "Model 2".to_string(),
            value_name: "Correlation".to_string(),
        }
    }

    pub fn pathways(table: &PathwayTable, schema: &ContextSchema) -> Self {
        let col_labels: Vec<String> = table
            .models()
            .iter()
            .map(|id| schema.get(id).map(|m| m.name.clone()).unwrap_or_else(|| id.clone()))
            .collect();
        let values: Vec<Vec<f64>> = table
            .pathways()
            .iter()
            .map(|p| {
                table
                    .row(p)
                    .map(|row| row.into_iter().map(|(_, v)| v).collect())
                    .unwrap_or_default()
            })
            .collect();
        Self {
            title: "Pathway Enrichment Across Models".to_string(),
            row_labels: table.pathways().iter().map(|p| display_name(p)).collect(),
            col_labels,
            values,
            domain: (0.0, MAX_ENRICHMENT),
            row_axis: "Pathway".to_string(),
            col_axis: "Model".to_string(),
            value_name: "Enrichment".to_string(),
        }
    }
}

/// Text colour for a cell value normalized into `[0, 1]`
pub fn text_color(normalized: f64) -> &'static str {
    if normalized > LIGHT_TEXT_THRESHOLD {
        "white"
    } else {
        "black"
    }
}

pub fn render_heatmap(surface: &mut dyn DrawSurface, data: &HeatmapData, style: &RenderStyle) {
    if data.row_labels.is_empty() || data.col_labels.is_empty() {
        render_message(surface, style, "No data available for this heatmap.");
        return;
    }

    // wider left margin for row labels
    let mut inner = style.clone();
    inner.margins.left = style.margins.left.max(170.0);
    inner.margins.bottom = style.margins.bottom.max(110.0);
    let area = PlotArea::from_style(&inner);

    let cols = BandScale::new(data.col_labels.len(), area.left, area.right());
    let rows = BandScale::new(data.row_labels.len(), area.top, area.bottom());
    let color_scale = LinearScale::new(data.domain, (0.0, 1.0));

    surface.begin(style.width, style.height, &style.background);
    draw_title(surface, &data.title, style);

    for (r, row) in data.values.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let t = color_scale.normalize(*value);
            let x = cols.slot_start(c);
            let y = rows.slot_start(r);
            surface.add_rect(x, y, cols.slot_width(), rows.slot_width(), &viridis(t));
            surface.set_tooltip(&format!(
                "{}: {}\n{}: {}\n{}: {:.2}",
                data.row_axis, data.row_labels[r], data.col_axis, data.col_labels[c], data.value_name, value
            ));
            if style.value_labels {
                surface.add_text(
                    x + cols.slot_width() / 2.0,
                    y + rows.slot_width() / 2.0 + 4.0,
                    &format!("{:.2}", value),
                    &TextStyle::new(style.font_size - 1.0)
                        .anchor(TextAnchor::Middle)
                        .family(&style.font_family)
                        .fill(text_color(t)),
                );
            }
        }
    }

    if style.axes {
        let label = TextStyle::new(style.font_size - 1.0).family(&style.font_family);
        for (r, name) in data.row_labels.iter().enumerate() {
            surface.add_text(
                area.left - 8.0,
                rows.center(r) + 4.0,
                name,
                &label.clone().anchor(TextAnchor::End),
            );
        }
        for (c, name) in data.col_labels.iter().enumerate() {
            surface.add_text(
                cols.center(c),
                area.bottom() + 14.0,
                name,
                &label.clone().anchor(TextAnchor::End).rotate(-45.0),
            );
        }
    }
}

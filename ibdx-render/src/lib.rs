//! IBDx chart rendering
//!
//! Charts lay out marks through linear and band scales and emit them to a
//! [`DrawSurface`]. Two surfaces ship with the crate: an in-memory
//! [`SceneRecorder`] and an [`SvgSurface`] that writes SVG documents.

use serde::{Deserialize, Serialize};

pub mod surface;
pub mod scale;
pub mod colors;
pub mod axis;
pub mod legend;
pub mod svg;
pub mod charts;

pub use surface::{DrawSurface, Primitive, SceneRecorder, Stroke, TextAnchor, TextStyle};
pub use scale::{BandScale, LinearScale};
pub use svg::{ExportConfig, SvgSurface};
pub use charts::{bar, heatmap, scatter, table};

/// Margins around the plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 30.0,
            bottom: 80.0,
            left: 60.0,
        }
    }
}

/// Visual settings shared by every chart kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub background: String,
    pub font_family: String,
    pub font_size: f64,
    pub legend: bool,
    pub axes: bool,
    pub grid: bool,
    pub value_labels: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            margins: Margins::default(),
            background: "#ffffff".to_string(),
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12.0,
            legend: true,
            axes: true,
            grid: false,
            value_labels: true,
        }
    }
}

/// Inner plotting rectangle after margins
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_style(style: &RenderStyle) -> Self {
        let m = style.margins;
        Self {
            left: m.left,
            top: m.top,
            width: (style.width - m.left - m.right).max(1.0),
            height: (style.height - m.top - m.bottom).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Centered status message in place of a chart, e.g. for a missing entity
pub fn render_message(surface: &mut dyn DrawSurface, style: &RenderStyle, message: &str) {
    log::debug!("Rendering status message: {}", message);
    surface.begin(style.width, style.height, &style.background);
    surface.add_text(
        style.width / 2.0,
        style.height / 2.0,
        message,
        &TextStyle::new(style.font_size + 2.0)
            .anchor(TextAnchor::Middle)
            .fill("#856404")
            .family(&style.font_family),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_area_from_margins() {
        let area = PlotArea::from_style(&RenderStyle::default());
        assert_eq!(area.left, 60.0);
        assert_eq!(area.width, 810.0);
        assert_eq!(area.height, 370.0);
        assert_eq!(area.bottom(), 420.0);
    }

    #[test]
    fn test_render_message() {
        let mut scene = SceneRecorder::new();
        render_message(&mut scene, &RenderStyle::default(), "Gene X not found in dataset. Please try another gene.");
        assert_eq!(scene.texts().len(), 1);
        assert!(scene.has_text("not found"));
    }
}

//! Boxed legend keyed by a category -> colour map

use crate::surface::{DrawSurface, TextStyle};
use crate::RenderStyle;

const ROW_HEIGHT: f64 = 20.0;
const BOX_WIDTH: f64 = 130.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swatch {
    Square,
    Dot,
}

/// Draw a legend whose top-right corner sits at `(right, top)`
pub fn draw_legend(
    surface: &mut dyn DrawSurface,
    entries: &[(String, String)],
    swatch: Swatch,
    right: f64,
    top: f64,
    style: &RenderStyle,
) {
    if entries.is_empty() {
        return;
    }
    let x = right - BOX_WIDTH;
    let height = entries.len() as f64 * ROW_HEIGHT + 10.0;
    surface.add_rect(x, top, BOX_WIDTH, height, "rgba(255, 255, 255, 0.9)");

    let text_style = TextStyle::new(style.font_size).family(&style.font_family);
    for (i, (label, color)) in entries.iter().enumerate() {
        let cy = top + 15.0 + i as f64 * ROW_HEIGHT;
        match swatch {
            Swatch::Square => surface.add_rect(x + 10.0, cy - 6.0, 12.0, 12.0, color),
            Swatch::Dot => surface.add_circle(x + 16.0, cy, 5.0, color),
        }
        surface.add_text(x + 30.0, cy + 4.0, label, &text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SceneRecorder;

    #[test]
    fn test_legend_rows() {
        let mut scene = SceneRecorder::new();
        let entries = vec![
            ("Control".to_string(), "#1f77b4".to_string()),
            ("DSS".to_string(), "#2ca02c".to_string()),
        ];
        draw_legend(&mut scene, &entries, Swatch::Square, 500.0, 50.0, &RenderStyle::default());
        // background + two swatches
        assert_eq!(scene.rects().len(), 3);
        assert_eq!(scene.texts(), vec!["Control", "DSS"]);

        let mut empty = SceneRecorder::new();
        draw_legend(&mut empty, &[], Swatch::Dot, 500.0, 50.0, &RenderStyle::default());
        assert!(empty.items.is_empty());
    }
}

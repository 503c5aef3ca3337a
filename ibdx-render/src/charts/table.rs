//! Target validation table and per-target score breakdown

use ibdx_core::TargetScore;

use crate::axis::draw_title;
use crate::colors::{palette, viridis};
use crate::render_message;
use crate::scale::LinearScale;
use crate::surface::{DrawSurface, TextAnchor, TextStyle};
use crate::RenderStyle;

const ROW_HEIGHT: f64 = 22.0;
const HEADER: [&str; 8] = [
    "Rank",
    "Target",
    "DE",
    "Pathway",
    "Conservation",
    "Druggability",
    "Overall",
    "Therapy",
];
const COLUMN_X: [f64; 8] = [20.0, 70.0, 160.0, 230.0, 310.0, 410.0, 510.0, 640.0];
const OVERALL_BAR_WIDTH: f64 = 60.0;

/// Rows: rank, name, four sub-scores, overall and therapy
pub fn table_rows(ranked: &[&TargetScore]) -> Vec<[String; 8]> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, t)| {
            [
                (i + 1).to_string(),
                t.name.clone(),
                format!("{:.2}", t.de_score),
                format!("{:.2}", t.pathway_relevance),
                format!("{:.2}", t.conservation),
                format!("{:.2}", t.druggability),
                format!("{:.2}", t.overall()),
                t.therapy.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect()
}

pub fn render_target_table(surface: &mut dyn DrawSurface, ranked: &[&TargetScore], style: &RenderStyle) {
    if ranked.is_empty() {
        render_message(surface, style, "No targets available.");
        return;
    }

    let height = style.height.max(style.margins.top + (ranked.len() + 2) as f64 * ROW_HEIGHT);
    surface.begin(style.width, height, &style.background);
    draw_title(surface, "Therapeutic Target Ranking", style);

    let top = style.margins.top + 10.0;
    let header_style = TextStyle::new(style.font_size).family(&style.font_family).bold();
    for (label, x) in HEADER.iter().zip(COLUMN_X) {
        surface.add_text(x, top, label, &header_style);
    }

    let cell = TextStyle::new(style.font_size - 1.0).family(&style.font_family);
    for (r, (row, target)) in table_rows(ranked).iter().zip(ranked).enumerate() {
        let y = top + (r + 1) as f64 * ROW_HEIGHT;
        if r % 2 == 0 {
            surface.add_rect(10.0, y - 15.0, style.width - 20.0, ROW_HEIGHT, "#f5f5f5");
        }
        for (c, (text, x)) in row.iter().zip(COLUMN_X).enumerate() {
            if c == 6 {
                let overall = target.overall();
                surface.add_rect(x, y - 11.0, OVERALL_BAR_WIDTH * overall, 12.0, &viridis(overall));
                surface.set_tooltip(&format!("{}: overall {:.2}", target.name, overall));
                surface.add_text(x + OVERALL_BAR_WIDTH + 6.0, y, text, &cell);
            } else {
                surface.add_text(x, y, text, &cell);
            }
        }
    }
}

/// Horizontal bars for the four sub-scores of one target
pub fn render_target_detail(surface: &mut dyn DrawSurface, target: &TargetScore, style: &RenderStyle) {
    let left = style.margins.left + 120.0;
    let right = style.width - style.margins.right - 50.0;
    let x = LinearScale::new((0.0, 1.0), (left, right));
    let bar_height = 28.0;

    surface.begin(style.width, style.height, &style.background);
    draw_title(surface, &format!("Target Validation: {}", target.name), style);

    let label = TextStyle::new(style.font_size)
        .anchor(TextAnchor::End)
        .family(&style.font_family);
    let value_style = TextStyle::new(style.font_size - 1.0).family(&style.font_family);

    let mut rows: Vec<(&str, f64)> = target.sub_scores().to_vec();
    rows.push(("Overall", target.overall()));
    for (i, (name, score)) in rows.iter().enumerate() {
        let y = style.margins.top + 20.0 + i as f64 * (bar_height + 14.0);
        surface.add_text(left - 10.0, y + bar_height / 2.0 + 4.0, name, &label);
        surface.add_rect(left, y, x.map(*score) - left, bar_height, palette(i));
        surface.set_tooltip(&format!("{} - {}: {:.2}", target.name, name, score));
        surface.add_text(x.map(*score) + 6.0, y + bar_height / 2.0 + 4.0, &format!("{:.2}", score), &value_style);
    }

    let therapy = match &target.therapy {
        Some(t) => format!("Approved or candidate therapy: {}", t),
        None => "No approved therapy targets this gene".to_string(),
    };
    surface.add_text(
        left,
        style.margins.top + 20.0 + rows.len() as f64 * (bar_height + 14.0) + 10.0,
        &therapy,
        &value_style,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SceneRecorder;
    use ibdx_core::{Seeder, TargetTable};

    #[test]
    fn test_rows_follow_ranking() {
        let table = TargetTable::build(0.05, &Seeder::default());
        let ranked = table.ranked();
        let rows = table_rows(&ranked);
        assert_eq!(rows.len(), 22);
        assert_eq!(rows[0][0], "1");
        assert_eq!(rows[0][1], "TNF");
        assert_eq!(rows[0][2], "0.95");
        assert_eq!(rows[0][7], "infliximab, adalimumab");
    }

    #[test]
    fn test_render_table_and_detail() {
        let table = TargetTable::build(0.05, &Seeder::default());
        let mut scene = SceneRecorder::new();
        render_target_table(&mut scene, &table.ranked(), &RenderStyle::default());
        assert!(scene.has_text("Therapeutic Target Ranking"));
        assert_eq!(scene.tooltips().len(), 22);
        assert!(scene.height >= 22.0 * ROW_HEIGHT);

        let mut detail = SceneRecorder::new();
        render_target_detail(&mut detail, table.get("PDE4").unwrap(), &RenderStyle::default());
        assert!(detail.has_text("Target Validation: PDE4"));
        assert!(detail.has_text("apremilast"));
        assert_eq!(detail.tooltips().len(), 5);
    }
}

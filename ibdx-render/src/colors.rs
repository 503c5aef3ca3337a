//! Fixed category colour maps and the viridis ramp

use ibdx_core::Regulation;

/// Condition colours for expression bars and their legend
pub const CONDITION_COLORS: &[(&str, &str)] = &[
    ("Control", "#1f77b4"),
    ("Week6", "#ff7f0e"),
    ("DSS", "#2ca02c"),
    ("Chronic_DSS", "#d62728"),
    ("Chronic DSS", "#d62728"),
    ("WT", "#9467bd"),
    ("IL10KO", "#8c564b"),
    ("UC", "#e377c2"),
    ("CD", "#7f7f7f"),
];

/// PCA marker colours by model display name
pub const MODEL_COLORS: &[(&str, &str)] = &[
    ("CD45RBHigh T cell", "rgba(31, 119, 180, 0.8)"),
    ("Acute DSS", "rgba(255, 127, 14, 0.8)"),
    ("Chronic DSS", "rgba(44, 160, 44, 0.8)"),
    ("IL-10KO", "rgba(214, 39, 40, 0.8)"),
    ("Human UC", "rgba(148, 103, 189, 0.8)"),
    ("Human CD", "rgba(140, 86, 75, 0.8)"),
];

/// Used for categories outside the fixed maps, cycled by index
pub const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

pub const UP_COLOR: &str = "rgba(255, 0, 0, 0.7)";
pub const DOWN_COLOR: &str = "rgba(0, 0, 255, 0.7)";
pub const NEUTRAL_COLOR: &str = "rgba(128, 128, 128, 0.5)";
pub const THRESHOLD_COLOR: &str = "rgba(0, 0, 0, 0.5)";

fn lookup(map: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    map.iter().find(|(k, _)| *k == key).map(|(_, c)| *c)
}

pub fn palette(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn condition_color(condition: &str) -> &'static str {
    lookup(CONDITION_COLORS, condition).unwrap_or("#999999")
}

pub fn model_color(model_name: &str, fallback_index: usize) -> &'static str {
    lookup(MODEL_COLORS, model_name).unwrap_or_else(|| palette(fallback_index))
}

pub fn regulation_color(regulation: Regulation) -> &'static str {
    match regulation {
        Regulation::Up => UP_COLOR,
        Regulation::Down => DOWN_COLOR,
        Regulation::NotSignificant => NEUTRAL_COLOR,
    }
}

/// Viridis stops at t = 0, 0.25, 0.5, 0.75, 1
const VIRIDIS: [(f64, f64, f64); 5] = [
    (68.0, 1.0, 84.0),
    (59.0, 82.0, 139.0),
    (33.0, 145.0, 140.0),
    (94.0, 201.0, 98.0),
    (253.0, 231.0, 37.0),
];

/// Piecewise-linear viridis for `t` in `[0, 1]`, as `#rrggbb`
pub fn viridis(t: f64) -> String {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let f = scaled - i as f64;
    let (r0, g0, b0) = VIRIDIS[i];
    let (r1, g1, b1) = VIRIDIS[i + 1];
    let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    format!("#{:02x}{:02x}{:02x}", mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

/*!
# SVG Surface

Collects primitives as SVG elements and serializes them into a standalone
document with optional provenance comments and a generation footer.
*/


use crate::surface::{DrawSurface, Stroke, TextStyle};

/// Document-level export settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Footer with version and UTC timestamp; disable for byte-stable output
    pub show_footer: bool,
    pub footer_label: Option<String>,
    pub provenance_comment: Option<String>,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            show_footer: true,
            footer_label: None,
            provenance_comment: None,
            font_family: "Arial, sans-serif".to_string(),
            font_size: 12.0,
        }
    }
}

struct Element {
    markup: String,
    tooltip: Option<String>,
}

pub struct SvgSurface {
    config: ExportConfig,
    width: f64,
    height: f64,
    elements: Vec<Element>,
}

/// Compact number formatting: at most two decimals, no trailing zeros
fn num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

impl SvgSurface {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            width: 0.0,
            height: 0.0,
            elements: Vec::new(),
        }
    }

    fn push(&mut self, markup: String) {
        self.elements.push(Element { markup, tooltip: None });
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn footer(&self) -> String {
        let label = self.config.footer_label.as_deref().unwrap_or("chart");
        let text = format!(
            "IBDx v{} | {} | Generated: {}",
            ibdx_core::VERSION,
            label,
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        format!(
            r#"<text x="10" y="{}" font-family="{}" font-size="{}px" fill="gray">{}</text>"#,
            num(self.height - 6.0),
            escape_xml(&self.config.font_family),
            num(self.config.font_size - 2.0),
            escape_xml(&text)
        )
    }

    pub fn to_svg_string(&self) -> String {
        log::debug!("Serializing SVG with {} elements", self.elements.len());
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        out.push_str(&format!(
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            w = num(self.width),
            h = num(self.height)
        ));
        if let Some(comment) = &self.config.provenance_comment {
            for line in comment.lines() {
                out.push_str(&format!("  <!-- {} -->\n", comment_text(line)));
            }
        }
        for element in &self.elements {
            match &element.tooltip {
                Some(tip) => out.push_str(&format!(
                    "  <g>{}<title>{}</title></g>\n",
                    element.markup,
                    escape_xml(tip)
                )),
                None => out.push_str(&format!("  {}\n", element.markup)),
            }
        }
        if self.config.show_footer {
            out.push_str(&format!("  {}\n", self.footer()));
        }
        out.push_str("</svg>\n");
        out
    }
}

impl DrawSurface for SvgSurface {
    fn begin(&mut self, width: f64, height: f64, background: &str) {
        self.width = width;
        self.height = height;
        self.elements.clear();
        self.push(format!(
            r#"<rect width="{}" height="{}" fill="{}"/>"#,
            num(width),
            num(height),
            escape_xml(background)
        ));
    }

    fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        self.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            num(x),
            num(y),
            num(width.max(0.0)),
            num(height.max(0.0)),
            escape_xml(fill)
        ));
    }

    fn add_circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(cx),
            num(cy),
            num(r.max(0.0)),
            escape_xml(fill)
        ));
    }

    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        let dash = if stroke.dashed { r#" stroke-dasharray="4 4""# } else { "" };
        self.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            escape_xml(&stroke.color),
            num(stroke.width),
            dash
        ));
    }

    fn add_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        let weight = if style.bold { r#" font-weight="bold""# } else { "" };
        let transform = match style.rotate {
            Some(deg) => format!(r#" transform="rotate({} {} {})""#, num(deg), num(x), num(y)),
            None => String::new(),
        };
        self.push(format!(
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}px" text-anchor="{}" fill="{}"{}{}>{}</text>"#,
            num(x),
            num(y),
            escape_xml(&style.family),
            num(style.size),
            style.anchor.as_svg(),
            escape_xml(&style.fill),
            weight,
            transform,
            escape_xml(text)
        ));
    }

    fn set_tooltip(&mut self, text: &str) {
        if let Some(last) = self.elements.last_mut() {
            last.tooltip = Some(text.to_string());
        }
    }
}

/// Comment body with no "--" and no trailing '-'
fn comment_text(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        if ch == '-' && out.ends_with('-') {
            out.push(' ');
        }
        out.push(ch);
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    out
}

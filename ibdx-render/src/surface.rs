//! Host-agnostic drawing capability

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f64,
    pub anchor: TextAnchor,
    pub fill: String,
    pub family: String,
    pub bold: bool,
    /// Rotation in degrees around the text origin
    pub rotate: Option<f64>,
}

impl TextStyle {
    pub fn new(size: f64) -> Self {
        Self {
            size,
            anchor: TextAnchor::Start,
            fill: "#000000".to_string(),
            family: "Arial, sans-serif".to_string(),
            bold: false,
            rotate: None,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn fill(mut self, fill: &str) -> Self {
        self.fill = fill.to_string();
        self
    }

    pub fn family(mut self, family: &str) -> Self {
        self.family = family.to_string();
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotate = Some(degrees);
        self
    }
}

/// Line stroke settings
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dashed: false,
        }
    }

    pub fn dashed(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            dashed: true,
        }
    }
}

/// Drawing operations every chart is written against.
///
/// `set_tooltip` attaches hover text to the most recently added primitive.
pub trait DrawSurface {
    fn begin(&mut self, width: f64, height: f64, background: &str);
    fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str);
    fn add_circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str);
    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke);
    fn add_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle);
    fn set_tooltip(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect { x: f64, y: f64, width: f64, height: f64, fill: String },
    Circle { cx: f64, cy: f64, r: f64, fill: String },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke },
    Text { x: f64, y: f64, text: String, style: TextStyle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub primitive: Primitive,
    pub tooltip: Option<String>,
}

/// Keeps every primitive in memory, for tests and custom hosts
#[derive(Debug, Clone, Default)]
pub struct SceneRecorder {
    pub width: f64,
    pub height: f64,
    pub background: String,
    pub items: Vec<Recorded>,
    frames: usize,
}

impl SceneRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `begin` calls seen
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn push(&mut self, primitive: Primitive) {
        self.items.push(Recorded { primitive, tooltip: None });
    }

    pub fn rects(&self) -> Vec<&Recorded> {
        self.items
            .iter()
            .filter(|r| matches!(r.primitive, Primitive::Rect { .. }))
            .collect()
    }

    pub fn circles(&self) -> Vec<&Recorded> {
        self.items
            .iter()
            .filter(|r| matches!(r.primitive, Primitive::Circle { .. }))
            .collect()
    }

    pub fn lines(&self) -> Vec<&Recorded> {
        self.items
            .iter()
            .filter(|r| matches!(r.primitive, Primitive::Line { .. }))
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|r| match &r.primitive {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tooltips(&self) -> Vec<&str> {
        self.items.iter().filter_map(|r| r.tooltip.as_deref()).collect()
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl DrawSurface for SceneRecorder {
    fn begin(&mut self, width: f64, height: f64, background: &str) {
        self.width = width;
        self.height = height;
        self.background = background.to_string();
        self.items.clear();
        self.frames += 1;
    }

    fn add_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: &str) {
        self.push(Primitive::Rect {
            x,
            y,
            width,
            height,
            fill: fill.to_string(),
        });
    }

    fn add_circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) {
        self.push(Primitive::Circle {
            cx,
            cy,
            r,
            fill: fill.to_string(),
        });
    }

    fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &Stroke) {
        self.push(Primitive::Line {
            x1,
            y1,
            x2,
            y2,
            stroke: stroke.clone(),
        });
    }

    fn add_text(&mut self, x: f64, y: f64, text: &str, style: &TextStyle) {
        self.push(Primitive::Text {
            x,
            y,
            text: text.to_string(),
            style: style.clone(),
        });
    }

    fn set_tooltip(&mut self, text: &str) {
        if let Some(last) = self.items.last_mut() {
            last.tooltip = Some(text.to_string());
        }
    }
}

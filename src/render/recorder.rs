use serde::Serialize;

use crate::geometry::Point2;
use crate::render::surface::{Color, Edge, Fill, LineStyle, Marker, Surface};
use crate::render::RenderError;

/// One call made on a [`Surface`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Begin { half_width: f64, background: Color },
    SetColor { color: Color },
    SetLineStyle { style: LineStyle },
    SetCharHeight { height: f64 },
    MoveTo { at: Point2 },
    LineTo { at: Point2 },
    Point { at: Point2, marker: Marker },
    Text { at: Point2, text: String },
    Label { edge: Edge, text: String },
    Polygon { points: Vec<Point2> },
    Circle { center: Point2, radius: f64, fill: Fill },
    FrameBox,
}

/// Surface that keeps the ordered call sequence
#[derive(Debug, Clone, Default, Serialize)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(&self.commands)?)
    }

    /// Texts drawn inside the plot, in call order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Edge labels, in call order
    pub fn labels(&self) -> impl Iterator<Item = (Edge, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { edge, text } => Some((*edge, text.as_str())),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn begin(&mut self, half_width: f64, background: Color) {
        self.commands.push(DrawCommand::Begin {
            half_width,
            background,
        });
    }

    fn set_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetColor { color });
    }

    fn set_line_style(&mut self, style: LineStyle) {
        self.commands.push(DrawCommand::SetLineStyle { style });
    }

    fn set_char_height(&mut self, height: f64) {
        self.commands.push(DrawCommand::SetCharHeight { height });
    }

    fn move_to(&mut self, p: Point2) {
        self.commands.push(DrawCommand::MoveTo { at: p });
    }

    fn line_to(&mut self, p: Point2) {
        self.commands.push(DrawCommand::LineTo { at: p });
    }

    fn point(&mut self, p: Point2, marker: Marker) {
        self.commands.push(DrawCommand::Point { at: p, marker });
    }

    fn text(&mut self, p: Point2, text: &str) {
        self.commands.push(DrawCommand::Text {
            at: p,
            text: text.to_string(),
        });
    }

    fn label(&mut self, edge: Edge, text: &str) {
        self.commands.push(DrawCommand::Label {
            edge,
            text: text.to_string(),
        });
    }

    fn polygon(&mut self, points: &[Point2]) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
        });
    }

    fn circle(&mut self, center: Point2, radius: f64, fill: Fill) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
        });
    }

    fn frame_box(&mut self) {
        self.commands.push(DrawCommand::FrameBox);
    }
}

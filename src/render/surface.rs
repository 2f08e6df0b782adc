//! Immediate-mode drawing surface.
//!
//! Coordinates are plot-plane kilometres with the globe centred on the
//! origin, x to the right and y up. Style setters affect every call that
//! follows them.

use serde::Serialize;
use strum_macros::Display;

use crate::geometry::Point2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Red,
    Blue,
    Yellow,
    DarkGrey,
    LightGrey,
    /// Components in `[0, 1]`
    Rgb(f64, f64, f64),
}

impl Color {
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Color::White => [255, 255, 255],
            Color::Red => [255, 0, 0],
            Color::Blue => [0, 0, 255],
            Color::Yellow => [255, 255, 0],
            Color::DarkGrey => [85, 85, 85],
            Color::LightGrey => [170, 170, 170],
            Color::Rgb(r, g, b) => [r, g, b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8),
        }
    }

    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Marker {
    Plus,
    Circle,
    FilledCircle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Solid,
    Outline,
}

/// Side of the plot window a label is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
}

pub trait Surface {
    /// Start a frame spanning `[-half_width, half_width]` on both axes
    fn begin(&mut self, half_width: f64, background: Color);
    fn set_color(&mut self, color: Color);
    fn set_line_style(&mut self, style: LineStyle);
    /// Text height relative to the default
    fn set_char_height(&mut self, height: f64);
    fn move_to(&mut self, p: Point2);
    fn line_to(&mut self, p: Point2);
    fn point(&mut self, p: Point2, marker: Marker);
    fn text(&mut self, p: Point2, text: &str);
    fn label(&mut self, edge: Edge, text: &str);
    /// Filled polygon in the current colour
    fn polygon(&mut self, points: &[Point2]);
    fn circle(&mut self, center: Point2, radius: f64, fill: Fill);
    /// Outline of the plot window
    fn frame_box(&mut self);

    /// Draw each path as one pen-down polyline
    fn draw_paths(&mut self, paths: &[Vec<Point2>]) {
        for path in paths {
            let mut points = path.iter();
            if let Some(first) = points.next() {
                self.move_to(*first);
                for p in points {
                    self.line_to(*p);
                }
            }
        }
    }
}

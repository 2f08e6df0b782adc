use std::fmt::Write;

use crate::geometry::Point2;
use crate::render::surface::{Color, Edge, Fill, LineStyle, Marker, Surface};

/// Default text height as a fraction of the window height
const CHAR_HEIGHT_FRACTION: f64 = 1.0 / 40.0;
/// Extra space around the plot window for edge labels
const MARGIN_FRACTION: f64 = 0.08;

/// Surface writing an SVG document.
///
/// Consecutive `line_to` calls with unchanged style are merged into one
/// `<path>`. A style change closes the current path; the pen position is
/// kept, so the next segment continues from where the last one ended.
#[derive(Debug)]
pub struct SvgSurface {
    half_width: f64,
    color: Color,
    line_style: LineStyle,
    char_height: f64,
    pen: Option<Point2>,
    path: String,
    /// Last vertex written to `path`
    path_end: Option<Point2>,
    body: String,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self {
            half_width: 1.0,
            color: Color::White,
            line_style: LineStyle::Solid,
            char_height: 1.0,
            pen: None,
            path: String::new(),
            path_end: None,
            body: String::new(),
        }
    }
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(mut self) -> String {
        self.flush();
        let margin = self.half_width * (1.0 + MARGIN_FRACTION);
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{:.3} {:.3} {:.3} {:.3}\">\n\
             <rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" fill=\"#000000\"/>\n\
             {}</svg>\n",
            -margin,
            -margin,
            2.0 * margin,
            2.0 * margin,
            -margin,
            -margin,
            2.0 * margin,
            2.0 * margin,
            self.body
        )
    }

    fn stroke_width(&self) -> f64 {
        self.half_width / 500.0
    }

    fn font_size(&self) -> f64 {
        2.0 * self.half_width * CHAR_HEIGHT_FRACTION * self.char_height
    }

    fn stroke_attributes(&self) -> String {
        let mut attrs = format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{:.3}\"",
            self.color.hex(),
            self.stroke_width()
        );
        if self.line_style == LineStyle::Dashed {
            let dash = 4.0 * self.stroke_width();
            let _ = write!(attrs, " stroke-dasharray=\"{dash:.3} {dash:.3}\"");
        }
        attrs
    }

    fn flush(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let path = std::mem::take(&mut self.path);
        self.path_end = None;
        let attrs = self.stroke_attributes();
        let _ = writeln!(self.body, "<path d=\"{}\" {attrs}/>", path.trim_end());
    }

    fn text_element(&mut self, x: f64, y: f64, text: &str) {
        let _ = writeln!(
            self.body,
            "<text x=\"{x:.3}\" y=\"{y:.3}\" font-size=\"{:.3}\" font-family=\"sans-serif\" fill=\"{}\">{}</text>",
            self.font_size(),
            self.color.hex(),
            escape(text)
        );
    }
}

/// SVG y grows downwards
fn flip(p: Point2) -> (f64, f64) {
    (p.x, -p.y)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Surface for SvgSurface {
    fn begin(&mut self, half_width: f64, background: Color) {
        self.flush();
        self.body.clear();
        self.pen = None;
        self.half_width = half_width;
        let _ = writeln!(
            self.body,
            "<rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" fill=\"{}\"/>",
            -half_width,
            -half_width,
            2.0 * half_width,
            2.0 * half_width,
            background.hex()
        );
    }

    fn set_color(&mut self, color: Color) {
        if color != self.color {
            self.flush();
            self.color = color;
        }
    }

    fn set_line_style(&mut self, style: LineStyle) {
        if style != self.line_style {
            self.flush();
            self.line_style = style;
        }
    }

    fn set_char_height(&mut self, height: f64) {
        self.char_height = height;
    }

    fn move_to(&mut self, p: Point2) {
        self.pen = Some(p);
    }

    fn line_to(&mut self, p: Point2) {
        let Some(from) = self.pen else {
            self.pen = Some(p);
            return;
        };
        let (fx, fy) = flip(from);
        let (x, y) = flip(p);
        if self.path_end != Some(from) {
            let _ = write!(self.path, "M{fx:.3} {fy:.3} ");
        }
        let _ = write!(self.path, "L{x:.3} {y:.3} ");
        self.pen = Some(p);
        self.path_end = Some(p);
    }

    fn point(&mut self, p: Point2, marker: Marker) {
        self.flush();
        let (x, y) = flip(p);
        let size = 0.6 * self.font_size();
        let color = self.color.hex();
        let element = match marker {
            Marker::Plus => format!(
                "<path d=\"M{:.3} {y:.3} H{:.3} M{x:.3} {:.3} V{:.3}\" stroke=\"{color}\" stroke-width=\"{:.3}\"/>",
                x - size,
                x + size,
                y - size,
                y + size,
                self.stroke_width()
            ),
            Marker::Circle => format!(
                "<circle cx=\"{x:.3}\" cy=\"{y:.3}\" r=\"{:.3}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{:.3}\"/>",
                size / 2.0,
                self.stroke_width()
            ),
            Marker::FilledCircle => format!(
                "<circle cx=\"{x:.3}\" cy=\"{y:.3}\" r=\"{:.3}\" fill=\"{color}\"/>",
                size / 2.0
            ),
        };
        let _ = writeln!(self.body, "{element}");
    }

    fn text(&mut self, p: Point2, text: &str) {
        self.flush();
        let (x, y) = flip(p);
        self.text_element(x, y, text);
    }

    fn label(&mut self, edge: Edge, text: &str) {
        self.flush();
        let offset = self.half_width * MARGIN_FRACTION / 2.0;
        let y = match edge {
            Edge::Top => -self.half_width - offset / 2.0,
            Edge::Bottom => self.half_width + offset * 1.5,
        };
        self.text_element(-self.half_width, y, text);
    }

    fn polygon(&mut self, points: &[Point2]) {
        self.flush();
        if points.is_empty() {
            return;
        }
        let mut d = String::new();
        for (i, p) in points.iter().enumerate() {
            let (x, y) = flip(*p);
            let _ = write!(d, "{}{x:.3} {y:.3} ", if i == 0 { "M" } else { "L" });
        }
        let _ = writeln!(self.body, "<path d=\"{d}Z\" fill=\"{}\"/>", self.color.hex());
    }

    fn circle(&mut self, center: Point2, radius: f64, fill: Fill) {
        self.flush();
        let (x, y) = flip(center);
        let paint = match fill {
            Fill::Solid => format!("fill=\"{}\"", self.color.hex()),
            Fill::Outline => self.stroke_attributes(),
        };
        let _ = writeln!(
            self.body,
            "<circle cx=\"{x:.3}\" cy=\"{y:.3}\" r=\"{radius:.3}\" {paint}/>"
        );
    }

    fn frame_box(&mut self) {
        self.flush();
        let hw = self.half_width;
        let _ = writeln!(
            self.body,
            "<rect x=\"{:.3}\" y=\"{:.3}\" width=\"{:.3}\" height=\"{:.3}\" {}/>",
            -hw,
            -hw,
            2.0 * hw,
            2.0 * hw,
            self.stroke_attributes()
        );
    }
}

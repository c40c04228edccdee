//! Canvas trait and the two bundled implementations.
//!
//! - [`RecordingCanvas`] records [`DrawCommand`]s (testing, serialization).
//! - [`SvgCanvas`] writes an SVG document.

use crate::draw::{DrawCommand, Transform2D};
use crate::{Color, Point, Size};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Canvas trait for paint operations.
///
/// This is a minimal abstraction over the rendering backend.
pub trait Canvas {
    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Draw text anchored at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Push a transform; it applies until the matching pop.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    /// Text starts at the anchor
    Start,
    /// Text is centered on the anchor
    #[default]
    Middle,
    /// Text ends at the anchor
    End,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Bold (700)
    Bold,
}

/// Text style for rendering.
///
/// # Examples
///
/// ```
/// use speedometer_core::{Color, FontWeight, TextAnchor, TextStyle};
///
/// let style = TextStyle::default();
/// assert_eq!(style.size, 16.0);
/// assert_eq!(style.anchor, TextAnchor::Middle);
///
/// let heading = TextStyle {
///     size: 24.0,
///     color: Color::from_hex("#1a1a1a").expect("valid hex"),
///     weight: FontWeight::Bold,
///     anchor: TextAnchor::Start,
/// };
/// assert_eq!(heading.weight, FontWeight::Bold);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Alignment around the anchor point
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Middle,
        }
    }
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Commands recorded under a pushed transform are wrapped in a
/// [`DrawCommand::Group`] carrying the accumulated transform.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    transform_stack: Vec<Transform2D>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get the current transform (identity if no transforms pushed).
    #[must_use]
    pub fn current_transform(&self) -> Transform2D {
        self.transform_stack
            .last()
            .copied()
            .unwrap_or_else(Transform2D::identity)
    }

    /// Get the transform stack depth.
    #[must_use]
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    /// Serialize the recorded commands as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.commands)
    }

    fn record(&mut self, command: DrawCommand) {
        let transform = self.current_transform();
        if transform.is_identity() {
            self.commands.push(command);
        } else {
            self.commands.push(command.with_transform(transform));
        }
    }
}

impl Canvas for RecordingCanvas {
    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.record(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.record(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_transform(&mut self, transform: Transform2D) {
        // Stacked transforms compose: the inner one applies first.
        let combined = transform.then(&self.current_transform());
        self.transform_stack.push(combined);
    }

    fn pop_transform(&mut self) {
        self.transform_stack.pop();
    }
}

/// A Canvas implementation that writes SVG markup.
#[derive(Debug)]
pub struct SvgCanvas {
    size: Size,
    body: String,
    depth: usize,
}

impl SvgCanvas {
    /// Create an SVG canvas of the given pixel size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            body: String::new(),
            depth: 0,
        }
    }

    /// Close any open groups and return the full SVG document.
    #[must_use]
    pub fn finish(mut self) -> String {
        while self.depth > 0 {
            self.pop_transform();
        }
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">{body}</svg>"#,
            w = fmt_num(self.size.width),
            h = fmt_num(self.size.height),
            body = self.body
        )
    }

    fn points_to_d(points: &[Point]) -> String {
        let mut d = String::with_capacity(points.len() * 12);
        for (i, p) in points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{cmd}{},{}", fmt_num(p.x), fmt_num(p.y));
        }
        d.push('Z');
        d
    }
}

impl Canvas for SvgCanvas {
    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        if points.is_empty() {
            return;
        }
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="{}"{}/>"#,
            Self::points_to_d(points),
            color.to_css_rgb(),
            opacity_attr("fill-opacity", color)
        );
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = match style.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" text-anchor="{anchor}" font-size="{}" font-weight="{weight}" fill="{}">{}</text>"#,
            fmt_num(position.x),
            fmt_num(position.y),
            fmt_num(style.size),
            style.color.to_css_rgb(),
            escape_xml(text)
        );
    }

    fn push_transform(&mut self, transform: Transform2D) {
        let m = transform.matrix;
        let _ = write!(
            self.body,
            r#"<g transform="matrix({} {} {} {} {} {})">"#,
            fmt_num(m[0]),
            fmt_num(m[1]),
            fmt_num(m[2]),
            fmt_num(m[3]),
            fmt_num(m[4]),
            fmt_num(m[5])
        );
        self.depth += 1;
    }

    fn pop_transform(&mut self) {
        if self.depth > 0 {
            self.body.push_str("</g>");
            self.depth -= 1;
        }
    }
}

fn opacity_attr(name: &str, color: Color) -> String {
    if color.a < 1.0 {
        format!(r#" {name}="{}""#, fmt_num(color.a))
    } else {
        String::new()
    }
}

/// Format a coordinate with at most three decimals and no trailing zeros.
fn fmt_num(v: f32) -> String {
    let v = if v == 0.0 { 0.0 } else { v };
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

//! Geometric primitives: Point, Size, Rect.
//!
//! Angles passed to the polar helpers follow the gauge convention: degrees,
//! `0` points straight up and positive values turn clockwise. Screen space
//! has `y` growing downwards.

use serde::{Deserialize, Serialize};

/// A 2D point with x and y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center` in direction `degrees`.
    #[must_use]
    pub fn on_arc(center: Self, radius: f32, degrees: f32) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(center.x + radius * sin, center.y - radius * cos)
    }

    /// Calculate Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// A 2D size with width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::ZERO
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create from size at origin.
    #[must_use]
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Create a new rectangle inset horizontally and vertically.
    #[must_use]
    pub fn inset_xy(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }
}

/// Outline of an annular sector (ring slice) as a closed polygon.
///
/// The outer edge runs from `start` to `end`, the inner edge back again.
/// `steps` is the number of chords per edge and is at least 1.
#[must_use]
pub fn annular_sector(
    center: Point,
    inner_radius: f32,
    outer_radius: f32,
    start_degrees: f32,
    end_degrees: f32,
    steps: usize,
) -> Vec<Point> {
    let steps = steps.max(1);
    let sweep = end_degrees - start_degrees;
    let mut points = Vec::with_capacity(2 * (steps + 1));

    for i in 0..=steps {
        let angle = start_degrees + sweep * (i as f32 / steps as f32);
        points.push(Point::on_arc(center, outer_radius, angle));
    }
    for i in (0..=steps).rev() {
        let angle = start_degrees + sweep * (i as f32 / steps as f32);
        points.push(Point::on_arc(center, inner_radius, angle));
    }

    points
}

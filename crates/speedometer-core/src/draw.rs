//! Draw commands.
//!
//! All gauge rendering reduces to these primitives.

use crate::canvas::TextStyle;
use crate::{Color, Point};
use serde::{Deserialize, Serialize};

/// 2D transformation matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Create a rotation transform (degrees, clockwise on screen).
    #[must_use]
    pub fn rotate_degrees(angle: f32) -> Self {
        let (sin, cos) = angle.to_radians().sin_cos();
        Self {
            matrix: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        // For "first self, then other" semantics: result = other * self
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0] * point.x + m[2] * point.y + m[4],
            m[1] * point.x + m[3] * point.y + m[5],
        )
    }

    /// Check if this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.matrix == Self::identity().matrix
    }
}

/// Drawing primitive - all rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Fill a closed polygon
    Polygon {
        /// Polygon vertices
        points: Vec<Point>,
        /// Fill color
        color: Color,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Anchor position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Group of commands with transform
    Group {
        /// Child commands
        children: Vec<DrawCommand>,
        /// Transform to apply
        transform: Transform2D,
    },
}

impl DrawCommand {
    /// Wrap in a group with transform.
    #[must_use]
    pub fn with_transform(self, transform: Transform2D) -> Self {
        Self::Group {
            children: vec![self],
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        a.distance(&b) < 1e-4
    }

    #[test]
    fn test_transform_identity() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(Transform2D::identity().apply(p), p);
        assert!(Transform2D::default().is_identity());
    }

    #[test]
    fn test_transform_rotate_quarter_turn_clockwise() {
        // Screen space: pointing up (0, -1) turns to pointing right (1, 0).
        let p = Transform2D::rotate_degrees(90.0).apply(Point::new(0.0, -1.0));
        assert!(close(p, Point::new(1.0, 0.0)));
    }

    #[test]
    fn test_transform_then_order() {
        let t = Transform2D::rotate_degrees(90.0).then(&Transform2D::translate(10.0, 0.0));
        let p = t.apply(Point::new(0.0, -1.0));
        assert!(close(p, Point::new(11.0, 0.0)));
    }

    #[test]
    fn test_draw_command_with_transform() {
        let cmd = DrawCommand::Polygon {
            points: vec![Point::ORIGIN, Point::new(2.0, 0.0), Point::new(0.0, 2.0)],
            color: Color::WHITE,
        }
        .with_transform(Transform2D::translate(5.0, 5.0));
        match cmd {
            DrawCommand::Group { children, transform } => {
                assert_eq!(children.len(), 1);
                assert_eq!(transform, Transform2D::translate(5.0, 5.0));
            }
            _ => panic!("Expected Group command"),
        }
    }

    #[test]
    fn test_draw_command_serde_roundtrip() {
        let cmd = DrawCommand::Polygon {
            points: vec![Point::ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            color: Color::WHITE,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }
}

//! Needle length and rotation.

use crate::error::{GaugeError, Result};
use crate::scale::{Scale, ValueRange};
use serde::{Deserialize, Serialize};
use speedometer_core::{Point, Transform2D};

/// Width of the pointer at its pivot.
pub const POINTER_WIDTH: f64 = 10.0;

/// Length of the pointer tail behind the pivot.
pub const POINTER_TAIL_LENGTH: f64 = 5.0;

/// Needle length for a ratio of the gauge radius.
///
/// The ratio must be in `(0, 1]`.
///
/// ```
/// use speedometer::needle::calculate_needle_height;
///
/// assert_eq!(calculate_needle_height(0.9, 2.0).unwrap(), 1.8);
/// assert!(calculate_needle_height(1.1, 2.0).is_err());
/// ```
pub fn calculate_needle_height(height_ratio: f64, radius: f64) -> Result<f64> {
    if height_ratio > 0.0 && height_ratio <= 1.0 {
        Ok(height_ratio * radius)
    } else {
        Err(GaugeError::InvalidHeightRatio(height_ratio))
    }
}

/// Needle angle for `value`, clamped into `range` first.
#[must_use]
pub fn calculate_needle_angle(value: f64, range: &ValueRange, scale: &Scale) -> f64 {
    scale.angle_of(range.clamp(value))
}

/// Rotation and length of the needle for one value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeedleGeometry {
    /// Degrees, 0 pointing up, clockwise positive
    pub rotation_angle: f64,
    /// Distance from the pivot to the tip
    pub length: f64,
}

impl NeedleGeometry {
    /// Needle for `value` on `scale` with a length of `height_ratio * radius`.
    pub fn new(value: f64, scale: &Scale, height_ratio: f64, radius: f64) -> Result<Self> {
        let length = calculate_needle_height(height_ratio, radius)?;
        let range = scale.range();
        Ok(Self {
            rotation_angle: calculate_needle_angle(value, &range, scale),
            length,
        })
    }

    /// Unrotated pointer outline around the pivot at the origin, tip up.
    #[must_use]
    pub fn local_points(&self) -> [Point; 4] {
        let half = (POINTER_WIDTH / 2.0) as f32;
        [
            Point::new(half, 0.0),
            Point::new(0.0, -self.length as f32),
            Point::new(-half, 0.0),
            Point::new(0.0, POINTER_TAIL_LENGTH as f32),
        ]
    }

    /// Rotation about the pivot followed by translation to `center`.
    #[must_use]
    pub fn transform(&self, center: Point) -> Transform2D {
        Transform2D::rotate_degrees(self.rotation_angle as f32)
            .then(&Transform2D::translate(center.x, center.y))
    }

    /// Pointer outline in canvas coordinates.
    #[must_use]
    pub fn polygon(&self, center: Point) -> Vec<Point> {
        let transform = self.transform(center);
        self.local_points()
            .into_iter()
            .map(|p| transform.apply(p))
            .collect()
    }

    /// Tip position in canvas coordinates.
    #[must_use]
    pub fn tip(&self, center: Point) -> Point {
        Point::on_arc(center, self.length as f32, self.rotation_angle as f32)
    }
}

//! Value scale: maps data values onto the gauge arc.
//!
//! A [`Scale`] partitions a [`ValueRange`] into segments and maps any value
//! linearly onto an [`ArcSpan`] (by default the half circle from `-90°` to
//! `90°`). Boundaries between segments become [`Tick`]s.
//!
//! # Examples
//!
//! ```
//! use speedometer::scale::{build_scale, build_ticks, ValueRange};
//!
//! let scale = build_scale(ValueRange::new(0.0, 1000.0), 5).unwrap();
//! assert_eq!(scale.tick_values(), &[0.0, 200.0, 400.0, 600.0, 800.0, 1000.0]);
//! assert_eq!(scale.angle_of(0.0), -90.0);
//! assert_eq!(scale.angle_of(500.0), 0.0);
//! assert_eq!(scale.angle_of(1000.0), 90.0);
//!
//! let ticks = build_ticks(&scale);
//! assert_eq!(ticks.len(), 6);
//! assert!(ticks.iter().all(|t| t.label.is_none()));
//! ```

use crate::error::{GaugeError, Result};
use serde::{Deserialize, Serialize};

/// Start of the default display arc, in degrees.
pub const ARC_START: f64 = -90.0;

/// End of the default display arc, in degrees.
pub const ARC_END: f64 = 90.0;

/// Closed interval of data values shown on the gauge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ValueRange {
    /// Create a range. Validity is checked when a scale is built.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check `min < max` with both bounds and the span finite.
    pub fn validate(&self) -> Result<()> {
        if self.min.is_finite()
            && self.max.is_finite()
            && self.min < self.max
            && self.span().is_finite()
        {
            Ok(())
        } else {
            Err(GaugeError::InvalidRange {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp a value into the range. NaN clamps to `min`.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Whether `value` lies inside the closed range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Angular extent of the gauge arc, in degrees (0 = up, clockwise positive).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSpan {
    /// Angle of the range minimum
    pub start: f64,
    /// Angle of the range maximum
    pub end: f64,
}

impl ArcSpan {
    /// Create an arc span.
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Total sweep in degrees.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end - self.start
    }
}

impl Default for ArcSpan {
    fn default() -> Self {
        Self::new(ARC_START, ARC_END)
    }
}

/// Monotonic mapping from data value to arc angle, with its segment boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    range: ValueRange,
    arc: ArcSpan,
    boundaries: Vec<f64>,
    custom_stops: bool,
}

impl Scale {
    /// Angle for `value`. Values outside the range map beyond the arc ends.
    #[must_use]
    pub fn angle_of(&self, value: f64) -> f64 {
        self.ratio_of(value).mul_add(self.arc.sweep(), self.arc.start)
    }

    /// Normalized position of `value` (0 at `min`, 1 at `max`).
    #[must_use]
    pub fn ratio_of(&self, value: f64) -> f64 {
        (value - self.range.min) / self.range.span()
    }

    /// Segment boundaries in ascending order: `segment_count() + 1` values.
    #[must_use]
    pub fn tick_values(&self) -> &[f64] {
        &self.boundaries
    }

    /// Number of segments.
    #[must_use]
    pub fn segment_count(&self) -> u32 {
        (self.boundaries.len() - 1) as u32
    }

    /// The value range.
    #[must_use]
    pub const fn range(&self) -> ValueRange {
        self.range
    }

    /// The display arc.
    #[must_use]
    pub const fn arc(&self) -> ArcSpan {
        self.arc
    }

    /// Whether the boundaries came from explicit stops.
    #[must_use]
    pub const fn has_custom_stops(&self) -> bool {
        self.custom_stops
    }

    /// Iterate over `(start, end)` value pairs of each segment.
    pub fn segments(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.boundaries.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Builder for [`Scale`].
///
/// ```
/// use speedometer::scale::{ArcSpan, ScaleBuilder, ValueRange};
///
/// let scale = ScaleBuilder::new(ValueRange::new(0.0, 100.0))
///     .segments(4)
///     .arc(ArcSpan::new(-120.0, 120.0))
///     .build()
///     .unwrap();
/// assert_eq!(scale.angle_of(50.0), 0.0);
///
/// let stops = ScaleBuilder::new(ValueRange::new(0.0, 100.0))
///     .stops(vec![0.0, 10.0, 90.0, 100.0])
///     .build()
///     .unwrap();
/// assert_eq!(stops.segment_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScaleBuilder {
    range: ValueRange,
    segments: u32,
    arc: ArcSpan,
    stops: Option<Vec<f64>>,
}

impl ScaleBuilder {
    /// Start a builder over `range` with 5 segments and the default arc.
    #[must_use]
    pub fn new(range: ValueRange) -> Self {
        Self {
            range,
            segments: 5,
            arc: ArcSpan::default(),
            stops: None,
        }
    }

    /// Set the number of equal-width segments.
    #[must_use]
    pub fn segments(mut self, count: u32) -> Self {
        self.segments = count;
        self
    }

    /// Set the display arc.
    #[must_use]
    pub fn arc(mut self, arc: ArcSpan) -> Self {
        self.arc = arc;
        self
    }

    /// Use explicit segment boundaries instead of equal partitions.
    #[must_use]
    pub fn stops(mut self, stops: Vec<f64>) -> Self {
        self.stops = Some(stops);
        self
    }

    /// Validate and build the scale.
    pub fn build(self) -> Result<Scale> {
        self.range.validate()?;

        let (boundaries, custom_stops) = match self.stops {
            Some(stops) => (validate_stops(self.range, stops)?, true),
            None => (partition(self.range, self.segments)?, false),
        };

        Ok(Scale {
            range: self.range,
            arc: self.arc,
            boundaries,
            custom_stops,
        })
    }
}

fn partition(range: ValueRange, segments: u32) -> Result<Vec<f64>> {
    if segments == 0 {
        return Err(GaugeError::InvalidSegmentCount(segments));
    }

    let n = f64::from(segments);
    let span = range.span();
    let mut values: Vec<f64> = (0..segments)
        .map(|i| (f64::from(i) / n).mul_add(span, range.min))
        .collect();
    // The last boundary is pinned so rounding never drifts off the range end.
    values.push(range.max);

    // Too many segments for the float resolution around `min`.
    if values.windows(2).any(|w| w[0] >= w[1]) {
        return Err(GaugeError::InvalidSegmentCount(segments));
    }
    Ok(values)
}

fn validate_stops(range: ValueRange, stops: Vec<f64>) -> Result<Vec<f64>> {
    if stops.len() < 2 {
        return Err(GaugeError::InvalidSegmentStops(format!(
            "need at least 2 stops, got {}",
            stops.len()
        )));
    }
    if stops[0] != range.min || stops[stops.len() - 1] != range.max {
        return Err(GaugeError::InvalidSegmentStops(format!(
            "stops must start at {} and end at {}",
            range.min, range.max
        )));
    }
    if stops.windows(2).any(|w| w[0] >= w[1] || w[1].is_nan()) {
        return Err(GaugeError::InvalidSegmentStops(
            "stops must be strictly ascending".to_string(),
        ));
    }
    Ok(stops)
}

/// Build a scale of `segment_count` equal segments on the default arc.
pub fn build_scale(range: ValueRange, segment_count: u32) -> Result<Scale> {
    ScaleBuilder::new(range).segments(segment_count).build()
}

/// A segment boundary, optionally labeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Data value at the boundary
    pub value: f64,
    /// Angle on the arc, in degrees
    pub angle: f64,
    /// Visible label, if this tick was selected for one
    pub label: Option<String>,
}

/// One unlabeled tick per boundary of `scale`.
#[must_use]
pub fn build_ticks(scale: &Scale) -> Vec<Tick> {
    scale
        .tick_values()
        .iter()
        .map(|&value| Tick {
            value,
            angle: scale.angle_of(value),
            label: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_value_range_validate() {
        assert!(ValueRange::new(0.0, 1.0).validate().is_ok());
        assert!(matches!(
            ValueRange::new(1.0, 1.0).validate(),
            Err(GaugeError::InvalidRange { .. })
        ));
        assert!(ValueRange::new(2.0, 1.0).validate().is_err());
        assert!(ValueRange::new(f64::NAN, 1.0).validate().is_err());
        assert!(ValueRange::new(0.0, f64::INFINITY).validate().is_err());
        // finite bounds whose width overflows
        assert!(matches!(
            ValueRange::new(-1e308, 1e308).validate(),
            Err(GaugeError::InvalidRange { .. })
        ));
        assert!(ValueRange::new(-8e307, 8e307).validate().is_ok());
    }

    #[test]
    fn test_overflowing_span_is_rejected() {
        let err = build_scale(ValueRange::new(-1e308, 1e308), 4).unwrap_err();
        assert!(matches!(err, GaugeError::InvalidRange { .. }));

        let wide = build_scale(ValueRange::new(-8e307, 8e307), 4).unwrap();
        assert_eq!(wide.tick_values()[0], -8e307);
        assert_eq!(wide.angle_of(8e307), ARC_END);
    }

    #[test]
    fn test_segments_finer_than_float_resolution() {
        // neighbouring doubles near 1e15 are 0.125 apart
        let range = ValueRange::new(1e15, 1e15 + 1.0);
        assert!(matches!(
            build_scale(range, 1000),
            Err(GaugeError::InvalidSegmentCount(1000))
        ));

        let scale = build_scale(range, 4).unwrap();
        assert_eq!(scale.tick_values()[1], 1e15 + 0.25);
        assert!(scale.tick_values().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_value_range_clamp() {
        let r = ValueRange::new(0.0, 10.0);
        assert_eq!(r.clamp(-5.0), 0.0);
        assert_eq!(r.clamp(50.0), 10.0);
        assert_eq!(r.clamp(5.0), 5.0);
        assert_eq!(r.clamp(f64::NAN), 0.0);
        assert!(r.contains(10.0));
        assert!(!r.contains(10.1));
    }

    #[test]
    fn test_build_scale_rejects_invalid_range() {
        let err = build_scale(ValueRange::new(1000.0, 0.0), 5).unwrap_err();
        assert!(matches!(err, GaugeError::InvalidRange { .. }));
    }

    #[test]
    fn test_build_scale_rejects_zero_segments() {
        let err = build_scale(ValueRange::new(0.0, 1000.0), 0).unwrap_err();
        assert!(matches!(err, GaugeError::InvalidSegmentCount(0)));
    }

    #[test]
    fn test_single_segment_has_two_ticks() {
        let scale = build_scale(ValueRange::new(0.0, 1000.0), 1).unwrap();
        let ticks = build_ticks(&scale);
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].value, 0.0);
        assert_eq!(ticks[1].value, 1000.0);
        assert_eq!(ticks[0].angle, ARC_START);
        assert_eq!(ticks[1].angle, ARC_END);
    }

    #[test]
    fn test_angle_of_midpoint() {
        let scale = build_scale(ValueRange::new(-50.0, 50.0), 4).unwrap();
        assert_eq!(scale.angle_of(0.0), 0.0);
        assert_eq!(scale.ratio_of(-50.0), 0.0);
        assert_eq!(scale.ratio_of(50.0), 1.0);
    }

    #[test]
    fn test_angle_of_custom_arc() {
        let scale = ScaleBuilder::new(ValueRange::new(0.0, 10.0))
            .arc(ArcSpan::new(-135.0, 135.0))
            .build()
            .unwrap();
        assert_eq!(scale.angle_of(0.0), -135.0);
        assert_eq!(scale.angle_of(10.0), 135.0);
        assert_eq!(scale.arc().sweep(), 270.0);
    }

    #[test]
    fn test_segments_iterator() {
        let scale = build_scale(ValueRange::new(0.0, 30.0), 3).unwrap();
        let segs: Vec<_> = scale.segments().collect();
        assert_eq!(segs, vec![(0.0, 10.0), (10.0, 20.0), (20.0, 30.0)]);
    }

    #[test]
    fn test_custom_stops() {
        let scale = ScaleBuilder::new(ValueRange::new(0.0, 500.0))
            .stops(vec![0.0, 50.0, 450.0, 500.0])
            .build()
            .unwrap();
        assert!(scale.has_custom_stops());
        assert_eq!(scale.segment_count(), 3);
        assert_eq!(scale.angle_of(50.0), -72.0);
    }

    #[test]
    fn test_custom_stops_validation() {
        let range = ValueRange::new(0.0, 100.0);
        let bad = [
            vec![0.0],
            vec![10.0, 100.0],
            vec![0.0, 90.0],
            vec![0.0, 60.0, 40.0, 100.0],
            vec![0.0, 50.0, 50.0, 100.0],
        ];
        for stops in bad {
            let err = ScaleBuilder::new(range).stops(stops.clone()).build();
            assert!(
                matches!(err, Err(GaugeError::InvalidSegmentStops(_))),
                "{stops:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build_scale(ValueRange::new(0.0, 1000.0), 7).unwrap();
        let b = build_scale(ValueRange::new(0.0, 1000.0), 7).unwrap();
        assert_eq!(a, b);
        assert_eq!(build_ticks(&a), build_ticks(&b));
    }

    proptest! {
        #[test]
        fn prop_tick_values_shape(
            min in -1.0e6f64..1.0e6,
            span in 1.0e-3f64..1.0e6,
            n in 1u32..500
        ) {
            let range = ValueRange::new(min, min + span);
            let scale = build_scale(range, n).unwrap();
            let values = scale.tick_values();
            prop_assert_eq!(values.len(), n as usize + 1);
            prop_assert_eq!(values[0], range.min);
            prop_assert_eq!(values[values.len() - 1], range.max);
            prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_large_magnitude_ticks_ascend_or_fail(
            min in -1.0e300f64..1.0e300,
            rel_span in 1.0e-17f64..1.0,
            n in 1u32..2000
        ) {
            let span = (min.abs() * rel_span).max(1.0e-3);
            let range = ValueRange::new(min, min + span);
            prop_assume!(range.validate().is_ok());
            match build_scale(range, n) {
                Ok(scale) => {
                    let values = scale.tick_values();
                    prop_assert_eq!(values.len(), n as usize + 1);
                    prop_assert_eq!(values[0], range.min);
                    prop_assert_eq!(values[values.len() - 1], range.max);
                    prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
                    prop_assert_eq!(scale.angle_of(range.max), ARC_END);
                }
                Err(err) => {
                    prop_assert!(matches!(err, GaugeError::InvalidSegmentCount(c) if c == n));
                }
            }
        }

        #[test]
        fn prop_angle_endpoints_and_monotonic(
            min in -1.0e6f64..1.0e6,
            span in 1.0e-3f64..1.0e6,
            a in 0.0f64..1.0,
            b in 0.0f64..1.0
        ) {
            let range = ValueRange::new(min, min + span);
            let scale = build_scale(range, 5).unwrap();
            prop_assert!((scale.angle_of(range.min) - ARC_START).abs() < 1e-9);
            prop_assert!((scale.angle_of(range.max) - ARC_END).abs() < 1e-9);

            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let v_lo = range.min + lo * span;
            let v_hi = range.min + hi * span;
            prop_assert!(scale.angle_of(v_lo) <= scale.angle_of(v_hi));
        }
    }
}

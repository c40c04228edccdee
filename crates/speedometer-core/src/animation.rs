//! Easing functions and eased values for needle and readout transitions.

use serde::{Deserialize, Serialize};

// =============================================================================
// Easing Functions
// =============================================================================

/// Standard easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Quadratic ease in (slow start)
    EaseIn,
    /// Quadratic ease out (slow end)
    EaseOut,
    /// Quadratic ease in and out (slow start and end)
    #[default]
    EaseInOut,
    /// Cubic ease in
    CubicIn,
    /// Cubic ease out
    CubicOut,
    /// Cubic ease in and out
    CubicInOut,
    /// Exponential ease in
    ExpoIn,
    /// Exponential ease out
    ExpoOut,
    /// Elastic bounce at end
    ElasticOut,
    /// Bounce at end
    BounceOut,
    /// Back ease out (overshoots then returns)
    BackOut,
}

/// Transition names as written in gauge configuration, and what they map to.
const NAMED_EASINGS: &[(&str, Easing)] = &[
    ("easeLinear", Easing::Linear),
    ("easeQuadIn", Easing::EaseIn),
    ("easeQuadOut", Easing::EaseOut),
    ("easeQuadInOut", Easing::EaseInOut),
    ("easeQuad", Easing::EaseInOut),
    ("easeCubicIn", Easing::CubicIn),
    ("easeCubicOut", Easing::CubicOut),
    ("easeCubicInOut", Easing::CubicInOut),
    ("easeCubic", Easing::CubicInOut),
    ("easeExpIn", Easing::ExpoIn),
    ("easeExpOut", Easing::ExpoOut),
    ("easeElastic", Easing::ElasticOut),
    ("easeElasticOut", Easing::ElasticOut),
    ("easeBounce", Easing::BounceOut),
    ("easeBounceOut", Easing::BounceOut),
    ("easeBackOut", Easing::BackOut),
];

impl Easing {
    /// Look up an easing by its configuration name (e.g. `"easeQuadInOut"`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        NAMED_EASINGS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, easing)| *easing)
    }

    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::EaseInOut => Self::ease_in_out_quad(t),
            Self::CubicIn => t * t * t,
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::CubicInOut => Self::ease_in_out_cubic(t),
            Self::ExpoIn => Self::ease_in_expo(t),
            Self::ExpoOut => Self::ease_out_expo(t),
            Self::ElasticOut => Self::elastic_out(t),
            Self::BounceOut => Self::bounce_out(t),
            Self::BackOut => Self::back_out(t),
        }
    }

    fn ease_in_out_quad(t: f64) -> f64 {
        if t < 0.5 {
            2.0 * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(2) / 2.0
        }
    }

    fn ease_in_out_cubic(t: f64) -> f64 {
        if t < 0.5 {
            4.0 * t * t * t
        } else {
            1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
        }
    }

    fn ease_in_expo(t: f64) -> f64 {
        if t == 0.0 {
            0.0
        } else {
            10.0f64.mul_add(t, -10.0).exp2()
        }
    }

    fn ease_out_expo(t: f64) -> f64 {
        if (t - 1.0).abs() < f64::EPSILON {
            1.0
        } else {
            1.0 - (-10.0 * t).exp2()
        }
    }

    fn elastic_out(t: f64) -> f64 {
        if t == 0.0 || (t - 1.0).abs() < f64::EPSILON {
            t
        } else {
            let c4 = (2.0 * std::f64::consts::PI) / 3.0;
            (-10.0 * t).exp2().mul_add((t.mul_add(10.0, -0.75) * c4).sin(), 1.0)
        }
    }

    fn bounce_out(t: f64) -> f64 {
        const N1: f64 = 7.5625;
        const D1: f64 = 2.75;

        if t < 1.0 / D1 {
            N1 * t * t
        } else if t < 2.0 / D1 {
            let t = t - 1.5 / D1;
            (N1 * t).mul_add(t, 0.75)
        } else if t < 2.5 / D1 {
            let t = t - 2.25 / D1;
            (N1 * t).mul_add(t, 0.9375)
        } else {
            let t = t - 2.625 / D1;
            (N1 * t).mul_add(t, 0.984_375)
        }
    }

    fn back_out(t: f64) -> f64 {
        const C1: f64 = 1.70158;
        const C3: f64 = C1 + 1.0;
        C1.mul_add((t - 1.0).powi(2), C3.mul_add((t - 1.0).powi(3), 1.0))
    }
}

// =============================================================================
// EasedValue
// =============================================================================

/// An easing-based animated value.
#[derive(Debug, Clone, PartialEq)]
pub struct EasedValue {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration in seconds
    pub duration: f64,
    /// Elapsed time
    pub elapsed: f64,
    /// Easing function
    pub easing: Easing,
}

impl EasedValue {
    /// Create new eased animation.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing: Easing::EaseInOut,
        }
    }

    /// A settled value that is already at `value`.
    #[must_use]
    pub fn settled(value: f64) -> Self {
        Self::new(value, value, 0.0)
    }

    /// Set easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        let eased = self.easing.apply(self.progress());
        (self.to - self.from).mul_add(eased, self.from)
    }

    /// Whether animation is complete.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Update animation.
    pub fn update(&mut self, dt: f64) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
    }

    /// Restart towards a new target from wherever the value currently is.
    pub fn retarget(&mut self, to: f64) {
        self.from = self.value();
        self.to = to;
        self.elapsed = 0.0;
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Easing tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_easing_linear() {
        assert!((Easing::Linear.apply(0.0) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(0.5) - 0.5).abs() < 0.001);
        assert!((Easing::Linear.apply(1.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_clamps_input() {
        assert!((Easing::Linear.apply(-0.5) - 0.0).abs() < 0.001);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_easing_quad_shapes() {
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_easing_endpoints() {
        for (_, easing) in NAMED_EASINGS {
            assert!(easing.apply(0.0).abs() < 0.001, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_easing_default_is_quad_in_out() {
        assert_eq!(Easing::default(), Easing::EaseInOut);
        assert_eq!(Easing::from_name("easeQuadInOut"), Some(Easing::default()));
    }

    #[test]
    fn test_easing_from_name() {
        assert_eq!(Easing::from_name("easeLinear"), Some(Easing::Linear));
        assert_eq!(Easing::from_name("easeElastic"), Some(Easing::ElasticOut));
        assert_eq!(Easing::from_name("porumai-transition"), None);
    }

    // -------------------------------------------------------------------------
    // EasedValue tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_eased_value_progression() {
        let mut v = EasedValue::new(0.0, 100.0, 1.0).with_easing(Easing::Linear);
        assert_eq!(v.value(), 0.0);
        v.update(0.25);
        assert!((v.value() - 25.0).abs() < 1e-9);
        v.update(10.0);
        assert!(v.is_complete());
        assert_eq!(v.value(), 100.0);
    }

    #[test]
    fn test_eased_value_zero_duration_is_immediate() {
        let v = EasedValue::new(0.0, 100.0, 0.0);
        assert!(v.is_complete());
        assert_eq!(v.value(), 100.0);
    }

    #[test]
    fn test_eased_value_retarget_continues_from_current() {
        let mut v = EasedValue::new(0.0, 100.0, 1.0).with_easing(Easing::Linear);
        v.update(0.5);
        v.retarget(0.0);
        assert!((v.from - 50.0).abs() < 1e-9);
        assert_eq!(v.to, 0.0);
        assert_eq!(v.progress(), 0.0);
    }

    #[test]
    fn test_eased_value_settled() {
        let v = EasedValue::settled(42.0);
        assert!(v.is_complete());
        assert_eq!(v.value(), 42.0);
    }

    #[test]
    fn test_eased_value_ignores_negative_dt() {
        let mut v = EasedValue::new(0.0, 1.0, 1.0);
        v.update(-5.0);
        assert_eq!(v.elapsed, 0.0);
    }
}

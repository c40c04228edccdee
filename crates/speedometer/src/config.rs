//! Gauge configuration.
//!
//! Every field has a default, so a YAML document only needs the fields it
//! changes:
//!
//! ```yaml
//! value: 333
//! max_value: 500
//! segments: 10
//! max_segment_labels: 5
//! value_format: "d"
//! current_value_text: "Speed: ${value} km/h"
//! ```

use crate::error::{GaugeError, Result};
use crate::format::ValueFormat;
use crate::needle::calculate_needle_height;
use crate::scale::ValueRange;
use serde::{Deserialize, Serialize};
use speedometer_core::{Color, Easing};

/// Where a custom segment label sits relative to the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LabelPosition {
    /// Inside the colored ring
    #[default]
    Inside,
    /// Outside the ring, at the tick label radius
    Outside,
}

/// Text drawn over one segment instead of (or alongside) tick labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomSegmentLabel {
    /// Label text
    pub text: String,
    /// Placement relative to the ring
    #[serde(default)]
    pub position: LabelPosition,
    /// Font size in pixels, defaults to the tick label size
    #[serde(default)]
    pub font_size: Option<f64>,
    /// CSS color, defaults to the text color
    #[serde(default)]
    pub color: Option<String>,
}

/// Declarative gauge configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaugeConfig {
    /// Current value; clamped into the range for display
    pub value: f64,
    /// Range minimum
    pub min_value: f64,
    /// Range maximum
    pub max_value: f64,
    /// Number of equal segments, ignored when custom stops are set
    pub segments: u32,
    /// Upper bound on labeled intervals; `None` labels every boundary
    pub max_segment_labels: Option<u32>,
    /// Explicit segment boundaries
    pub custom_segment_stops: Vec<f64>,
    /// Per-segment labels
    pub custom_segment_labels: Vec<CustomSegmentLabel>,

    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
    /// Horizontal padding
    pub padding_horizontal: f64,
    /// Vertical padding
    pub padding_vertical: f64,
    /// Thickness of the colored ring
    pub ring_width: f64,
    /// Needle length as a fraction of the radius
    pub needle_height_ratio: f64,

    /// Needle fill
    pub needle_color: String,
    /// Color of the first segment
    pub start_color: String,
    /// Color the segments blend towards
    pub end_color: String,
    /// Per-segment overrides of the blended colors
    pub segment_colors: Vec<String>,
    /// Label and readout color
    pub text_color: String,
    /// Tick label font size
    pub label_font_size: f64,
    /// Readout font size
    pub value_text_font_size: f64,

    /// Format for labels and the readout
    pub value_format: String,
    /// Readout template
    pub current_value_text: String,
    /// Placeholder substituted in the readout template
    pub current_value_placeholder_style: String,

    /// Easing name, e.g. `easeQuadInOut`
    pub needle_transition: String,
    /// Transition duration in milliseconds
    pub needle_transition_duration: u64,

    /// Rebuild geometry on every update
    pub force_render: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            value: 0.0,
            min_value: 0.0,
            max_value: 1000.0,
            segments: 5,
            max_segment_labels: None,
            custom_segment_stops: Vec::new(),
            custom_segment_labels: Vec::new(),
            width: 300.0,
            height: 300.0,
            padding_horizontal: 0.0,
            padding_vertical: 0.0,
            ring_width: 60.0,
            needle_height_ratio: 0.9,
            needle_color: "steelblue".to_string(),
            start_color: "#FF471A".to_string(),
            end_color: "#33CC33".to_string(),
            segment_colors: Vec::new(),
            text_color: "#666".to_string(),
            label_font_size: 14.0,
            value_text_font_size: 16.0,
            value_format: String::new(),
            current_value_text: "${value}".to_string(),
            current_value_placeholder_style: "${value}".to_string(),
            needle_transition: "easeQuadInOut".to_string(),
            needle_transition_duration: 500,
            force_render: false,
        }
    }
}

impl GaugeConfig {
    /// Parse a configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// The configured value range (unchecked).
    #[must_use]
    pub const fn range(&self) -> ValueRange {
        ValueRange::new(self.min_value, self.max_value)
    }

    /// Check every field that can make geometry construction fail.
    ///
    /// Custom stops are checked when the scale is built.
    pub fn validate(&self) -> Result<()> {
        self.range().validate()?;
        if self.custom_segment_stops.is_empty() && self.segments == 0 {
            return Err(GaugeError::InvalidSegmentCount(self.segments));
        }
        calculate_needle_height(self.needle_height_ratio, 1.0)?;
        self.value_format()?;
        self.palette()?;
        Color::from_css(&self.needle_color)?;
        Color::from_css(&self.text_color)?;
        for label in &self.custom_segment_labels {
            if let Some(color) = &label.color {
                Color::from_css(color)?;
            }
        }
        Ok(())
    }

    /// Parsed value format.
    pub fn value_format(&self) -> Result<ValueFormat> {
        ValueFormat::parse(&self.value_format)
    }

    /// Parsed start color, end color and per-segment overrides.
    pub fn palette(&self) -> Result<(Color, Color, Vec<Color>)> {
        let start = Color::from_css(&self.start_color)?;
        let end = Color::from_css(&self.end_color)?;
        let overrides = self
            .segment_colors
            .iter()
            .map(|c| Color::from_css(c))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok((start, end, overrides))
    }

    /// Easing for the needle transition, `None` for unknown names.
    #[must_use]
    pub fn easing(&self) -> Option<Easing> {
        Easing::from_name(&self.needle_transition)
    }

    /// Transition duration in seconds.
    #[must_use]
    pub fn transition_secs(&self) -> f64 {
        self.needle_transition_duration as f64 / 1000.0
    }

    /// Whether `other` produces the same geometry, ignoring the value, the
    /// readout text and the transition.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.shape() == other.shape()
    }

    fn shape(&self) -> Self {
        Self {
            value: 0.0,
            current_value_text: String::new(),
            current_value_placeholder_style: String::new(),
            needle_transition: String::new(),
            needle_transition_duration: 0,
            force_render: false,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GaugeConfig::default();
        assert_eq!(config.segments, 5);
        assert_eq!(config.max_value, 1000.0);
        assert_eq!(config.needle_height_ratio, 0.9);
        assert_eq!(config.easing(), Some(Easing::EaseInOut));
        assert_eq!(config.transition_secs(), 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = GaugeConfig::from_yaml(
            r#"
value: 333
max_value: 500
segments: 10
max_segment_labels: 5
value_format: "d"
custom_segment_labels:
  - text: Low
    position: OUTSIDE
  - text: High
"#,
        )
        .unwrap();
        assert_eq!(config.value, 333.0);
        assert_eq!(config.max_value, 500.0);
        assert_eq!(config.min_value, 0.0);
        assert_eq!(config.max_segment_labels, Some(5));
        assert_eq!(config.custom_segment_labels[0].position, LabelPosition::Outside);
        assert_eq!(config.custom_segment_labels[1].position, LabelPosition::Inside);
        assert_eq!(config.start_color, "#FF471A");
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = GaugeConfig::default();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(GaugeConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_from_yaml_type_error() {
        let err = GaugeConfig::from_yaml("segments: many").unwrap_err();
        assert!(matches!(err, GaugeError::Yaml(_)));
    }

    #[test]
    fn test_validate_errors() {
        let cases = [
            GaugeConfig {
                min_value: 10.0,
                max_value: 10.0,
                ..GaugeConfig::default()
            },
            GaugeConfig {
                segments: 0,
                ..GaugeConfig::default()
            },
            GaugeConfig {
                needle_height_ratio: 1.1,
                ..GaugeConfig::default()
            },
            GaugeConfig {
                value_format: "zz".to_string(),
                ..GaugeConfig::default()
            },
            GaugeConfig {
                segment_colors: vec!["notacolor".to_string()],
                ..GaugeConfig::default()
            },
        ];
        let errors: Vec<_> = cases.iter().map(|c| c.validate().unwrap_err()).collect();
        assert!(matches!(errors[0], GaugeError::InvalidRange { .. }));
        assert!(matches!(errors[1], GaugeError::InvalidSegmentCount(0)));
        assert!(matches!(errors[2], GaugeError::InvalidHeightRatio(_)));
        assert!(matches!(errors[3], GaugeError::InvalidFormat(_)));
        assert!(matches!(errors[4], GaugeError::InvalidColor(_)));
    }

    #[test]
    fn test_zero_segments_allowed_with_stops() {
        let config = GaugeConfig {
            segments: 0,
            custom_segment_stops: vec![0.0, 500.0, 1000.0],
            ..GaugeConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_same_shape() {
        let base = GaugeConfig::default();
        let value_only = GaugeConfig {
            value: 700.0,
            current_value_text: "Now: ${value}".to_string(),
            needle_transition: "easeLinear".to_string(),
            ..GaugeConfig::default()
        };
        assert!(base.same_shape(&value_only));

        let reshaped = GaugeConfig {
            segments: 6,
            ..GaugeConfig::default()
        };
        assert!(!base.same_shape(&reshaped));
    }
}

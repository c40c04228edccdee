//! Error types for gauge configuration and geometry.

use speedometer_core::ColorParseError;
use thiserror::Error;

/// Errors raised by the gauge. All of them describe bad configuration;
/// none are transient.
#[derive(Debug, Error)]
pub enum GaugeError {
    /// `min` is not strictly below `max`, or a bound is not finite.
    #[error("invalid range: min ({min}) must be less than max ({max})")]
    InvalidRange {
        /// Lower bound as given
        min: f64,
        /// Upper bound as given
        max: f64,
    },

    /// Segment count below 1.
    #[error("invalid segment count: {0} (must be at least 1)")]
    InvalidSegmentCount(u32),

    /// Needle height ratio outside `(0, 1]`.
    #[error("invalid needle height ratio: {0} (must be in (0, 1])")]
    InvalidHeightRatio(f64),

    /// Custom segment stops that do not describe the range.
    #[error("invalid segment stops: {0}")]
    InvalidSegmentStops(String),

    /// Unsupported value format string.
    #[error("invalid value format: {0:?}")]
    InvalidFormat(String),

    /// Unparseable color in the configuration.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    /// YAML (de)serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// Result alias for gauge operations.
pub type Result<T> = std::result::Result<T, GaugeError>;

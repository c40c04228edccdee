//! Speedometer gauge.
//!
//! The pure core maps a value range onto a half-circle arc:
//! - [`scale`]: value to angle mapping and segment boundaries
//! - [`ticks`]: which boundaries get labels when space is limited
//! - [`needle`]: needle length and rotation
//!
//! On top of it, [`GaugeGeometry`] turns a [`GaugeConfig`] into draw-ready
//! data and [`Speedometer`] animates it and paints onto a
//! [`speedometer_core::Canvas`].
//!
//! ```
//! use speedometer::{GaugeConfig, Speedometer};
//!
//! let config = GaugeConfig::from_yaml("value: 477.7\nvalue_format: d").unwrap();
//! let gauge = Speedometer::new(config).unwrap();
//! assert_eq!(gauge.value_text(), "478");
//! assert_eq!(gauge.frame().segments.len(), 5);
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod needle;
pub mod palette;
pub mod scale;
pub mod ticks;
pub mod widget;

pub use config::{CustomSegmentLabel, GaugeConfig, LabelPosition};
pub use error::{GaugeError, Result};
pub use format::{format_value, render_value_text, ValueFormat};
pub use geometry::{
    CustomLabelPlacement, GaugeFrame, GaugeGeometry, GaugeLayout, SegmentArc, TickLabel,
};
pub use needle::{calculate_needle_angle, calculate_needle_height, NeedleGeometry};
pub use palette::segment_colors;
pub use scale::{build_scale, build_ticks, ArcSpan, Scale, ScaleBuilder, Tick, ValueRange};
pub use ticks::{label_ticks, select_label_count, select_labels};
pub use widget::{Speedometer, UpdateKind};

//! Adapter from [`GaugeConfig`] to draw-ready geometry.
//!
//! [`GaugeGeometry::build`] runs the scale builder and the tick selector
//! once per configuration. Value changes only need
//! [`GaugeGeometry::needle`] and [`GaugeGeometry::frame`], which reuse the
//! built scale.

use crate::config::{GaugeConfig, LabelPosition};
use crate::error::Result;
use crate::format::ValueFormat;
use crate::needle::{calculate_needle_angle, calculate_needle_height, NeedleGeometry};
use crate::palette::segment_colors;
use crate::scale::{build_ticks, Scale, ScaleBuilder, Tick};
use crate::ticks::select_labels;
use serde::{Deserialize, Serialize};
use speedometer_core::{Color, Point, Rect, Size};

/// Gap between the gauge radius and the outer edge of the ring.
pub const RING_INSET: f64 = 20.0;

/// Gap between the gauge radius and the tick labels.
pub const LABEL_INSET: f64 = 10.0;

/// Vertical offset of the readout below the pivot.
pub const VALUE_TEXT_OFFSET: f64 = 23.0;

/// Placement of the gauge inside its canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeLayout {
    /// Canvas size
    pub size: Size,
    /// Canvas area inside the paddings
    pub bounds: Rect,
    /// Needle pivot and arc center
    pub center: Point,
    /// Gauge radius
    pub radius: f64,
    /// Outer edge of the colored ring
    pub outer_radius: f64,
    /// Inner edge of the colored ring
    pub inner_radius: f64,
    /// Radius tick labels sit on
    pub label_radius: f64,
    /// Anchor of the readout text
    pub value_text_position: Point,
}

impl GaugeLayout {
    /// Layout for a canvas of `width` x `height` with the given paddings.
    #[must_use]
    pub fn new(width: f64, height: f64, padding: (f64, f64), ring_width: f64) -> Self {
        let size = Size::new(width as f32, height as f32);
        let bounds = Rect::from_size(size).inset_xy(padding.0 as f32, padding.1 as f32);
        let radius = f64::from(bounds.width) / 2.0;
        let outer_radius = (radius - RING_INSET).max(0.0);
        let inner_radius = (outer_radius - ring_width).max(0.0);
        let center = Point::new(bounds.x + radius as f32, bounds.y + radius as f32);
        Self {
            size,
            bounds,
            center,
            radius,
            outer_radius,
            inner_radius,
            label_radius: (radius - LABEL_INSET).max(0.0),
            value_text_position: Point::new(center.x, center.y + VALUE_TEXT_OFFSET as f32),
        }
    }

    /// Layout for a configuration.
    #[must_use]
    pub fn from_config(config: &GaugeConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            (config.padding_horizontal, config.padding_vertical),
            config.ring_width,
        )
    }
}

/// One colored slice of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentArc {
    /// Angle of the lower boundary
    pub start_angle: f64,
    /// Angle of the upper boundary
    pub end_angle: f64,
    /// Index into the segment colors
    pub color_index: usize,
}

impl SegmentArc {
    /// Angle halfway along the slice.
    #[must_use]
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// A visible tick label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    /// Boundary value
    pub value: f64,
    /// Angle on the arc
    pub angle: f64,
    /// Formatted text
    pub text: String,
}

/// A custom segment label resolved to a position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomLabelPlacement {
    /// Label text
    pub text: String,
    /// Anchor point
    pub position: Point,
    /// Font size in pixels
    pub font_size: f64,
    /// Fill color
    pub color: Color,
}

/// Complete draw data for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaugeFrame {
    /// Ring slices in ascending value order
    pub segments: Vec<SegmentArc>,
    /// Visible tick labels
    pub labels: Vec<TickLabel>,
    /// Needle for the displayed value
    pub needle: NeedleGeometry,
    /// Readout text
    pub value_text: String,
}

/// Geometry derived from one configuration.
#[derive(Debug, Clone)]
pub struct GaugeGeometry {
    scale: Scale,
    ticks: Vec<Tick>,
    labels: Vec<TickLabel>,
    segments: Vec<SegmentArc>,
    colors: Vec<Color>,
    custom_labels: Vec<CustomLabelPlacement>,
    layout: GaugeLayout,
    needle_length: f64,
    format: ValueFormat,
    needle_color: Color,
    text_color: Color,
    label_font_size: f64,
    value_text_font_size: f64,
}

impl GaugeGeometry {
    /// Validate `config` and compute its geometry.
    pub fn build(config: &GaugeConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = ScaleBuilder::new(config.range()).segments(config.segments);
        if !config.custom_segment_stops.is_empty() {
            builder = builder.stops(config.custom_segment_stops.clone());
        }
        let scale = builder.build()?;
        let format = config.value_format()?;

        let labels = select_labels(&scale, config.max_segment_labels, &format)?
            .into_iter()
            .filter_map(|tick| {
                tick.label.map(|text| TickLabel {
                    value: tick.value,
                    angle: tick.angle,
                    text,
                })
            })
            .collect();

        let segments: Vec<SegmentArc> = scale
            .segments()
            .enumerate()
            .map(|(color_index, (lo, hi))| SegmentArc {
                start_angle: scale.angle_of(lo),
                end_angle: scale.angle_of(hi),
                color_index,
            })
            .collect();

        let (start, end, overrides) = config.palette()?;
        let colors = segment_colors(start, end, segments.len(), &overrides);

        let layout = GaugeLayout::from_config(config);
        let needle_length = calculate_needle_height(config.needle_height_ratio, layout.radius)?;
        let text_color = Color::from_css(&config.text_color)?;

        let custom_labels = place_custom_labels(config, &segments, &layout, text_color)?;

        Ok(Self {
            ticks: build_ticks(&scale),
            scale,
            labels,
            segments,
            colors,
            custom_labels,
            layout,
            needle_length,
            format,
            needle_color: Color::from_css(&config.needle_color)?,
            text_color,
            label_font_size: config.label_font_size,
            value_text_font_size: config.value_text_font_size,
        })
    }

    /// Needle for `value`; out-of-range values pin to the arc ends.
    #[must_use]
    pub fn needle(&self, value: f64) -> NeedleGeometry {
        let range = self.scale.range();
        NeedleGeometry {
            rotation_angle: calculate_needle_angle(value, &range, &self.scale),
            length: self.needle_length,
        }
    }

    /// Draw data for `value` with the given readout text.
    #[must_use]
    pub fn frame(&self, value: f64, value_text: String) -> GaugeFrame {
        GaugeFrame {
            segments: self.segments.clone(),
            labels: self.labels.clone(),
            needle: self.needle(value),
            value_text,
        }
    }

    /// Format a value with the configured format.
    #[must_use]
    pub fn format_value(&self, value: f64) -> String {
        self.format.format(value)
    }

    /// The value scale.
    #[must_use]
    pub const fn scale(&self) -> &Scale {
        &self.scale
    }

    /// Every boundary tick, labeled or not.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Visible tick labels.
    #[must_use]
    pub fn labels(&self) -> &[TickLabel] {
        &self.labels
    }

    /// Ring slices.
    #[must_use]
    pub fn segments(&self) -> &[SegmentArc] {
        &self.segments
    }

    /// Fill color per segment.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Custom segment labels with resolved positions.
    #[must_use]
    pub fn custom_labels(&self) -> &[CustomLabelPlacement] {
        &self.custom_labels
    }

    /// Canvas layout.
    #[must_use]
    pub const fn layout(&self) -> &GaugeLayout {
        &self.layout
    }

    /// Needle fill.
    #[must_use]
    pub const fn needle_color(&self) -> Color {
        self.needle_color
    }

    /// Label and readout color.
    #[must_use]
    pub const fn text_color(&self) -> Color {
        self.text_color
    }

    /// Tick label font size.
    #[must_use]
    pub const fn label_font_size(&self) -> f64 {
        self.label_font_size
    }

    /// Readout font size.
    #[must_use]
    pub const fn value_text_font_size(&self) -> f64 {
        self.value_text_font_size
    }
}

// Label i sits over segment i; labels past the last segment are dropped.
fn place_custom_labels(
    config: &GaugeConfig,
    segments: &[SegmentArc],
    layout: &GaugeLayout,
    text_color: Color,
) -> Result<Vec<CustomLabelPlacement>> {
    config
        .custom_segment_labels
        .iter()
        .zip(segments)
        .map(|(label, segment)| {
            let radius = match label.position {
                LabelPosition::Inside => (layout.inner_radius + layout.outer_radius) / 2.0,
                LabelPosition::Outside => layout.label_radius,
            };
            let color = match &label.color {
                Some(css) => Color::from_css(css)?,
                None => text_color,
            };
            Ok(CustomLabelPlacement {
                text: label.text.clone(),
                position: Point::on_arc(layout.center, radius as f32, segment.mid_angle() as f32),
                font_size: label.font_size.unwrap_or(config.label_font_size),
                color,
            })
        })
        .collect()
}

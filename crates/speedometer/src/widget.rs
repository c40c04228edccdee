//! Speedometer widget.
//!
//! Owns a [`GaugeConfig`] and its [`GaugeGeometry`], animates the needle and
//! the readout between values, and paints onto any [`Canvas`].
//!
//! ```
//! use speedometer::{GaugeConfig, Speedometer, UpdateKind};
//!
//! let mut gauge = Speedometer::new(GaugeConfig::default()).unwrap();
//! let kind = gauge.set_value(500.0).unwrap();
//! assert_eq!(kind, UpdateKind::ValueOnly);
//!
//! gauge.advance(1.0);
//! assert_eq!(gauge.displayed_value(), 500.0);
//! assert_eq!(gauge.frame().needle.rotation_angle, 0.0);
//! ```

use crate::config::GaugeConfig;
use crate::error::Result;
use crate::format::render_value_text;
use crate::geometry::{GaugeFrame, GaugeGeometry};
use log::{debug, warn};
use speedometer_core::{
    annular_sector, Canvas, EasedValue, Easing, FontWeight, Point, SvgCanvas, TextAnchor,
    TextStyle,
};

/// Degrees of arc per chord when flattening ring segments.
const DEGREES_PER_STEP: f64 = 3.0;

/// What an [`Speedometer::update`] call had to recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    /// Scale, ticks and segments were rebuilt
    Rebuild,
    /// Only the needle target and the readout changed
    ValueOnly,
    /// Nothing changed
    Unchanged,
}

/// Animated speedometer gauge.
#[derive(Debug, Clone)]
pub struct Speedometer {
    config: GaugeConfig,
    geometry: GaugeGeometry,
    needle: EasedValue,
}

impl Speedometer {
    /// Create a gauge with the needle resting at the configured value.
    pub fn new(config: GaugeConfig) -> Result<Self> {
        let geometry = GaugeGeometry::build(&config)?;
        let resting = geometry.scale().range().clamp(config.value);
        let needle = EasedValue::settled(resting).with_easing(resolve_easing(&config));
        debug!(
            "speedometer created: {} segments, {} labels",
            geometry.segments().len(),
            geometry.labels().len()
        );
        Ok(Self {
            config,
            geometry,
            needle,
        })
    }

    /// Apply a new configuration.
    ///
    /// Geometry is rebuilt when a shape field changed or `force_render` is
    /// set. On error the gauge keeps its previous state.
    pub fn update(&mut self, config: GaugeConfig) -> Result<UpdateKind> {
        if !config.force_render && config == self.config {
            return Ok(UpdateKind::Unchanged);
        }

        let kind = if config.force_render || !config.same_shape(&self.config) {
            self.geometry = GaugeGeometry::build(&config)?;
            debug!(
                "speedometer geometry rebuilt: {} segments, {} labels",
                self.geometry.segments().len(),
                self.geometry.labels().len()
            );
            UpdateKind::Rebuild
        } else {
            debug!("speedometer value update: {}", config.value);
            UpdateKind::ValueOnly
        };

        let target = self.geometry.scale().range().clamp(config.value);
        self.needle.retarget(target);
        self.needle.easing = resolve_easing(&config);
        self.needle.duration = config.transition_secs();
        self.config = config;
        Ok(kind)
    }

    /// Move the needle towards `value`.
    pub fn set_value(&mut self, value: f64) -> Result<UpdateKind> {
        self.update(GaugeConfig {
            value,
            ..self.config.clone()
        })
    }

    /// Advance the transition by `dt_secs`.
    pub fn advance(&mut self, dt_secs: f64) {
        self.needle.update(dt_secs);
    }

    /// Whether the needle is still moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.needle.is_complete()
    }

    /// Value the needle currently shows.
    #[must_use]
    pub fn displayed_value(&self) -> f64 {
        self.needle.value()
    }

    /// Readout for the displayed value.
    #[must_use]
    pub fn value_text(&self) -> String {
        render_value_text(
            &self.config.current_value_text,
            &self.config.current_value_placeholder_style,
            &self.geometry.format_value(self.displayed_value()),
        )
    }

    /// Draw data for the current animation state.
    #[must_use]
    pub fn frame(&self) -> GaugeFrame {
        self.geometry.frame(self.displayed_value(), self.value_text())
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &GaugeConfig {
        &self.config
    }

    /// Current geometry.
    #[must_use]
    pub const fn geometry(&self) -> &GaugeGeometry {
        &self.geometry
    }

    /// Paint segments, labels, needle and readout, back to front.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        let geometry = &self.geometry;
        let layout = geometry.layout();
        let frame = self.frame();

        for segment in &frame.segments {
            let sweep = (segment.end_angle - segment.start_angle).abs();
            let steps = ((sweep / DEGREES_PER_STEP).ceil() as usize).max(2);
            let outline = annular_sector(
                layout.center,
                layout.inner_radius as f32,
                layout.outer_radius as f32,
                segment.start_angle as f32,
                segment.end_angle as f32,
                steps,
            );
            if let Some(color) = geometry.colors().get(segment.color_index) {
                canvas.fill_polygon(&outline, *color);
            }
        }

        let label_style = TextStyle {
            size: geometry.label_font_size() as f32,
            color: geometry.text_color(),
            weight: FontWeight::Bold,
            anchor: TextAnchor::Middle,
        };
        for label in &frame.labels {
            let position =
                Point::on_arc(layout.center, layout.label_radius as f32, label.angle as f32);
            canvas.draw_text(&label.text, position, &label_style);
        }

        for label in geometry.custom_labels() {
            let style = TextStyle {
                size: label.font_size as f32,
                color: label.color,
                ..label_style.clone()
            };
            canvas.draw_text(&label.text, label.position, &style);
        }

        canvas.push_transform(frame.needle.transform(layout.center));
        canvas.fill_polygon(&frame.needle.local_points(), geometry.needle_color());
        canvas.pop_transform();

        let value_style = TextStyle {
            size: geometry.value_text_font_size() as f32,
            ..label_style
        };
        canvas.draw_text(&frame.value_text, layout.value_text_position, &value_style);
    }

    /// Render the current state as an SVG document.
    #[must_use]
    pub fn render_svg(&self) -> String {
        let mut canvas = SvgCanvas::new(self.geometry.layout().size);
        self.paint(&mut canvas);
        canvas.finish()
    }
}

fn resolve_easing(config: &GaugeConfig) -> Easing {
    config.easing().unwrap_or_else(|| {
        warn!(
            "unknown needle transition {:?}, falling back to {:?}",
            config.needle_transition,
            Easing::default()
        );
        Easing::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaugeError;
    use speedometer_core::{DrawCommand, RecordingCanvas};

    fn gauge() -> Speedometer {
        Speedometer::new(GaugeConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rests_at_value() {
        let g = Speedometer::new(GaugeConfig {
            value: 333.0,
            ..GaugeConfig::default()
        })
        .unwrap();
        assert_eq!(g.displayed_value(), 333.0);
        assert!(!g.is_animating());
        assert_eq!(g.value_text(), "333");
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let err = Speedometer::new(GaugeConfig {
            needle_height_ratio: 0.0,
            ..GaugeConfig::default()
        })
        .unwrap_err();
        assert!(matches!(err, GaugeError::InvalidHeightRatio(_)));
    }

    #[test]
    fn test_unchanged_update() {
        let mut g = gauge();
        assert_eq!(g.update(GaugeConfig::default()).unwrap(), UpdateKind::Unchanged);
    }

    #[test]
    fn test_value_only_update_animates() {
        let mut g = gauge();
        assert_eq!(g.set_value(1000.0).unwrap(), UpdateKind::ValueOnly);
        assert!(g.is_animating());
        g.advance(0.25);
        let midway = g.displayed_value();
        assert!(midway > 0.0 && midway < 1000.0);
        g.advance(0.25);
        assert!(!g.is_animating());
        assert_eq!(g.displayed_value(), 1000.0);
        assert_eq!(g.frame().needle.rotation_angle, 90.0);
    }

    #[test]
    fn test_value_is_clamped() {
        let mut g = gauge();
        g.set_value(-50.0).unwrap();
        g.advance(1.0);
        assert_eq!(g.displayed_value(), 0.0);
    }

    #[test]
    fn test_shape_update_rebuilds() {
        let mut g = gauge();
        let kind = g
            .update(GaugeConfig {
                segments: 10,
                ..GaugeConfig::default()
            })
            .unwrap();
        assert_eq!(kind, UpdateKind::Rebuild);
        assert_eq!(g.geometry().segments().len(), 10);
    }

    #[test]
    fn test_force_render_rebuilds() {
        let config = GaugeConfig {
            force_render: true,
            ..GaugeConfig::default()
        };
        let mut g = Speedometer::new(config.clone()).unwrap();
        assert_eq!(g.update(config).unwrap(), UpdateKind::Rebuild);
        assert_eq!(g.set_value(10.0).unwrap(), UpdateKind::Rebuild);
    }

    #[test]
    fn test_failed_update_keeps_state() {
        let mut g = gauge();
        let bad = GaugeConfig {
            min_value: 2000.0,
            ..GaugeConfig::default()
        };
        assert!(g.update(bad).is_err());
        assert_eq!(g.config(), &GaugeConfig::default());
        assert_eq!(g.geometry().segments().len(), 5);
    }

    #[test]
    fn test_unknown_transition_falls_back() {
        let mut g = Speedometer::new(GaugeConfig {
            needle_transition: "porumai-transition".to_string(),
            ..GaugeConfig::default()
        })
        .unwrap();
        g.set_value(100.0).unwrap();
        g.advance(1.0);
        assert_eq!(g.displayed_value(), 100.0);
    }

    #[test]
    fn test_paint_order() {
        let g = gauge();
        let mut canvas = RecordingCanvas::new();
        g.paint(&mut canvas);
        let commands = canvas.commands();
        // 5 segments, 6 tick labels, needle, readout
        assert_eq!(commands.len(), 13);
        assert!(matches!(commands[0], DrawCommand::Polygon { .. }));
        assert!(matches!(commands[5], DrawCommand::Text { .. }));
        assert!(matches!(commands[11], DrawCommand::Group { .. }));
        match &commands[12] {
            DrawCommand::Text { content, .. } => assert_eq!(content, "0"),
            other => panic!("expected readout text, got {other:?}"),
        }
        assert_eq!(canvas.transform_depth(), 0);
    }

    #[test]
    fn test_render_svg() {
        let svg = gauge().render_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("rgb(255, 71, 26)"));
        assert!(svg.ends_with("</svg>"));
    }
}

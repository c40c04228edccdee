//! Core drawing types for the speedometer gauge.
//!
//! This crate provides the rendering-side foundation the gauge paints onto:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`annular_sector`]
//! - Color representation: [`Color`] with CSS parsing and HSL interpolation
//! - Draw commands and the [`Canvas`] trait, with [`RecordingCanvas`] and [`SvgCanvas`]
//! - Easing and eased values: [`Easing`], [`EasedValue`]

pub mod animation;
pub mod canvas;
mod color;
pub mod draw;
mod geometry;

pub use animation::{EasedValue, Easing};
pub use canvas::{Canvas, FontWeight, RecordingCanvas, SvgCanvas, TextAnchor, TextStyle};
pub use color::{Color, ColorParseError};
pub use draw::{DrawCommand, Transform2D};
pub use geometry::{annular_sector, Point, Rect, Size};

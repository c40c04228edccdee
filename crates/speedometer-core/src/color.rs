//! Color representation with CSS parsing and HSL interpolation.
//!
//! Named colors and HSL conversion come from the `palette` crate.

use palette::{Hsl, IntoColor, Mix, Srgb};
use serde::{Deserialize, Serialize};

/// RGBA color with values in the range [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component [0.0, 1.0]
    pub r: f32,
    /// Green component [0.0, 1.0]
    pub g: f32,
    /// Blue component [0.0, 1.0]
    pub b: f32,
    /// Alpha component [0.0, 1.0]
    pub a: f32,
}

impl Color {
    /// Create a new color, clamping values to [0.0, 1.0].
    #[must_use]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Create an opaque color from RGB values.
    #[must_use]
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create an opaque color from 8-bit channels.
    #[must_use]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        )
    }

    /// Parse a hex color string (e.g., "#ff0000", "ff0000" or "#f00").
    ///
    /// Supports 3-character shorthand, 6-character RGB and 8-character RGBA.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(ColorParseError::InvalidHex);
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidHex);

        match hex.len() {
            3 => {
                let mut rgb = [0u8; 3];
                for (i, slot) in rgb.iter_mut().enumerate() {
                    let digit = channel(&hex[i..=i])?;
                    *slot = digit * 17;
                }
                Ok(Self::from_rgb8(rgb[0], rgb[1], rgb[2]))
            }
            6 => Ok(Self::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            8 => {
                let a = channel(&hex[6..8])?;
                let base = Self::from_rgb8(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                );
                Ok(Self::new(base.r, base.g, base.b, f32::from(a) / 255.0))
            }
            _ => Err(ColorParseError::InvalidLength),
        }
    }

    /// Parse a CSS color.
    ///
    /// Accepts hex strings, the CSS named colors, `transparent`, and the
    /// `rgb()`, `rgba()`, `hsl()` and `hsla()` functions.
    ///
    /// ```
    /// use speedometer_core::Color;
    ///
    /// assert_eq!(Color::from_css("purple").unwrap().to_rgb8(), [128, 0, 128]);
    /// assert_eq!(Color::from_css("rgb(255, 71, 26)").unwrap().to_hex(), "#ff471a");
    /// assert_eq!(Color::from_css("hsl(120, 100%, 25%)").unwrap().to_rgb8(), [0, 128, 0]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for unknown names and malformed strings.
    pub fn from_css(css: &str) -> Result<Self, ColorParseError> {
        let css = css.trim();
        if css.starts_with('#') {
            return Self::from_hex(css);
        }
        let lower = css.to_ascii_lowercase();
        if let Some((name, args)) = lower
            .strip_suffix(')')
            .and_then(|body| body.split_once('('))
        {
            return parse_function(name.trim(), args)
                .ok_or_else(|| ColorParseError::InvalidFunction(css.to_string()));
        }
        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        palette::named::from_str(&lower)
            .map(|rgb| Self::from_rgb8(rgb.red, rgb.green, rgb.blue))
            .ok_or_else(|| ColorParseError::UnknownName(css.to_string()))
    }

    /// Convert to hex string (RGB only).
    #[must_use]
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Convert to a CSS `rgb(r, g, b)` string.
    #[must_use]
    pub fn to_css_rgb(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("rgb({r}, {g}, {b})")
    }

    /// 8-bit RGB channels.
    #[must_use]
    pub fn to_rgb8(&self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }

    /// Interpolation in HSL space, taking the shortest path around the hue wheel.
    #[must_use]
    pub fn lerp_hsl(&self, other: &Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut from = self.to_palette_hsl();
        let mut to = other.to_palette_hsl();

        // Achromatic endpoints have no meaningful hue.
        if from.saturation == 0.0 {
            from.hue = to.hue;
        } else if to.saturation == 0.0 {
            to.hue = from.hue;
        }

        let mut color = Self::from_palette_hsl(from.mix(&to, t));
        color.a = self.a + (other.a - self.a) * t;
        color
    }

    /// Hue (degrees in [0, 360)), saturation and lightness in [0, 1].
    #[must_use]
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let hsl = self.to_palette_hsl();
        (
            hsl.hue.to_positive_degrees(),
            hsl.saturation,
            hsl.lightness,
        )
    }

    /// Build an opaque color from hue (degrees), saturation and lightness.
    #[must_use]
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        Self::from_palette_hsl(Hsl::new(h, s.clamp(0.0, 1.0), l.clamp(0.0, 1.0)))
    }

    fn to_palette_hsl(self) -> Hsl {
        Srgb::new(self.r, self.g, self.b).into_color()
    }

    fn from_palette_hsl(hsl: Hsl) -> Self {
        let rgb: Srgb = hsl.into_color();
        Self::rgb(rgb.red, rgb.green, rgb.blue)
    }

    // Common colors
    /// Black color
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    /// White color
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    /// Transparent color
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
}

/// Parse the arguments of a CSS color function.
fn parse_function(name: &str, args: &str) -> Option<Color> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    let alpha = match parts.len() {
        3 => 1.0,
        4 => alpha_channel(parts[3])?,
        _ => return None,
    };

    let color = match name {
        "rgb" | "rgba" => Color::rgb(
            rgb_channel(parts[0])?,
            rgb_channel(parts[1])?,
            rgb_channel(parts[2])?,
        ),
        "hsl" | "hsla" => {
            let hue = parts[0].strip_suffix("deg").unwrap_or(parts[0]);
            Color::from_hsl(
                hue.parse().ok()?,
                percentage(parts[1])?,
                percentage(parts[2])?,
            )
        }
        _ => return None,
    };
    Some(Color::new(color.r, color.g, color.b, alpha))
}

/// `0..=255` or a percentage, as a fraction.
fn rgb_channel(part: &str) -> Option<f32> {
    match part.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok().map(|v| v / 100.0),
        None => part.parse::<f32>().ok().map(|v| v / 255.0),
    }
    .filter(|v| v.is_finite())
}

fn alpha_channel(part: &str) -> Option<f32> {
    match part.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok().map(|v| v / 100.0),
        None => part.parse::<f32>().ok(),
    }
    .filter(|v| v.is_finite())
}

fn percentage(part: &str) -> Option<f32> {
    part.strip_suffix('%')?
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v / 100.0)
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Invalid hex characters
    InvalidHex,
    /// Invalid string length
    InvalidLength,
    /// Not a known color name
    UnknownName(String),
    /// Malformed `rgb()` or `hsl()` color
    InvalidFunction(String),
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex => write!(f, "invalid hex characters"),
            Self::InvalidLength => write!(f, "invalid hex string length (expected 3, 6 or 8)"),
            Self::UnknownName(name) => write!(f, "unknown color name: {name}"),
            Self::InvalidFunction(css) => write!(f, "malformed color function: {css}"),
        }
    }
}

impl std::error::Error for ColorParseError {}
